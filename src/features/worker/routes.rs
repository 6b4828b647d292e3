use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::worker::handlers;
use crate::features::worker::services::WorkerService;

/// Create routes for the worker panel
pub fn routes(worker_service: Arc<WorkerService>) -> Router {
    Router::new()
        .route("/worker", get(handlers::worker_panel))
        .route(
            "/worker/complete/{report_id}",
            post(handlers::complete_report),
        )
        .with_state(worker_service)
}
