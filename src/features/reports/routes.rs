use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the citizen-facing pages and the reports API
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        // HTML pages and form posts
        .route("/", get(handlers::index))
        .route("/submit", post(handlers::submit_report))
        .route("/status", get(handlers::status_page))
        .route("/feedback/{report_id}", post(handlers::submit_feedback))
        // JSON API
        .route("/api/reports", get(handlers::list_reports))
        .route("/api/reports/{id}", get(handlers::get_report))
        .with_state(report_service)
}
