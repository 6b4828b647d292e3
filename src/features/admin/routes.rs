use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Create admin routes (dashboard page and stats API)
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route("/admin", get(handlers::admin_dashboard))
        .route("/api/admin/stats", get(handlers::get_stats))
        .with_state(admin_service)
}
