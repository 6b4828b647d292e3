use axum::{extract::State, response::Html, Json};
use minijinja::context;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::admin::dtos::AdminStatsDto;
use crate::features::admin::services::AdminService;
use crate::features::reports::dtos::ReportResponseDto;
use crate::shared::types::ApiResponse;
use crate::shared::views::render_view;

/// Admin dashboard: completion statistics followed by every report
pub async fn admin_dashboard(State(service): State<Arc<AdminService>>) -> Result<Html<String>> {
    let stats = service.stats().await?;
    let reports = service.list_reports().await?;
    let reports = ReportResponseDto::from_reports(reports, service.storage());

    let html = render_view(
        "admin.html.jinja",
        context! {
            stats => stats,
            reports => reports,
        },
    )?;

    Ok(Html(html))
}

/// Get completion statistics
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "admin",
    responses(
        (status = 200, description = "Report counts and completion percentage", body = ApiResponse<AdminStatsDto>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_stats(
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<AdminStatsDto>>> {
    let stats = service.stats().await?;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}
