use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::reports::dtos::{ReportResponseDto, StatusQuery};
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// List reports of one user, newest first
///
/// Without `user` the list is empty, matching the status page.
#[utoipa::path(
    get,
    path = "/api/reports",
    params(StatusQuery),
    responses(
        (status = 200, description = "Reports of the given user", body = ApiResponse<Vec<ReportResponseDto>>)
    ),
    tag = "reports"
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = match query.user_id() {
        Some(user) => service.list_by_user(user).await?,
        None => Vec::new(),
    };
    let total = reports.len() as i64;
    let dtos = ReportResponseDto::from_reports(reports, service.storage());

    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found")
    ),
    tag = "reports"
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get_by_id(id).await?;
    let dto = ReportResponseDto::from_report(report, service.storage());
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::{sample_form, TestContext};
    use serde_json::Value;

    #[tokio::test]
    async fn test_list_reports_for_user() {
        let ctx = TestContext::new().await;
        ctx.report_service.submit(sample_form()).await.unwrap();
        ctx.report_service.submit(sample_form()).await.unwrap();

        let body: Value = ctx
            .server
            .get("/api/reports")
            .add_query_param("user", "citizen-1")
            .await
            .json();

        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["total"], 2);
        assert_eq!(body["data"][0]["status"], "Pending");
        assert!(body["data"][0]["before_image"].is_null());
    }

    #[tokio::test]
    async fn test_list_reports_without_user_is_empty() {
        let ctx = TestContext::new().await;
        ctx.report_service.submit(sample_form()).await.unwrap();

        let body: Value = ctx.server.get("/api/reports").await.json();

        assert_eq!(body["meta"]["total"], 0);
        assert_eq!(body["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_get_report_not_found() {
        let ctx = TestContext::new().await;
        let response = ctx.server.get("/api/reports/12345").await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_get_report_includes_media_url() {
        let ctx = TestContext::new().await;
        let mut form = sample_form();
        form.captured_image = Some("data:image/jpeg;base64,aGVsbG8=".to_string());
        let report = ctx.report_service.submit(form).await.unwrap();

        let body: Value = ctx
            .server
            .get(&format!("/api/reports/{}", report.id))
            .await
            .json();

        let name = report.before_image.unwrap();
        assert_eq!(body["data"]["before_image"], name.as_str());
        assert_eq!(
            body["data"]["before_image_url"],
            format!("/static/uploads/{}", name).as_str()
        );
    }
}
