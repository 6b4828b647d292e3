use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::core::config::Config;
use crate::core::middleware;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::features::admin::{routes as admin_routes, AdminService};
use crate::features::reports::{routes as reports_routes, ReportService};
use crate::features::worker::{routes as worker_routes, WorkerService};

/// Services shared by the route handlers
#[derive(Clone)]
pub struct AppServices {
    pub report_service: Arc<ReportService>,
    pub worker_service: Arc<WorkerService>,
    pub admin_service: Arc<AdminService>,
}

/// Simple health check endpoint
async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Build the full application router with its middleware stack
pub fn build_router(config: &Config, services: AppServices) -> Router {
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger =
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));

    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Uploaded before/after photos
    let media = Router::new().nest_service(
        &config.media.url_prefix,
        ServeDir::new(&config.media.upload_dir),
    );

    Router::new()
        .merge(swagger)
        .merge(reports_routes(services.report_service))
        .merge(worker_routes(services.worker_service))
        .merge(admin_routes(services.admin_service))
        .merge(health_route)
        .merge(media)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::TestContext;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};

    #[tokio::test]
    async fn test_health() {
        let ctx = TestContext::new().await;
        ctx.server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let ctx = TestContext::new().await;
        let response = ctx.server.get("/health").await;
        assert!(response.maybe_header("x-request-id").is_some());
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let ctx = TestContext::new().await;
        let doc: serde_json::Value = ctx.server.get("/api-docs/openapi.json").await.json();
        assert!(doc["paths"]["/api/reports"].is_object());
        assert!(doc["paths"]["/api/admin/stats"].is_object());
    }

    #[tokio::test]
    async fn test_uploaded_media_is_served() {
        let ctx = TestContext::new().await;
        let form = MultipartForm::new()
            .add_text("waste_type", "Plastic")
            .add_text("latitude", "12.9")
            .add_text("longitude", "77.6")
            .add_part(
                "before_image",
                Part::bytes(b"pixels".to_vec())
                    .file_name("pile.jpg")
                    .mime_type("image/jpeg"),
            );
        ctx.server.post("/submit").multipart(form).await;

        let name = ctx.report_service.list_all().await.unwrap()[0]
            .before_image
            .clone()
            .unwrap();
        let response = ctx.server.get(&format!("/static/uploads/{}", name)).await;

        response.assert_status_ok();
        assert_eq!(response.as_bytes().as_ref(), b"pixels");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let ctx = TestContext::with_body_limit(1024).await;
        let form = MultipartForm::new()
            .add_text("waste_type", "Plastic")
            .add_text("latitude", "12.9")
            .add_text("longitude", "77.6")
            .add_part(
                "before_image",
                Part::bytes(vec![0u8; 4096])
                    .file_name("huge.jpg")
                    .mime_type("image/jpeg"),
            );

        let response = ctx.server.post("/submit").multipart(form).await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert!(ctx.report_service.list_all().await.unwrap().is_empty());
    }
}
