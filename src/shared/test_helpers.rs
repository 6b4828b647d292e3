#![cfg(test)]

use axum_test::TestServer;
use fake::faker::address::en::{Latitude, Longitude};
use fake::Fake;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::core::config::{AppConfig, Config, DatabaseConfig, MediaConfig, SwaggerConfig};
use crate::core::database;
use crate::core::router::{build_router, AppServices};
use crate::features::admin::AdminService;
use crate::features::reports::dtos::SubmitReportForm;
use crate::features::reports::ReportService;
use crate::features::worker::WorkerService;
use crate::modules::storage::{LocalMediaStorage, MediaStorage};
use crate::shared::constants::{DEFAULT_MAX_REQUEST_BODY_SIZE, DEFAULT_MEDIA_URL_PREFIX};

const WASTE_TYPES: [&str; 4] = ["Plastic", "Organic", "Metal", "Glass"];

/// Full application over an in-memory database and a throwaway upload directory
pub struct TestContext {
    pub server: TestServer,
    pub report_service: Arc<ReportService>,
    pub worker_service: Arc<WorkerService>,
    pub admin_service: Arc<AdminService>,
    upload_dir: PathBuf,
    // Held so the directory outlives the test
    _tmp: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_body_limit(DEFAULT_MAX_REQUEST_BODY_SIZE).await
    }

    pub async fn with_body_limit(max_request_body_size: usize) -> Self {
        let tmp = TempDir::new().unwrap();
        let upload_dir = tmp.path().join("uploads");

        let config = Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_allowed_origins: vec!["*".to_string()],
                max_request_body_size,
            },
            database: DatabaseConfig::in_memory(),
            media: MediaConfig {
                upload_dir: upload_dir.to_string_lossy().into_owned(),
                url_prefix: DEFAULT_MEDIA_URL_PREFIX.to_string(),
            },
            swagger: SwaggerConfig {
                title: "WasteWatch API".to_string(),
                version: "test".to_string(),
                description: "test".to_string(),
            },
        };

        let pool = database::create_pool(&config.database).await.unwrap();
        database::run_migrations(&pool).await.unwrap();

        let storage: Arc<dyn MediaStorage> =
            Arc::new(LocalMediaStorage::new(&config.media).await.unwrap());

        let report_service = Arc::new(ReportService::new(pool.clone(), storage));
        let worker_service = Arc::new(WorkerService::new(Arc::clone(&report_service)));
        let admin_service = Arc::new(AdminService::new(pool, Arc::clone(&report_service)));

        let app = build_router(
            &config,
            AppServices {
                report_service: Arc::clone(&report_service),
                worker_service: Arc::clone(&worker_service),
                admin_service: Arc::clone(&admin_service),
            },
        );

        Self {
            server: TestServer::new(app).unwrap(),
            report_service,
            worker_service,
            admin_service,
            upload_dir,
            _tmp: tmp,
        }
    }

    pub fn media_dir(&self) -> PathBuf {
        self.upload_dir.clone()
    }
}

/// A valid submission from `citizen-1` without a photo
pub fn sample_form() -> SubmitReportForm {
    SubmitReportForm {
        waste_type: "Plastic".to_string(),
        latitude: "12.9".to_string(),
        longitude: "77.6".to_string(),
        user_id: Some("citizen-1".to_string()),
        ..Default::default()
    }
}

/// An anonymous submission at a random location
pub fn random_form() -> SubmitReportForm {
    let waste_type = WASTE_TYPES[(0..WASTE_TYPES.len()).fake::<usize>()];
    SubmitReportForm {
        waste_type: waste_type.to_string(),
        latitude: Latitude().fake(),
        longitude: Longitude().fake(),
        ..Default::default()
    }
}
