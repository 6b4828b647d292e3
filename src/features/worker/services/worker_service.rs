use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::error::Result;
use crate::features::reports::models::Report;
use crate::features::reports::ReportService;
use crate::modules::storage::{after_image_name, MediaStorage};
use crate::shared::multipart::UploadedImage;

/// Result of a worker completion request
#[derive(Debug)]
pub enum CompletionOutcome {
    Completed(Report),
    /// No after-image was attached; nothing changed
    MissingImage,
    /// The report does not exist; nothing was written
    NotFound,
}

/// Service for the worker triage flow
pub struct WorkerService {
    report_service: Arc<ReportService>,
}

impl WorkerService {
    pub fn new(report_service: Arc<ReportService>) -> Self {
        Self { report_service }
    }

    pub fn storage(&self) -> &dyn MediaStorage {
        self.report_service.storage()
    }

    /// Every report, pending and completed together, newest first
    pub async fn list_reports(&self) -> Result<Vec<Report>> {
        self.report_service.list_all().await
    }

    /// Store the after-image and flip the report to `Completed`
    pub async fn complete(
        &self,
        report_id: i64,
        after_image: Option<UploadedImage>,
    ) -> Result<CompletionOutcome> {
        let Some(file) = after_image.filter(|f| !f.file_name.is_empty()) else {
            debug!("Completion of report {} skipped: no after-image", report_id);
            return Ok(CompletionOutcome::MissingImage);
        };

        if self.report_service.find_by_id(report_id).await?.is_none() {
            warn!("Completion requested for unknown report {}", report_id);
            return Ok(CompletionOutcome::NotFound);
        }

        let name = after_image_name(report_id, &file.file_name);
        self.storage().put(&name, &file.data).await?;

        match self.report_service.mark_completed(report_id, &name).await? {
            Some(report) => Ok(CompletionOutcome::Completed(report)),
            None => Ok(CompletionOutcome::NotFound),
        }
    }
}
