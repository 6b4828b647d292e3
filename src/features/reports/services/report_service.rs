use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{ImageSource, SubmitReportForm};
use crate::features::reports::models::{CreateReport, Report, ReportStatus};
use crate::modules::storage::{
    before_image_name, captured_image_name, decode_data_url, MediaStorage,
};
use crate::shared::validation::is_present;

/// Column list shared by every query that maps rows to [`Report`]
const REPORT_COLUMNS: &str = "id, user_id, waste_type, latitude, longitude, \
     before_image, after_image, status, feedback, created_at";

/// Result of attaching feedback to a report
#[derive(Debug)]
pub enum FeedbackOutcome {
    Saved(Report),
    /// Feedback is only accepted once a worker completed the report
    NotCompleted(Report),
    NotFound,
}

/// Service for report operations
pub struct ReportService {
    pool: SqlitePool,
    storage: Arc<dyn MediaStorage>,
}

impl ReportService {
    pub fn new(pool: SqlitePool, storage: Arc<dyn MediaStorage>) -> Self {
        Self { pool, storage }
    }

    pub fn storage(&self) -> &dyn MediaStorage {
        self.storage.as_ref()
    }

    /// Accept a citizen submission: store its photo (if any), then insert the
    /// report as `Pending`.
    pub async fn submit(&self, mut form: SubmitReportForm) -> Result<Report> {
        form.waste_type = form.waste_type.trim().to_string();
        form.latitude = form.latitude.trim().to_string();
        form.longitude = form.longitude.trim().to_string();
        form.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let before_image = match form.image_source() {
            Some(source) => Some(self.store_before_image(source).await?),
            None => None,
        };

        let user_id = form
            .user_id
            .filter(|u| is_present(u))
            .map(|u| u.trim().to_string());

        self.create(&CreateReport {
            user_id,
            waste_type: form.waste_type,
            latitude: form.latitude,
            longitude: form.longitude,
            before_image,
        })
        .await
    }

    async fn store_before_image(&self, source: ImageSource) -> Result<String> {
        let (name, data) = match source {
            ImageSource::Captured(data_url) => (captured_image_name(), decode_data_url(&data_url)?),
            ImageSource::Uploaded(file) => (before_image_name(&file.file_name), file.data),
        };

        self.storage.put(&name, &data).await?;
        Ok(name)
    }

    /// Insert a new report. Status always starts as `Pending`.
    pub async fn create(&self, data: &CreateReport) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            INSERT INTO reports (user_id, waste_type, latitude, longitude, before_image, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(&data.user_id)
        .bind(&data.waste_type)
        .bind(&data.latitude)
        .bind(&data.longitude)
        .bind(&data.before_image)
        .bind(ReportStatus::Pending)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create report: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Created report: {} (type: {}, user: {}, image: {})",
            report.id,
            report.waste_type,
            report.user_id.as_deref().unwrap_or("-"),
            report.before_image.as_deref().unwrap_or("-")
        );

        Ok(report)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(report)
    }

    /// Get report by ID or fail with NotFound
    pub async fn get_by_id(&self, id: i64) -> Result<Report> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Reports submitted under `user_id`, newest first
    pub async fn list_by_user(&self, user_id: &str) -> Result<Vec<Report>> {
        let reports = sqlx::query_as::<_, Report>(&format!(
            r#"
            SELECT {REPORT_COLUMNS} FROM reports
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Every report, newest first
    pub async fn list_all(&self) -> Result<Vec<Report>> {
        let reports = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Attach an after-image and mark the report completed.
    ///
    /// Returns `None` when the report does not exist. Completing an already
    /// completed report replaces its after-image; the last write wins.
    pub async fn mark_completed(&self, id: i64, after_image: &str) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET after_image = ?, status = ?
            WHERE id = ?
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(after_image)
        .bind(ReportStatus::Completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to complete report {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        if let Some(ref r) = report {
            tracing::info!("Report {} completed with after-image {}", r.id, after_image);
        }

        Ok(report)
    }

    /// Store citizen feedback on a completed report
    pub async fn add_feedback(&self, id: i64, feedback: &str) -> Result<FeedbackOutcome> {
        let Some(report) = self.find_by_id(id).await? else {
            tracing::warn!("Feedback for unknown report {} ignored", id);
            return Ok(FeedbackOutcome::NotFound);
        };

        if !report.is_completed() {
            tracing::debug!("Feedback for report {} ignored: still {}", id, report.status);
            return Ok(FeedbackOutcome::NotCompleted(report));
        }

        let updated = sqlx::query_as::<_, Report>(&format!(
            r#"
            UPDATE reports
            SET feedback = ?
            WHERE id = ? AND status = ?
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(feedback)
        .bind(id)
        .bind(ReportStatus::Completed)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(report) => {
                tracing::info!("Feedback saved for report {}", id);
                Ok(FeedbackOutcome::Saved(report))
            }
            None => Ok(FeedbackOutcome::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::dtos::UploadedImage;
    use crate::shared::test_helpers::{sample_form, TestContext};

    #[tokio::test]
    async fn test_submit_without_image_is_pending() {
        let ctx = TestContext::new().await;

        let report = ctx.report_service.submit(sample_form()).await.unwrap();

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.waste_type, "Plastic");
        assert!(report.before_image.is_none());
        assert!(report.after_image.is_none());
        assert!(report.feedback.is_none());
    }

    #[tokio::test]
    async fn test_submit_missing_field_creates_nothing() {
        let ctx = TestContext::new().await;
        let mut form = sample_form();
        form.longitude = "  ".to_string();

        let result = ctx.report_service.submit(form).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(ctx.report_service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_captured_image_is_stored() {
        let ctx = TestContext::new().await;
        let mut form = sample_form();
        form.captured_image = Some("data:image/jpeg;base64,/9j/4AAQ".to_string());

        let report = ctx.report_service.submit(form).await.unwrap();

        let name = report.before_image.expect("before image");
        assert!(name.ends_with(".jpg"));
        let bytes = std::fs::read(ctx.media_dir().join(&name)).unwrap();
        assert_eq!(bytes, vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]);
    }

    #[tokio::test]
    async fn test_submit_malformed_capture_is_bad_request() {
        let ctx = TestContext::new().await;
        let mut form = sample_form();
        form.captured_image = Some("data:image/jpeg;base64,%%%".to_string());

        let result = ctx.report_service.submit(form).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(ctx.report_service.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_upload_sanitizes_name() {
        let ctx = TestContext::new().await;
        let mut form = sample_form();
        form.before_image = Some(UploadedImage {
            file_name: "../../pile of bottles.png".to_string(),
            data: b"png".to_vec(),
        });

        let report = ctx.report_service.submit(form).await.unwrap();

        let name = report.before_image.unwrap();
        assert!(name.starts_with("before_"));
        assert!(name.ends_with("_pile_of_bottles.png"));
        assert!(ctx.media_dir().join(&name).is_file());
    }

    #[tokio::test]
    async fn test_list_by_user_filters_and_orders_newest_first() {
        let ctx = TestContext::new().await;
        let mut first = sample_form();
        first.user_id = Some("alice".to_string());
        first.waste_type = "Glass".to_string();
        let mut second = sample_form();
        second.user_id = Some("alice".to_string());
        second.waste_type = "Metal".to_string();
        let mut other = sample_form();
        other.user_id = Some("bob".to_string());

        ctx.report_service.submit(first).await.unwrap();
        ctx.report_service.submit(other).await.unwrap();
        ctx.report_service.submit(second).await.unwrap();

        let reports = ctx.report_service.list_by_user("alice").await.unwrap();
        let types: Vec<&str> = reports.iter().map(|r| r.waste_type.as_str()).collect();
        assert_eq!(types, vec!["Metal", "Glass"]);

        assert_eq!(ctx.report_service.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mark_completed_transitions_status() {
        let ctx = TestContext::new().await;
        let report = ctx.report_service.submit(sample_form()).await.unwrap();

        let completed = ctx
            .report_service
            .mark_completed(report.id, "after_1_x.jpg")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(completed.status, ReportStatus::Completed);
        assert_eq!(completed.after_image.as_deref(), Some("after_1_x.jpg"));
        assert_eq!(completed.created_at, report.created_at);
    }

    #[tokio::test]
    async fn test_mark_completed_unknown_report() {
        let ctx = TestContext::new().await;
        let result = ctx.report_service.mark_completed(999, "x.jpg").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_feedback_requires_completion() {
        let ctx = TestContext::new().await;
        let report = ctx.report_service.submit(sample_form()).await.unwrap();

        let outcome = ctx
            .report_service
            .add_feedback(report.id, "thanks")
            .await
            .unwrap();
        assert!(matches!(outcome, FeedbackOutcome::NotCompleted(_)));
        let stored = ctx.report_service.get_by_id(report.id).await.unwrap();
        assert!(stored.feedback.is_none());

        ctx.report_service
            .mark_completed(report.id, "after.jpg")
            .await
            .unwrap();
        let outcome = ctx
            .report_service
            .add_feedback(report.id, "thanks")
            .await
            .unwrap();
        match outcome {
            FeedbackOutcome::Saved(r) => assert_eq!(r.feedback.as_deref(), Some("thanks")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_feedback_unknown_report() {
        let ctx = TestContext::new().await;
        let outcome = ctx.report_service.add_feedback(7, "hello").await.unwrap();
        assert!(matches!(outcome, FeedbackOutcome::NotFound));
    }
}
