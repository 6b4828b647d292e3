use sqlx::SqlitePool;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::admin::dtos::{AdminStatsDto, ReportCounts};
use crate::features::reports::models::{Report, ReportStatus};
use crate::features::reports::ReportService;
use crate::modules::storage::MediaStorage;

/// Service for admin queries
pub struct AdminService {
    pool: SqlitePool,
    report_service: Arc<ReportService>,
}

impl AdminService {
    pub fn new(pool: SqlitePool, report_service: Arc<ReportService>) -> Self {
        Self {
            pool,
            report_service,
        }
    }

    pub fn storage(&self) -> &dyn MediaStorage {
        self.report_service.storage()
    }

    /// Count reports by status in a single pass
    pub async fn stats(&self) -> Result<AdminStatsDto> {
        let counts = sqlx::query_as::<_, ReportCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(CASE WHEN status = ? THEN 1 END) AS completed,
                COUNT(CASE WHEN status = ? THEN 1 END) AS pending
            FROM reports
            "#,
        )
        .bind(ReportStatus::Completed)
        .bind(ReportStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count reports: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(counts.into())
    }

    /// Every report, newest first
    pub async fn list_reports(&self) -> Result<Vec<Report>> {
        self.report_service.list_all().await
    }
}

#[cfg(test)]
mod tests {
    use crate::shared::test_helpers::{random_form, sample_form, TestContext};
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_stats_on_empty_store() {
        let ctx = TestContext::new().await;
        let stats = ctx.admin_service.stats().await.unwrap();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.percent, 0);
    }

    #[tokio::test]
    async fn test_stats_counts_statuses() {
        let ctx = TestContext::new().await;
        let mut ids = Vec::new();
        ids.push(ctx.report_service.submit(sample_form()).await.unwrap().id);
        for _ in 0..2 {
            let report = assert_ok!(ctx.report_service.submit(random_form()).await);
            ids.push(report.id);
        }
        ctx.report_service
            .mark_completed(ids[0], "after.jpg")
            .await
            .unwrap();

        let stats = ctx.admin_service.stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.percent, 33);
        assert_eq!(stats.total, stats.pending + stats.completed);

        let reports = ctx.admin_service.list_reports().await.unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[0].id, ids[2]);
    }

    #[tokio::test]
    async fn test_list_reports_matches_report_listing() {
        let ctx = TestContext::new().await;
        for _ in 0..3 {
            ctx.report_service.submit(random_form()).await.unwrap();
        }

        let admin_ids: Vec<i64> = ctx
            .admin_service
            .list_reports()
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        let all_ids: Vec<i64> = ctx
            .report_service
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(admin_ids, all_ids);
    }
}
