use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Raw report counts as returned by the store
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct ReportCounts {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
}

/// Aggregate completion statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdminStatsDto {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    /// Completed share of all reports, rounded down; 0 when there are none
    pub percent: i64,
}

impl From<ReportCounts> for AdminStatsDto {
    fn from(c: ReportCounts) -> Self {
        Self {
            total: c.total,
            completed: c.completed,
            pending: c.pending,
            percent: completion_percent(c.completed, c.total),
        }
    }
}

/// `floor(completed / total * 100)`, or 0 for an empty store
pub fn completion_percent(completed: i64, total: i64) -> i64 {
    if total > 0 {
        completed * 100 / total
    } else {
        0
    }
}
