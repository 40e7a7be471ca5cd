//! Denormalized per-survey vote statistics.

use encuesta_core::types::{Date, DbId};
use serde::Serialize;
use sqlx::FromRow;

/// Row of the `survey_stats` table: at most one per survey.
///
/// Invariant: `total_votes` equals the live count of votes whose option
/// transitively belongs to the survey. Maintained by the single-statement
/// upsert-increment in `SurveyStatsRepo`; `reconcile` restores it if the
/// two writes of a vote ever diverge.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SurveyStats {
    pub id: DbId,
    pub survey_id: DbId,
    pub total_votes: i64,
    pub last_update: Date,
}
