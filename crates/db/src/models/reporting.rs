//! Read-only row shapes produced by the reporting queries.

use encuesta_core::types::{Date, DbId};
use sqlx::FromRow;

/// Survey joined with its owner and stats row for the summary view.
#[derive(Debug, Clone, FromRow)]
pub struct SurveySummaryRow {
    pub survey_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub owner_name: String,
    pub created_on: Date,
    /// 0 when the survey has no stats row yet.
    pub total_votes: i64,
    pub last_update: Option<Date>,
    pub is_active: bool,
}

/// Per-option vote count, grouped by question.
///
/// Ordered by question prompt, then question id, then option id so the
/// tally math receives contiguous question groups with a stable tie-break
/// order.
#[derive(Debug, Clone, FromRow)]
pub struct OptionCountRow {
    pub question_id: DbId,
    pub question_prompt: String,
    pub option_id: DbId,
    pub option_text: String,
    pub votes: i64,
}

/// System-wide counters for the dashboard.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct DashboardTotalsRow {
    pub total_surveys: i64,
    pub active_surveys: i64,
    /// Distinct users that have cast at least one vote.
    pub voting_users: i64,
    pub total_votes: i64,
}

/// The single most-voted survey (ties resolved by lowest id).
#[derive(Debug, Clone, FromRow)]
pub struct TopSurveyRow {
    pub survey_id: DbId,
    pub title: String,
    pub total_votes: i64,
}
