//! Read-only reporting queries.
//!
//! Everything here runs at default read isolation against the pool and
//! never blocks writers; the heavy lifting on the hot path was already paid
//! by the eagerly-maintained `survey_stats` counter.

use encuesta_core::types::DbId;
use sqlx::PgPool;

use crate::models::reporting::{
    DashboardTotalsRow, OptionCountRow, SurveySummaryRow, TopSurveyRow,
};

/// Aggregation queries consumed by the reporting engine.
pub struct ReportRepo;

impl ReportRepo {
    /// Survey joined with its owner and stats row.
    ///
    /// Returns `None` when the survey does not exist; a missing stats row
    /// reads as zero votes, not as an error.
    pub async fn survey_summary(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Option<SurveySummaryRow>, sqlx::Error> {
        sqlx::query_as::<_, SurveySummaryRow>(
            "SELECT s.id AS survey_id,
                    s.title,
                    s.description,
                    u.username AS owner_name,
                    s.created_on,
                    COALESCE(st.total_votes, 0) AS total_votes,
                    st.last_update,
                    s.is_active
             FROM surveys s
             JOIN users u ON u.id = s.owner_id
             LEFT JOIN survey_stats st ON st.survey_id = s.id
             WHERE s.id = $1",
        )
        .bind(survey_id)
        .fetch_optional(pool)
        .await
    }

    /// Per-option vote counts for every question of a survey.
    ///
    /// Options with zero votes still produce a row (LEFT JOIN), so the
    /// breakdown always covers the full option set. Ordered by question
    /// prompt, then question id, then option id -- the order the tally math
    /// expects.
    pub async fn option_counts(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<OptionCountRow>, sqlx::Error> {
        sqlx::query_as::<_, OptionCountRow>(
            "SELECT q.id AS question_id,
                    q.prompt AS question_prompt,
                    o.id AS option_id,
                    o.text AS option_text,
                    COUNT(v.id) AS votes
             FROM questions q
             JOIN options o ON o.question_id = q.id
             LEFT JOIN votes v ON v.option_id = o.id
             WHERE q.survey_id = $1
             GROUP BY q.id, q.prompt, o.id, o.text
             ORDER BY q.prompt, q.id, o.id",
        )
        .bind(survey_id)
        .fetch_all(pool)
        .await
    }

    /// System-wide counters. All zeros on an empty database.
    pub async fn dashboard_totals(pool: &PgPool) -> Result<DashboardTotalsRow, sqlx::Error> {
        sqlx::query_as::<_, DashboardTotalsRow>(
            "SELECT (SELECT COUNT(*) FROM surveys) AS total_surveys,
                    (SELECT COUNT(*) FROM surveys WHERE is_active) AS active_surveys,
                    (SELECT COUNT(DISTINCT user_id) FROM votes) AS voting_users,
                    (SELECT COUNT(*) FROM votes) AS total_votes",
        )
        .fetch_one(pool)
        .await
    }

    /// The most-voted survey; ties resolve to the lowest survey id.
    ///
    /// `None` only when there are no surveys at all.
    pub async fn top_survey(pool: &PgPool) -> Result<Option<TopSurveyRow>, sqlx::Error> {
        sqlx::query_as::<_, TopSurveyRow>(
            "SELECT s.id AS survey_id,
                    s.title,
                    COALESCE(st.total_votes, 0) AS total_votes
             FROM surveys s
             LEFT JOIN survey_stats st ON st.survey_id = s.id
             ORDER BY COALESCE(st.total_votes, 0) DESC, s.id ASC
             LIMIT 1",
        )
        .fetch_optional(pool)
        .await
    }
}
