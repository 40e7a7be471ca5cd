//! Repository for the `survey_stats` table.
//!
//! The counter is the one write-contended resource in the system. Every
//! mutation here is a single `INSERT ... ON CONFLICT` statement, so two
//! concurrent votes on the same survey both land: the row-level lock taken
//! by the conflicting update serializes the `total_votes + 1` computations
//! inside PostgreSQL.

use encuesta_core::types::{Date, DbId};
use sqlx::{PgConnection, PgPool};

use crate::models::stats::SurveyStats;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, survey_id, total_votes, last_update";

/// Maintains the denormalized per-survey vote counter.
pub struct SurveyStatsRepo;

impl SurveyStatsRepo {
    /// Find the stats row for a survey. `None` means no row was ever seeded.
    pub async fn find_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Option<SurveyStats>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM survey_stats WHERE survey_id = $1");
        sqlx::query_as::<_, SurveyStats>(&query)
            .bind(survey_id)
            .fetch_optional(pool)
            .await
    }

    /// Seed a zero-count stats row for a survey.
    ///
    /// Idempotent upsert: an existing row keeps its `total_votes` and only
    /// refreshes `last_update`. Runs on a caller-owned connection so survey
    /// creation can seed inside its own transaction.
    pub async fn seed(
        conn: &mut PgConnection,
        survey_id: DbId,
        on: Date,
    ) -> Result<SurveyStats, sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_stats (survey_id, total_votes, last_update)
             VALUES ($1, 0, $2)
             ON CONFLICT (survey_id) DO UPDATE
             SET last_update = EXCLUDED.last_update
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SurveyStats>(&query)
            .bind(survey_id)
            .bind(on)
            .fetch_one(conn)
            .await
    }

    /// Atomically add one vote to a survey's counter, creating the row with
    /// `total_votes = 1` if it does not exist yet.
    ///
    /// Must run on the same transaction as the vote insert it accounts for.
    pub async fn increment(
        conn: &mut PgConnection,
        survey_id: DbId,
        on: Date,
    ) -> Result<SurveyStats, sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_stats (survey_id, total_votes, last_update)
             VALUES ($1, 1, $2)
             ON CONFLICT (survey_id) DO UPDATE
             SET total_votes = survey_stats.total_votes + 1,
                 last_update = EXCLUDED.last_update
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SurveyStats>(&query)
            .bind(survey_id)
            .bind(on)
            .fetch_one(conn)
            .await
    }

    /// Recompute `total_votes` from a live count of the survey's votes.
    ///
    /// Idempotent self-healing pass for stores where the vote insert and the
    /// increment could not share a transaction. Creates the stats row when
    /// absent.
    pub async fn reconcile(
        pool: &PgPool,
        survey_id: DbId,
        on: Date,
    ) -> Result<SurveyStats, sqlx::Error> {
        let query = format!(
            "INSERT INTO survey_stats (survey_id, total_votes, last_update)
             VALUES (
                $1,
                (SELECT COUNT(*) FROM votes v
                 JOIN options o ON o.id = v.option_id
                 JOIN questions q ON q.id = o.question_id
                 WHERE q.survey_id = $1),
                $2
             )
             ON CONFLICT (survey_id) DO UPDATE
             SET total_votes = EXCLUDED.total_votes,
                 last_update = EXCLUDED.last_update
             RETURNING {COLUMNS}"
        );
        let stats = sqlx::query_as::<_, SurveyStats>(&query)
            .bind(survey_id)
            .bind(on)
            .fetch_one(pool)
            .await?;
        tracing::debug!(survey_id, total_votes = stats.total_votes, "stats reconciled");
        Ok(stats)
    }
}
