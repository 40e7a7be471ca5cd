//! Repository for the `votes` table and the participation guard.

use encuesta_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::vote::{Vote, VoteContext};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, option_id, cast_at";

/// Provides vote insertion and read probes.
pub struct VoteRepo;

impl VoteRepo {
    /// Insert a vote on a caller-owned connection, returning the row.
    ///
    /// Takes `&mut PgConnection` so the insert shares a transaction with the
    /// stats increment; a crash between the two must roll both back.
    pub async fn insert(
        conn: &mut PgConnection,
        user_id: DbId,
        option_id: DbId,
    ) -> Result<Vote, sqlx::Error> {
        let query = format!(
            "INSERT INTO votes (user_id, option_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .bind(option_id)
            .fetch_one(conn)
            .await
    }

    /// Resolve the option -> question -> survey chain for an option.
    ///
    /// Returns `None` when the option row itself is missing. The joins are
    /// inner: with intact foreign keys a present option always resolves.
    pub async fn resolve_option(
        conn: &mut PgConnection,
        option_id: DbId,
    ) -> Result<Option<VoteContext>, sqlx::Error> {
        sqlx::query_as::<_, VoteContext>(
            "SELECT o.id AS option_id, q.id AS question_id, q.survey_id
             FROM options o
             JOIN questions q ON q.id = o.question_id
             JOIN surveys s ON s.id = q.survey_id
             WHERE o.id = $1",
        )
        .bind(option_id)
        .fetch_optional(conn)
        .await
    }

    /// Participation guard: has this user any vote resolving to this survey?
    ///
    /// Pure read; callers enforce one-vote-per-survey policy with it.
    pub async fn has_voted(
        pool: &PgPool,
        user_id: DbId,
        survey_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM votes v
                JOIN options o ON o.id = v.option_id
                JOIN questions q ON q.id = o.question_id
                WHERE v.user_id = $1 AND q.survey_id = $2
             )",
        )
        .bind(user_id)
        .bind(survey_id)
        .fetch_one(pool)
        .await
    }

    /// Narrower guard: has this user any vote on this question?
    pub async fn has_voted_on_question(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM votes v
                JOIN options o ON o.id = v.option_id
                WHERE v.user_id = $1 AND o.question_id = $2
             )",
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_one(pool)
        .await
    }

    /// Live count of votes resolving to a survey. Used by reconciliation
    /// and by tests asserting the stats invariant.
    pub async fn count_for_survey(pool: &PgPool, survey_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM votes v
             JOIN options o ON o.id = v.option_id
             JOIN questions q ON q.id = o.question_id
             WHERE q.survey_id = $1",
        )
        .bind(survey_id)
        .fetch_one(pool)
        .await
    }
}
