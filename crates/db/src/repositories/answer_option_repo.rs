//! Repository for the `options` table.

use encuesta_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::answer_option::{AnswerOption, CreateAnswerOption};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question_id, text, created_at";

/// Provides operations for answer options. Insertion order carries no
/// meaning beyond tie-breaking in the breakdown report.
pub struct AnswerOptionRepo;

impl AnswerOptionRepo {
    /// Insert a new option, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnswerOption,
    ) -> Result<AnswerOption, sqlx::Error> {
        let query = format!(
            "INSERT INTO options (question_id, text)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnswerOption>(&query)
            .bind(input.question_id)
            .bind(&input.text)
            .fetch_one(pool)
            .await
    }

    /// Find an option by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<AnswerOption>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM options WHERE id = $1");
        sqlx::query_as::<_, AnswerOption>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Existence probe on a caller-owned connection, for error paths that
    /// must tell a missing option from a broken parent chain.
    pub async fn exists(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM options WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// List a question's options in insertion order.
    pub async fn list_by_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<AnswerOption>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM options WHERE question_id = $1 ORDER BY id");
        sqlx::query_as::<_, AnswerOption>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }
}
