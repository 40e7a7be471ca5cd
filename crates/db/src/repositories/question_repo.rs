//! Repository for the `questions` table.

use encuesta_core::types::DbId;
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, survey_id, prompt, kind, created_at";

/// Provides operations for questions. Questions carry no validation beyond
/// referential existence of their survey, enforced by the foreign key.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (survey_id, prompt, kind)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.survey_id)
            .bind(&input.prompt)
            .bind(&input.kind)
            .fetch_one(pool)
            .await
    }

    /// Find a question by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a survey's questions in insertion order.
    pub async fn list_by_survey(
        pool: &PgPool,
        survey_id: DbId,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE survey_id = $1 ORDER BY id");
        sqlx::query_as::<_, Question>(&query)
            .bind(survey_id)
            .fetch_all(pool)
            .await
    }
}
