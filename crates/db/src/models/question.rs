//! Question entity model and DTO.

use encuesta_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// Full question row from the `questions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Question {
    pub id: DbId,
    pub survey_id: DbId,
    pub prompt: String,
    /// Descriptive tag from `encuesta_core::kinds`; not enforced against
    /// the option set.
    pub kind: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestion {
    pub survey_id: DbId,
    pub prompt: String,
    pub kind: String,
}
