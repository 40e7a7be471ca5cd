//! Answer option entity model and DTO.
//!
//! Named `AnswerOption` to stay clear of `std::option::Option`; the table
//! is still `options`.

use encuesta_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// Full option row from the `options` table.
#[derive(Debug, Clone, FromRow)]
pub struct AnswerOption {
    pub id: DbId,
    pub question_id: DbId,
    pub text: String,
    pub created_at: Timestamp,
}

/// DTO for inserting an option.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnswerOption {
    pub question_id: DbId,
    pub text: String,
}
