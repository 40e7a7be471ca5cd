//! Survey entity model and DTOs.

use encuesta_core::types::{Date, DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// Full survey row from the `surveys` table.
#[derive(Debug, Clone, FromRow)]
pub struct Survey {
    pub id: DbId,
    /// Owning user. Immutable after creation.
    pub owner_id: DbId,
    pub title: String,
    pub description: Option<String>,
    /// Day the survey was created. Never in the future.
    pub created_on: Date,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a survey. Fields are already validated and defaulted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSurvey {
    pub owner_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_on: Date,
    pub is_active: bool,
}

/// DTO for updating a survey. Only non-`None` fields are applied; the
/// owner reference is not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSurvey {
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}
