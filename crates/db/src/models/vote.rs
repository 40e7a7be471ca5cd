//! Vote entity model and the resolved vote context.

use encuesta_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full vote row from the `votes` table.
#[derive(Debug, Clone, FromRow)]
pub struct Vote {
    pub id: DbId,
    pub user_id: DbId,
    pub option_id: DbId,
    pub cast_at: Timestamp,
}

/// The option -> question -> survey chain a vote lands on.
///
/// Resolved inside the vote-cast transaction so the stats increment targets
/// the right survey.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct VoteContext {
    pub option_id: DbId,
    pub question_id: DbId,
    pub survey_id: DbId,
}
