//! Engine error taxonomy.

use encuesta_core::types::DbId;
use encuesta_core::ValidationError;

/// Failure of an engine operation.
///
/// Validation failures and `NotFound` are caller-facing and never retried;
/// `DanglingReference` signals a collaborator bug and should alert rather
/// than retry; `TransientWrite` is what remains after the internal retry
/// budget for counter conflicts is exhausted.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("dangling reference: {entity} {id} points at a missing parent")]
    DanglingReference { entity: &'static str, id: DbId },

    #[error("user {user_id} has already voted in survey {survey_id}")]
    DuplicateVote { user_id: DbId, survey_id: DbId },

    #[error("statistics write still conflicting after {attempts} attempts")]
    TransientWrite { attempts: u32 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for engine operation results.
pub type EngineResult<T> = Result<T, EngineError>;

/// True for PostgreSQL serialization failures (40001) and deadlocks
/// (40P01), the only errors the vote path retries.
pub(crate) fn is_transient(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db)
        if matches!(db.code().as_deref(), Some("40001") | Some("40P01")))
}

/// True for PostgreSQL foreign key violations (23503).
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

/// Map a foreign key violation to `NotFound` for the referenced entity;
/// pass every other error through as `Database`.
pub(crate) fn fk_as_not_found(err: sqlx::Error, entity: &'static str, id: DbId) -> EngineError {
    if is_foreign_key_violation(&err) {
        EngineError::NotFound { entity, id }
    } else {
        EngineError::Database(err)
    }
}
