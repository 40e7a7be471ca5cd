use crate::types::Date;

/// A field-level invariant violation detected before a record is persisted.
///
/// Validation never corrects malformed input (the documented date defaulting
/// happens before validation runs); every variant carries the offending value
/// so callers can render a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid email address: {email:?}")]
    InvalidEmail { email: String },

    #[error("username must not be empty or whitespace")]
    EmptyUsername,

    #[error("password must be at least 8 characters, got {len}")]
    WeakPassword { len: usize },

    #[error("creation date {date} is in the future")]
    FutureDate { date: Date },
}
