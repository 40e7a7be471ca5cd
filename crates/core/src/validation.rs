//! Field-level invariants checked before user and survey rows are persisted.
//!
//! Validation is synchronous and pure: it performs no I/O beyond the values
//! handed to it, and on failure the caller must not persist the record.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;
use crate::types::Date;

/// Shape check for `local@domain.tld` addresses.
const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Check that an email matches the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            email: email.to_string(),
        })
    }
}

/// Check that a username is non-empty after trimming whitespace.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        Err(ValidationError::EmptyUsername)
    } else {
        Ok(())
    }
}

/// Check that a password has at least [`MIN_PASSWORD_LEN`] characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        Err(ValidationError::WeakPassword { len })
    } else {
        Ok(())
    }
}

/// Validate all fields of a new user registration.
///
/// Checks run in field order and the first violation wins. Registration date
/// defaulting is the caller's job; an unset date is not a validation concern.
pub fn validate_new_user(
    username: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    validate_email(email)?;
    validate_username(username)?;
    validate_password(password)?;
    Ok(())
}

/// Check that a survey's creation date is not strictly after `today`.
pub fn validate_survey_date(created_on: Date, today: Date) -> Result<(), ValidationError> {
    if created_on > today {
        Err(ValidationError::FutureDate { date: created_on })
    } else {
        Ok(())
    }
}
