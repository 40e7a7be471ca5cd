//! Observability events for the survey engine.
//!
//! Informational side effects (survey created, survey activated, vote
//! recorded) are published as structured [`DomainEvent`]s on an in-process
//! [`EventBus`], not encoded in log text. Tests and future delivery layers
//! subscribe to the bus; log output stays a human convenience.

pub mod bus;

pub use bus::{DomainEvent, EventBus};

/// A survey was created and its stats row seeded.
pub const SURVEY_CREATED: &str = "survey.created";
/// A survey's active flag transitioned to `true`.
pub const SURVEY_ACTIVATED: &str = "survey.activated";
/// A vote was recorded and the survey counter incremented.
pub const VOTE_RECORDED: &str = "vote.recorded";
