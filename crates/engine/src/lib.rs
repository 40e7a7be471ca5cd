//! The vote-recording and statistics-consistency engine.
//!
//! [`Engine`] is the operation surface callers (an HTTP layer, a CLI, tests)
//! drive: user and survey writes run through validation, every vote insert
//! atomically moves the per-survey counter, and the read side serves the
//! summary, breakdown and dashboard views. Side effects that used to be
//! implicit (trigger-style) are explicit calls here, so the control flow is
//! visible and testable.

pub mod config;
pub mod error;
pub mod reports;
pub mod surveys;
pub mod users;
pub mod votes;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};

use chrono::Utc;
use encuesta_core::types::Date;
use encuesta_db::DbPool;
use encuesta_events::{DomainEvent, EventBus};
use tokio::sync::broadcast;

/// Shared engine handle: pool, configuration, and the observability bus.
pub struct Engine {
    pool: DbPool,
    config: EngineConfig,
    events: EventBus,
}

impl Engine {
    /// Create an engine over an existing pool.
    pub fn new(pool: DbPool, config: EngineConfig) -> Self {
        Self {
            pool,
            config,
            events: EventBus::default(),
        }
    }

    /// The pool this engine runs against.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Subscribe to the engine's observability events.
    pub fn subscribe_events(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }
}

/// Current UTC calendar day: the "current date" used for defaulting,
/// future-date validation, and stats `last_update` stamps.
pub(crate) fn today() -> Date {
    Utc::now().date_naive()
}
