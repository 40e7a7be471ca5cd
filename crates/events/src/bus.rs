//! In-process event bus backed by a `tokio::sync::broadcast` channel.

use chrono::{DateTime, Utc};
use encuesta_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// A domain event emitted by the engine.
///
/// Constructed via [`DomainEvent::new`] and enriched with the builder
/// methods [`with_subject`](DomainEvent::with_subject),
/// [`with_actor`](DomainEvent::with_actor), and
/// [`with_payload`](DomainEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Dot-separated event name, e.g. `"vote.recorded"`.
    pub event_type: String,

    /// Entity kind the event is about (e.g. `"survey"`, `"vote"`).
    pub subject_type: Option<String>,

    /// Database id of the subject entity.
    pub subject_id: Option<DbId>,

    /// Id of the user whose action triggered the event, when there is one.
    pub actor_user_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent {
    /// Create an event carrying only its `event_type`.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            subject_type: None,
            subject_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the subject entity.
    pub fn with_subject(mut self, subject_type: impl Into<String>, subject_id: DbId) -> Self {
        self.subject_type = Some(subject_type.into());
        self.subject_id = Some(subject_id);
        self
    }

    /// Attach the acting user.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Set the JSON payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out bus for [`DomainEvent`]s.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers independently
/// receive every published event. With no subscribers, publishing is a no-op;
/// the engine's behavior never depends on someone listening.
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer fills, the oldest un-consumed events are dropped and
    /// slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Open a new subscription receiving every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Number of currently active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
