//! Domain events emitted by knowledge base operations.
//!
//! Events are the programmatic counterpart of the confirmation toasts the
//! dashboard shows after each mutation. They are published on the session
//! event channel and consumed by the CLI and tests.

pub mod knowledge;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use knowledge::KnowledgeEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: KnowledgeEvent,
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: KnowledgeEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

impl From<KnowledgeEvent> for DomainEvent {
    fn from(payload: KnowledgeEvent) -> Self {
        Self::new(payload)
    }
}
