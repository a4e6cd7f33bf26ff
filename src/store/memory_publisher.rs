//! In-memory event publisher
//!
//! Captures every published notification in publish order. Used by the CLI
//! when no event log is requested, and by tests that assert on what was sent.

use crate::core::traits::EventPublisher;
use crate::types::DiscountError;
use parking_lot::Mutex;

/// A captured notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    /// Channel the payload was sent to
    pub channel: String,
    /// Serialized payload
    pub payload: Vec<u8>,
}

impl PublishedEvent {
    /// Decode the payload as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, DiscountError> {
        Ok(serde_json::from_slice(&self.payload)?)
    }
}

/// Publisher that keeps every event in memory
#[derive(Debug, Default)]
pub struct InMemoryPublisher {
    events: Mutex<Vec<PublishedEvent>>,
}

impl InMemoryPublisher {
    /// Create an empty publisher
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events published so far
    pub fn events(&self) -> Vec<PublishedEvent> {
        self.events.lock().clone()
    }

    /// Number of events published so far
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been published
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventPublisher for InMemoryPublisher {
    fn publish(&self, channel: &str, payload: &[u8]) -> Result<(), DiscountError> {
        self.events.lock().push(PublishedEvent {
            channel: channel.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}
