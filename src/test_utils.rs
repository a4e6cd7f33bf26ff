//! Shared test doubles for the discount pipeline
//!
//! Wrappers around the in-memory collaborators that journal every call (to
//! assert on call order) or inject failures.

use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::core::traits::{EventPublisher, RecordGateway};
use crate::store::{InMemoryPublisher, InMemoryRecordStore};
use crate::types::{DiscountError, Record, RecordId};

/// Build a record with no offer applied
pub fn record(id: RecordId, price: &str) -> Record {
    Record::new(
        id,
        format!("Product {}", id),
        "general",
        Decimal::from_str(price).unwrap(),
    )
}

/// Collaborator call, as seen by the journaling doubles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch(RecordId),
    Save(RecordId),
    SaveAll(usize),
    FindAll,
    Publish(String),
}

/// Shared, ordered log of collaborator calls
pub type Journal = Arc<Mutex<Vec<Call>>>;

/// Record store that journals every call before delegating
pub struct JournalingGateway {
    pub inner: InMemoryRecordStore,
    pub journal: Journal,
}

impl JournalingGateway {
    pub fn new(records: impl IntoIterator<Item = Record>, journal: Journal) -> Self {
        Self {
            inner: InMemoryRecordStore::with_records(records),
            journal,
        }
    }
}

impl RecordGateway for JournalingGateway {
    fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DiscountError> {
        self.journal.lock().push(Call::Fetch(id));
        self.inner.find_by_id(id)
    }

    fn save(&self, record: Record) -> Result<Record, DiscountError> {
        self.journal.lock().push(Call::Save(record.id));
        self.inner.save(record)
    }

    fn save_all(&self, records: Vec<Record>) -> Result<Vec<Record>, DiscountError> {
        self.journal.lock().push(Call::SaveAll(records.len()));
        self.inner.save_all(records)
    }

    fn find_all(&self) -> Result<Vec<Record>, DiscountError> {
        self.journal.lock().push(Call::FindAll);
        self.inner.find_all()
    }
}

/// Publisher that journals every call before delegating
pub struct JournalingPublisher {
    pub inner: InMemoryPublisher,
    pub journal: Journal,
}

impl JournalingPublisher {
    pub fn new(journal: Journal) -> Self {
        Self {
            inner: InMemoryPublisher::new(),
            journal,
        }
    }
}

impl EventPublisher for JournalingPublisher {
    fn publish(&self, channel: &str, payload: &[u8]) -> Result<(), DiscountError> {
        self.journal.lock().push(Call::Publish(channel.to_string()));
        self.inner.publish(channel, payload)
    }
}

/// Publisher whose broker is always unreachable
pub struct FailingPublisher;

impl EventPublisher for FailingPublisher {
    fn publish(&self, _channel: &str, _payload: &[u8]) -> Result<(), DiscountError> {
        Err(DiscountError::transport("publish", "broker unreachable"))
    }
}

/// Record store whose writes always fail
pub struct ReadOnlyGateway {
    pub inner: InMemoryRecordStore,
}

impl RecordGateway for ReadOnlyGateway {
    fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DiscountError> {
        self.inner.find_by_id(id)
    }

    fn save(&self, _record: Record) -> Result<Record, DiscountError> {
        Err(DiscountError::transport("save", "store is read-only"))
    }

    fn save_all(&self, _records: Vec<Record>) -> Result<Vec<Record>, DiscountError> {
        Err(DiscountError::transport("save_all", "store is read-only"))
    }

    fn find_all(&self) -> Result<Vec<Record>, DiscountError> {
        self.inner.find_all()
    }
}

/// Record store that panics when a given id is fetched
pub struct PanickingGateway {
    pub inner: InMemoryRecordStore,
    pub poison: RecordId,
}

impl RecordGateway for PanickingGateway {
    fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DiscountError> {
        if id == self.poison {
            panic!("poisoned record {}", id);
        }
        self.inner.find_by_id(id)
    }

    fn save(&self, record: Record) -> Result<Record, DiscountError> {
        self.inner.save(record)
    }

    fn save_all(&self, records: Vec<Record>) -> Result<Vec<Record>, DiscountError> {
        self.inner.save_all(records)
    }

    fn find_all(&self) -> Result<Vec<Record>, DiscountError> {
        self.inner.find_all()
    }
}
