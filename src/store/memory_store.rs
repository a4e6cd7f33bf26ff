//! Thread-safe in-memory record store
//!
//! This module provides the `InMemoryRecordStore` struct, a [`RecordGateway`]
//! backed by `DashMap` so that many workers can read and write records
//! concurrently.
//!
//! # Thread Safety
//!
//! Each save replaces a whole record under the entry lock, so a concurrent
//! reader sees either the old record or the new one, never a mix of the two.
//! There is no coordination across records.

use crate::core::traits::RecordGateway;
use crate::types::{DiscountError, Record, RecordId};
use dashmap::DashMap;

/// In-memory record store keyed by record id
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    /// Concurrent map storing records by id
    records: DashMap<RecordId, Record>,
}

impl InMemoryRecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Create a store holding the given records
    ///
    /// A later record replaces an earlier one with the same id.
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let store = Self::new();
        for record in records {
            store.records.insert(record.id, record);
        }
        store
    }

    /// Snapshot of a single record
    pub fn get(&self, id: RecordId) -> Option<Record> {
        self.records.get(&id).map(|entry| entry.value().clone())
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of every record, ordered by id
    pub fn snapshot(&self) -> Vec<Record> {
        let mut records: Vec<Record> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.id);
        records
    }
}

impl RecordGateway for InMemoryRecordStore {
    fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DiscountError> {
        Ok(self.get(id))
    }

    fn save(&self, record: Record) -> Result<Record, DiscountError> {
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    fn save_all(&self, records: Vec<Record>) -> Result<Vec<Record>, DiscountError> {
        for record in &records {
            self.records.insert(record.id, record.clone());
        }
        Ok(records)
    }

    fn find_all(&self) -> Result<Vec<Record>, DiscountError> {
        Ok(self.snapshot())
    }
}
