//! Collaborator traits for record storage and event publishing
//!
//! The discount pipeline talks to its record store and its message broker only
//! through these traits, so that in-memory, file-backed or networked
//! implementations can be used interchangeably.
//!
//! Both traits are `Send + Sync`: a single instance is shared by every worker
//! in the pool and called concurrently without extra coordination.

use crate::types::{DiscountError, Record, RecordId};

/// Trait for reading and writing catalog records
///
/// Each call is an independent operation; there is no transaction spanning
/// multiple records.
pub trait RecordGateway: Send + Sync {
    /// Look a record up by id
    ///
    /// Returns `Ok(None)` when no record has this id. `Err` is reserved for
    /// infrastructure failures.
    fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, DiscountError>;

    /// Overwrite the record with the same id
    fn save(&self, record: Record) -> Result<Record, DiscountError>;

    /// Overwrite every record in the list
    fn save_all(&self, records: Vec<Record>) -> Result<Vec<Record>, DiscountError>;

    /// Get every record, ordered by id
    fn find_all(&self) -> Result<Vec<Record>, DiscountError>;
}

/// Trait for publishing change notifications
pub trait EventPublisher: Send + Sync {
    /// Send a serialized payload to a named channel
    ///
    /// No acknowledgement is awaited beyond what the implementation does
    /// synchronously.
    fn publish(&self, channel: &str, payload: &[u8]) -> Result<(), DiscountError>;
}
