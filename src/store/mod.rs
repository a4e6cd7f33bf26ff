//! In-memory collaborators
//!
//! Thread-safe implementations of the record store and event publisher
//! traits, used by the CLI and throughout the tests:
//!
//! - **InMemoryRecordStore**: DashMap-backed [`RecordGateway`](crate::core::RecordGateway)
//! - **InMemoryPublisher**: ordered capture of published events

pub mod memory_publisher;
pub mod memory_store;

pub use memory_publisher::{InMemoryPublisher, PublishedEvent};
pub use memory_store::InMemoryRecordStore;
