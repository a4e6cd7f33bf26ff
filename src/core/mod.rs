//! Core business logic module
//!
//! This module contains the discount pipeline components:
//! - `traits` - Record store and event publisher abstractions
//! - `calculator` - Price to discount tier mapping
//! - `partitioner` - Splitting id lists into fixed-size chunks
//! - `processor` - Per-record fetch/compute/save/publish pipeline
//! - `report` - Per-chunk and per-batch outcomes
//! - `reset` - Bulk discount reset

pub mod calculator;
pub mod partitioner;
pub mod processor;
pub mod report;
pub mod reset;
pub mod traits;

pub use calculator::{tier, DiscountTier};
pub use partitioner::partition;
pub use processor::{ProcessOutcome, RecordProcessor};
pub use report::{BatchReport, ChunkOutcome, RecordFailure};
pub use reset::{reset_all, ResetStatus};
pub use traits::{EventPublisher, RecordGateway};
