//! Catalog Discount Engine Library
//! # Overview
//!
//! This library recomputes tiered discounts for catalog records in parallel
//! batches and publishes a change notification for every record whose
//! discount changed.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Record, DiscountError)
//! - [`config`] - Engine configuration and failure policy
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::calculator`] - Price to discount tier mapping
//!   - [`core::partitioner`] - Fixed-size chunking of id lists
//!   - [`core::processor`] - Per-record fetch/compute/save/publish pipeline
//!   - [`core::reset`] - Bulk discount reset
//! - [`executor`] - Bounded worker pool and batch executor
//! - [`strategy`] - Sequential and batched execution strategies
//! - [`store`] - In-memory record store and event publisher
//! - [`io`] - Catalog CSV input/output and the JSON lines event log
//! - [`service`] - Entry points tying everything together
//!
//! # Discount Tiers
//!
//! - price above 1000: 10% off
//! - price above 800: 5% off
//! - anything else: no discount, the record is left untouched
//!
//! # Record State
//!
//! Each record carries:
//! - `price`: list price
//! - `offer_applied`: whether a discount is in effect
//! - `discount_percentage`: 0, 5 or 10
//! - `price_after_discount`: price reduced by the percentage

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod executor;
pub mod io;
pub mod logging;
pub mod service;
pub mod store;
pub mod strategy;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::{EngineConfig, FailurePolicy};
pub use core::{
    BatchReport, ChunkOutcome, DiscountTier, EventPublisher, RecordFailure, RecordGateway,
    RecordProcessor, ResetStatus,
};
pub use executor::{BatchExecutor, WorkerPool};
pub use io::{load_catalog, write_catalog_csv, JsonLinesPublisher};
pub use service::DiscountService;
pub use store::{InMemoryPublisher, InMemoryRecordStore};
pub use types::{DiscountError, Record, RecordId};
