//! Processing strategy module for discount batches
//!
//! This module defines the Strategy pattern for running the discount pipeline
//! over a list of record ids. This allows different execution models
//! (sequential on the caller's thread, batched over the worker pool) to be
//! selected at runtime.

use crate::cli::StrategyType;
use crate::config::EngineConfig;
use crate::core::processor::RecordProcessor;
use crate::core::report::BatchReport;
use crate::types::{DiscountError, RecordId};

pub mod batched;
pub mod sequential;

pub use batched::BatchedStrategy;
pub use sequential::SequentialStrategy;

/// Processing strategy trait for discount batches
///
/// Each strategy runs the record pipeline over every id and returns once all
/// of them have been handled.
pub trait ProcessingStrategy: Send + Sync {
    /// Process every id
    ///
    /// # Returns
    ///
    /// * `Ok(BatchReport)` listing processed, discounted, failed and skipped ids
    /// * `Err(DiscountError)` when the configured failure policy aborts the run,
    ///   or when the strategy cannot run at all
    fn execute(&self, ids: &[RecordId]) -> Result<BatchReport, DiscountError>;

    /// Release any resources held by the strategy
    fn shutdown(&self) {}
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - Which execution model to use
/// * `processor` - Record pipeline shared by the strategy
/// * `config` - Batch size, pool size and failure policy
///
/// # Errors
///
/// Returns `IoError` if the batched strategy cannot start its worker pool.
pub fn create_strategy(
    strategy_type: StrategyType,
    processor: RecordProcessor,
    config: &EngineConfig,
) -> Result<Box<dyn ProcessingStrategy>, DiscountError> {
    let strategy: Box<dyn ProcessingStrategy> = match strategy_type {
        StrategyType::Sequential => Box::new(SequentialStrategy::new(processor, config)),
        StrategyType::Batched => Box::new(BatchedStrategy::new(processor, config)?),
    };
    Ok(strategy)
}
