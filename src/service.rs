//! Entry points for discount processing
//!
//! `DiscountService` ties a record store, an event publisher and a processing
//! strategy together and exposes the operations callers trigger: batch
//! processing of explicit ids, resetting every record, and listing ids.

use std::fmt;
use std::sync::Arc;

use crate::cli::StrategyType;
use crate::config::EngineConfig;
use crate::core::processor::RecordProcessor;
use crate::core::report::BatchReport;
use crate::core::reset::{reset_all, ResetStatus};
use crate::core::traits::{EventPublisher, RecordGateway};
use crate::strategy::{create_strategy, ProcessingStrategy};
use crate::types::{DiscountError, RecordId};

/// Discount processing entry points
pub struct DiscountService {
    processor: RecordProcessor,
    strategy: Box<dyn ProcessingStrategy>,
}

impl fmt::Debug for DiscountService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscountService")
            .field("processor", &self.processor)
            .finish_non_exhaustive()
    }
}

impl DiscountService {
    /// Create a service
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the batched strategy cannot start its worker pool.
    pub fn new(
        gateway: Arc<dyn RecordGateway>,
        publisher: Arc<dyn EventPublisher>,
        strategy_type: StrategyType,
        config: &EngineConfig,
    ) -> Result<Self, DiscountError> {
        let processor = RecordProcessor::new(gateway, publisher, config.channel.as_str());
        let strategy = create_strategy(strategy_type, processor.clone(), config)?;
        Ok(Self {
            processor,
            strategy,
        })
    }

    /// Recompute discounts for the given ids
    pub fn process(&self, ids: &[RecordId]) -> Result<BatchReport, DiscountError> {
        self.strategy.execute(ids)
    }

    /// Clear the discount on every record
    pub fn reset(&self) -> ResetStatus {
        reset_all(&self.processor)
    }

    /// Ids of every record in the store, ascending
    pub fn record_ids(&self) -> Result<Vec<RecordId>, DiscountError> {
        Ok(self
            .processor
            .gateway()
            .find_all()?
            .into_iter()
            .map(|record| record.id)
            .collect())
    }

    /// Release the worker pool, if any
    pub fn shutdown(&self) {
        self.strategy.shutdown();
    }
}
