//! Batched processing strategy
//!
//! This module provides the concurrent implementation of the
//! ProcessingStrategy trait. Ids are partitioned into chunks and the chunks
//! run in parallel on a bounded worker pool.
//!
//! # Architecture
//!
//! ```text
//! BatchedStrategy
//!     └── BatchExecutor
//!         ├── RecordProcessor   (per-record pipeline)
//!         └── Arc<WorkerPool>   (pool_size worker threads)
//! ```

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::core::processor::RecordProcessor;
use crate::core::report::BatchReport;
use crate::executor::{BatchExecutor, WorkerPool};
use crate::strategy::ProcessingStrategy;
use crate::types::{DiscountError, RecordId};

/// Batched processing strategy
///
/// Owns a worker pool sized from the configuration. The pool lives until
/// [`ProcessingStrategy::shutdown`] is called or the strategy is dropped.
#[derive(Debug, Clone)]
pub struct BatchedStrategy {
    executor: BatchExecutor,
}

impl BatchedStrategy {
    /// Create a strategy with its own worker pool of `config.pool_size` workers
    pub fn new(processor: RecordProcessor, config: &EngineConfig) -> Result<Self, DiscountError> {
        let pool = Arc::new(WorkerPool::new(config.pool_size)?);
        Ok(Self::with_pool(processor, pool, config))
    }

    /// Create a strategy on an existing worker pool
    pub fn with_pool(
        processor: RecordProcessor,
        pool: Arc<WorkerPool>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            executor: BatchExecutor::new(processor, pool, config),
        }
    }
}

impl ProcessingStrategy for BatchedStrategy {
    fn execute(&self, ids: &[RecordId]) -> Result<BatchReport, DiscountError> {
        self.executor.execute(ids)
    }

    fn shutdown(&self) {
        self.executor.pool().shutdown();
    }
}
