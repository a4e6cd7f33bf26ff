//! Concurrent batch execution over the worker pool
//!
//! This module provides the `BatchExecutor` struct, which partitions an id
//! list into chunks, runs one task per chunk on the shared [`WorkerPool`] and
//! joins them before returning.
//!
//! # Architecture
//!
//! ```text
//! BatchExecutor
//!     ├── RecordProcessor   (per-record pipeline, cloned into each task)
//!     ├── Arc<WorkerPool>   (shared, bounded worker pool)
//!     └── batch_size / failure_policy
//! ```
//!
//! # Ordering
//!
//! Chunks are dispatched in partition order, one per free worker. Within a
//! chunk ids are processed strictly in order; across chunks there is no
//! ordering, and writes from different chunks may interleave.
//!
//! # Failure Propagation
//!
//! - `Collect`: every chunk runs to completion and the returned
//!   [`BatchReport`] lists successes and failures side by side.
//! - `Abort`: the first failed chunk the join observes is raised as an error.
//!   Chunks already running keep going in the background and their results
//!   are not reported. A chunk with a failed record raises a shared flag before
//!   it gives its worker back, and no further chunk is dispatched once the flag
//!   is set. A chunk that panics does not raise the flag, so one more chunk may
//!   start before the panic is observed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use tracing::{info, warn};

use super::pool::WorkerPool;
use crate::config::{EngineConfig, FailurePolicy};
use crate::core::partitioner::partition;
use crate::core::processor::RecordProcessor;
use crate::core::report::{BatchReport, ChunkOutcome};
use crate::types::{DiscountError, RecordId};

/// Runs chunks of record ids concurrently and joins them
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    /// Per-record pipeline
    processor: RecordProcessor,

    /// Shared worker pool
    pool: Arc<WorkerPool>,

    /// Number of ids per chunk
    batch_size: usize,

    /// How a failed record affects the batch
    failure_policy: FailurePolicy,
}

impl BatchExecutor {
    /// Create a new BatchExecutor
    ///
    /// # Arguments
    ///
    /// * `processor` - Pipeline run for every id
    /// * `pool` - Worker pool shared with other executors
    /// * `config` - Supplies the batch size and failure policy
    pub fn new(processor: RecordProcessor, pool: Arc<WorkerPool>, config: &EngineConfig) -> Self {
        Self {
            processor,
            pool,
            batch_size: config.batch_size,
            failure_policy: config.failure_policy,
        }
    }

    /// Worker pool used by this executor
    pub fn pool(&self) -> &Arc<WorkerPool> {
        &self.pool
    }

    /// Process every id and block until the batch is done
    ///
    /// # Returns
    ///
    /// * `Ok(BatchReport)` once every chunk has finished. Under
    ///   `FailurePolicy::Collect` the report may contain failures.
    /// * `Err(DiscountError)` under `FailurePolicy::Abort` for the first failed
    ///   chunk observed, or `PoolShutdown` if the pool is shut down.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async execution context.
    pub fn execute(&self, ids: &[RecordId]) -> Result<BatchReport, DiscountError> {
        if self.pool.is_shutdown() {
            return Err(DiscountError::PoolShutdown);
        }

        let chunks = partition(ids, self.batch_size);
        info!(
            ids = ids.len(),
            chunks = chunks.len(),
            batch_size = self.batch_size,
            pool_size = self.pool.size(),
            "Executing batch"
        );

        let report = self.pool.block_on(self.dispatch(chunks))?;

        info!(
            processed = report.processed_ids().len(),
            discounted = report.discounted_ids().len(),
            failed = report.failures().len(),
            "Batch complete"
        );
        Ok(report)
    }

    /// Dispatch one task per chunk and join them all
    async fn dispatch(&self, chunks: Vec<Vec<RecordId>>) -> Result<BatchReport, DiscountError> {
        let mut running = FuturesUnordered::new();
        let mut report = BatchReport::new();
        let failed = Arc::new(AtomicBool::new(false));

        for (index, chunk) in chunks.into_iter().enumerate() {
            let permit = self.pool.acquire().await?;
            if failed.load(Ordering::SeqCst) {
                break;
            }

            // Fold in whatever finished while waiting for a worker
            while let Some(Some(outcome)) = running.next().now_or_never() {
                self.observe(&mut report, outcome)?;
            }

            let processor = self.processor.clone();
            let policy = self.failure_policy;
            let ids = chunk.clone();
            let failed = Arc::clone(&failed);

            let task = self.pool.spawn(async move {
                let _permit = permit;
                let outcome = processor.process_chunk(index, chunk, policy);
                if policy == FailurePolicy::Abort && !outcome.is_success() {
                    failed.store(true, Ordering::SeqCst);
                }
                outcome
            });

            running.push(task.map(move |joined| {
                joined.unwrap_or_else(|e| {
                    ChunkOutcome::abandoned(index, ids, DiscountError::worker_failed(index, e))
                })
            }));
        }

        while let Some(outcome) = running.next().await {
            self.observe(&mut report, outcome)?;
        }

        Ok(report)
    }

    /// Record a finished chunk, raising its error under `Abort`
    fn observe(
        &self,
        report: &mut BatchReport,
        outcome: ChunkOutcome,
    ) -> Result<(), DiscountError> {
        if let Some(error) = outcome.first_error() {
            warn!(
                chunk = outcome.index,
                failed = outcome.failures.len(),
                skipped = outcome.skipped.len(),
                %error,
                "Chunk finished with failures"
            );

            if self.failure_policy == FailurePolicy::Abort {
                return Err(error.clone());
            }
        }

        report.record(outcome);
        Ok(())
    }
}
