//! Per-chunk and per-batch outcome reporting
//!
//! Every chunk task produces a [`ChunkOutcome`]. The join barrier folds them
//! into a [`BatchReport`], so the caller can tell which ids were processed,
//! which failed and why, and which were never attempted.

use crate::types::{DiscountError, RecordId};

/// A record that could not be processed
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    /// Id of the record
    pub id: RecordId,
    /// Why processing failed
    pub error: DiscountError,
}

/// Result of running one chunk
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChunkOutcome {
    /// Position of the chunk in partition order
    pub index: usize,

    /// Ids that went through the pipeline without error (discounted or not)
    pub processed: Vec<RecordId>,

    /// Subset of `processed` that had a discount persisted and published
    pub discounted: Vec<RecordId>,

    /// Ids whose processing failed, in processing order
    pub failures: Vec<RecordFailure>,

    /// Ids never attempted because the chunk stopped early
    pub skipped: Vec<RecordId>,

    /// Set when the task itself died (panic or cancellation)
    pub worker_error: Option<DiscountError>,
}

impl ChunkOutcome {
    /// Create an empty outcome for the chunk at `index`
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    /// Outcome for a chunk whose task terminated abnormally
    ///
    /// Whatever the task did before dying is unknown, so every id is reported
    /// as skipped.
    pub fn abandoned(index: usize, ids: Vec<RecordId>, error: DiscountError) -> Self {
        Self {
            index,
            skipped: ids,
            worker_error: Some(error),
            ..Self::default()
        }
    }

    /// Whether every id in the chunk was processed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.worker_error.is_none()
    }

    /// First error raised in this chunk
    pub fn first_error(&self) -> Option<&DiscountError> {
        self.failures
            .first()
            .map(|failure| &failure.error)
            .or(self.worker_error.as_ref())
    }
}

/// Aggregated result of a batch execution
///
/// Chunk outcomes are kept in partition order regardless of the order in
/// which the chunks finished.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    chunks: Vec<ChunkOutcome>,
}

impl BatchReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finished chunk to the report
    pub fn record(&mut self, outcome: ChunkOutcome) {
        let position = self
            .chunks
            .partition_point(|existing| existing.index < outcome.index);
        self.chunks.insert(position, outcome);
    }

    /// Chunk outcomes in partition order
    pub fn chunks(&self) -> &[ChunkOutcome] {
        &self.chunks
    }

    /// Ids processed without error, in partition order
    pub fn processed_ids(&self) -> Vec<RecordId> {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.processed.iter().copied())
            .collect()
    }

    /// Ids that had a discount persisted and published
    pub fn discounted_ids(&self) -> Vec<RecordId> {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.discounted.iter().copied())
            .collect()
    }

    /// Ids that were never attempted
    pub fn skipped_ids(&self) -> Vec<RecordId> {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.skipped.iter().copied())
            .collect()
    }

    /// Every record failure, in partition order
    pub fn failures(&self) -> Vec<&RecordFailure> {
        self.chunks
            .iter()
            .flat_map(|chunk| chunk.failures.iter())
            .collect()
    }

    /// Whether every chunk succeeded
    pub fn is_success(&self) -> bool {
        self.chunks.iter().all(ChunkOutcome::is_success)
    }

    /// First error in partition order
    pub fn first_error(&self) -> Option<&DiscountError> {
        self.chunks.iter().find_map(ChunkOutcome::first_error)
    }

    /// Turn a report with failures into its first error
    pub fn into_result(self) -> Result<Self, DiscountError> {
        match self.first_error() {
            Some(error) => Err(error.clone()),
            None => Ok(self),
        }
    }
}
