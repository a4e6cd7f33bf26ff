//! Per-record discount pipeline
//!
//! This module provides the `RecordProcessor` struct, which runs the
//! fetch → compute → conditional persist → publish sequence for one record,
//! and runs that sequence in order over a whole chunk of ids.
//!
//! # Pipeline
//!
//! 1. Fetch the record by id (a missing record is a `NotFound` failure)
//! 2. Compute the discount tier from the current price and apply it
//! 3. If an offer now applies: save the record, then publish it
//! 4. Otherwise: leave the stored record untouched and publish nothing
//!
//! # Thread Safety
//!
//! The processor is cloneable and can be shared across worker tasks. Every
//! call fetches its own copy of the record, so no record value is ever shared
//! between tasks.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::FailurePolicy;
use crate::core::calculator::{self, DiscountTier};
use crate::core::report::{ChunkOutcome, RecordFailure};
use crate::core::traits::{EventPublisher, RecordGateway};
use crate::types::{DiscountError, Record, RecordId};

/// Effect of processing a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// A discount applies; the record was saved and published
    Discounted(DiscountTier),
    /// No discount applies; nothing was written or published
    Unchanged,
}

/// Runs the discount pipeline against a record store and an event publisher
#[derive(Clone)]
pub struct RecordProcessor {
    /// Record store shared by every worker
    gateway: Arc<dyn RecordGateway>,

    /// Broker client shared by every worker
    publisher: Arc<dyn EventPublisher>,

    /// Channel that change notifications are published to
    channel: Arc<str>,
}

impl fmt::Debug for RecordProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordProcessor")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

impl RecordProcessor {
    /// Create a new RecordProcessor
    ///
    /// # Arguments
    ///
    /// * `gateway` - Record store to fetch from and save to
    /// * `publisher` - Broker client that receives change notifications
    /// * `channel` - Channel name used for every notification
    pub fn new(
        gateway: Arc<dyn RecordGateway>,
        publisher: Arc<dyn EventPublisher>,
        channel: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            gateway,
            publisher,
            channel: channel.into(),
        }
    }

    /// Channel that notifications are published to
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Record store used by this processor
    pub fn gateway(&self) -> &Arc<dyn RecordGateway> {
        &self.gateway
    }

    /// Broker client used by this processor
    pub fn publisher(&self) -> &Arc<dyn EventPublisher> {
        &self.publisher
    }

    /// Recompute the discount for one record
    ///
    /// # Errors
    ///
    /// - `NotFound` if no record has this id
    /// - `Serialization` if the updated record cannot be encoded
    /// - `Transport` if the store or the broker fails
    ///
    /// When the save succeeds but the publish fails, the saved record stays
    /// saved.
    pub fn process(&self, id: RecordId) -> Result<ProcessOutcome, DiscountError> {
        let mut record = self
            .gateway
            .find_by_id(id)?
            .ok_or_else(|| DiscountError::not_found(id))?;

        let tier = calculator::tier(record.price);
        record.apply_tier(tier);

        if !record.offer_applied {
            debug!(id, price = %record.price, "No discount applies");
            return Ok(ProcessOutcome::Unchanged);
        }

        let saved = self.gateway.save(record)?;
        self.publish_record(&saved)?;

        debug!(
            id,
            discount = %saved.discount_percentage,
            price_after_discount = %saved.price_after_discount,
            "Discount applied"
        );
        Ok(ProcessOutcome::Discounted(tier))
    }

    /// Process a chunk of ids sequentially, in order
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the chunk in partition order
    /// * `ids` - Ids to process
    /// * `policy` - Whether to stop at the first failure or attempt every id
    ///
    /// # Returns
    ///
    /// A `ChunkOutcome` listing processed, discounted, failed and skipped ids.
    pub fn process_chunk(
        &self,
        index: usize,
        ids: Vec<RecordId>,
        policy: FailurePolicy,
    ) -> ChunkOutcome {
        let worker = std::thread::current();
        info!(
            chunk = index,
            size = ids.len(),
            thread = worker.name().unwrap_or("unnamed"),
            "Processing chunk"
        );

        let mut outcome = ChunkOutcome::new(index);
        let mut remaining = ids.into_iter();

        while let Some(id) = remaining.next() {
            match self.process(id) {
                Ok(ProcessOutcome::Discounted(_)) => {
                    outcome.processed.push(id);
                    outcome.discounted.push(id);
                }
                Ok(ProcessOutcome::Unchanged) => outcome.processed.push(id),
                Err(error) => {
                    warn!(chunk = index, id, %error, "Record processing failed");
                    outcome.failures.push(RecordFailure { id, error });

                    if policy == FailurePolicy::Abort {
                        outcome.skipped.extend(remaining.by_ref());
                        break;
                    }
                }
            }
        }

        outcome
    }

    /// Serialize a single record and publish it
    fn publish_record(&self, record: &Record) -> Result<(), DiscountError> {
        let payload = serde_json::to_vec(record).map_err(|e| {
            DiscountError::serialization(&format!("record {}", record.id), e)
        })?;
        self.publisher.publish(&self.channel, &payload)
    }
}
