//! Bulk discount reset
//!
//! Clears the discount from every record in the store, saves them all back in
//! one call and publishes a single snapshot of the reset records. Runs on the
//! caller's thread.
//!
//! Failures are not propagated: they are turned into a [`ResetStatus`] that
//! tells a data-conversion failure apart from any other failure.

use std::fmt;

use tracing::{error, info};

use crate::core::processor::RecordProcessor;
use crate::types::{DiscountError, Record};

/// Summary of a reset run
#[derive(Debug, Clone, PartialEq)]
pub enum ResetStatus {
    /// Every record was reset, saved and published
    Success {
        /// Number of records reset
        count: usize,
    },
    /// The reset records could not be serialized for publishing
    DataConversionFailure {
        /// Underlying cause
        error: DiscountError,
    },
    /// Any other failure (store scan, bulk save, publish)
    Failure {
        /// Underlying cause
        error: DiscountError,
    },
}

impl ResetStatus {
    /// Whether the reset completed
    pub fn is_success(&self) -> bool {
        matches!(self, ResetStatus::Success { .. })
    }
}

impl fmt::Display for ResetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetStatus::Success { .. } => write!(f, "Products have been reset successfully."),
            ResetStatus::DataConversionFailure { .. } => {
                write!(f, "Failed to process product data.")
            }
            ResetStatus::Failure { .. } => {
                write!(f, "An error occurred while resetting products.")
            }
        }
    }
}

/// Reset every record and publish the reset snapshot
///
/// Uses the processor's record store, publisher and channel.
pub fn reset_all(processor: &RecordProcessor) -> ResetStatus {
    match try_reset_all(processor) {
        Ok(count) => {
            info!(count, "Reset discounts on all records");
            ResetStatus::Success { count }
        }
        Err(error @ DiscountError::Serialization { .. }) => {
            error!(%error, "Reset snapshot could not be serialized");
            ResetStatus::DataConversionFailure { error }
        }
        Err(error) => {
            error!(%error, "Reset failed");
            ResetStatus::Failure { error }
        }
    }
}

fn try_reset_all(processor: &RecordProcessor) -> Result<usize, DiscountError> {
    let gateway = processor.gateway();

    let mut records = gateway.find_all()?;
    records.iter_mut().for_each(Record::clear_discount);

    let saved = gateway.save_all(records)?;

    let payload = serde_json::to_vec(&saved)
        .map_err(|e| DiscountError::serialization("reset records", e))?;
    processor
        .publisher()
        .publish(processor.channel(), &payload)?;

    Ok(saved.len())
}
