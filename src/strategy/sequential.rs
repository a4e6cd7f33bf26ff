//! Sequential processing strategy
//!
//! Runs the record pipeline over every id on the caller's thread, as a single
//! chunk, in input order. There is no worker pool and no partitioning.

use crate::config::{EngineConfig, FailurePolicy};
use crate::core::processor::RecordProcessor;
use crate::core::report::BatchReport;
use crate::strategy::ProcessingStrategy;
use crate::types::{DiscountError, RecordId};

/// Sequential processing strategy
#[derive(Debug, Clone)]
pub struct SequentialStrategy {
    processor: RecordProcessor,
    failure_policy: FailurePolicy,
}

impl SequentialStrategy {
    /// Create a new SequentialStrategy
    ///
    /// Only the failure policy is taken from `config`.
    pub fn new(processor: RecordProcessor, config: &EngineConfig) -> Self {
        Self {
            processor,
            failure_policy: config.failure_policy,
        }
    }
}

impl ProcessingStrategy for SequentialStrategy {
    fn execute(&self, ids: &[RecordId]) -> Result<BatchReport, DiscountError> {
        let mut report = BatchReport::new();
        if ids.is_empty() {
            return Ok(report);
        }

        let outcome = self
            .processor
            .process_chunk(0, ids.to_vec(), self.failure_policy);

        if self.failure_policy == FailurePolicy::Abort {
            if let Some(error) = outcome.first_error() {
                return Err(error.clone());
            }
        }

        report.record(outcome);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{InMemoryPublisher, InMemoryRecordStore};
    use crate::test_utils::record;
    use std::sync::Arc;

    fn strategy(policy: FailurePolicy) -> (Arc<InMemoryRecordStore>, SequentialStrategy) {
        let store = Arc::new(InMemoryRecordStore::with_records([
            record(1, "1500"),
            record(3, "1500"),
        ]));
        let processor =
            RecordProcessor::new(store.clone(), Arc::new(InMemoryPublisher::new()), "updates");
        let config = EngineConfig::new("updates", 50, 6, policy);
        (store, SequentialStrategy::new(processor, &config))
    }

    #[test]
    fn test_empty_input_yields_empty_report() {
        let (_, strategy) = strategy(FailurePolicy::Collect);

        let report = strategy.execute(&[]).unwrap();

        assert!(report.chunks().is_empty());
    }

    #[test]
    fn test_abort_stops_at_first_missing_id() {
        let (store, strategy) = strategy(FailurePolicy::Abort);

        let result = strategy.execute(&[1, 2, 3]);

        assert_eq!(result.unwrap_err(), DiscountError::not_found(2));
        assert!(store.get(1).unwrap().offer_applied);
        assert!(!store.get(3).unwrap().offer_applied);
    }

    #[test]
    fn test_collect_continues_past_missing_id() {
        let (store, strategy) = strategy(FailurePolicy::Collect);

        let report = strategy.execute(&[1, 2, 3]).unwrap();

        assert_eq!(report.processed_ids(), vec![1, 3]);
        assert_eq!(report.failures()[0].id, 2);
        assert!(store.get(3).unwrap().offer_applied);
    }
}
