//! Engine configuration
//!
//! All settings are supplied once at construction and stay fixed for the
//! lifetime of the components built from them.

use clap::ValueEnum;
use tracing::warn;

/// Default channel that change notifications are published to
pub const DEFAULT_CHANNEL: &str = "product-discount-update";

/// Default number of ids per chunk
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Default number of concurrently executing workers
pub const DEFAULT_POOL_SIZE: usize = 6;

/// How a failed record affects the rest of a batch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Attempt every id and report failures next to successes
    #[default]
    Collect,
    /// Stop a chunk at its first failure and raise the first failed chunk to the caller
    Abort,
}

/// Configuration for discount processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Channel that change notifications are published to
    pub channel: String,
    /// Number of ids per chunk
    pub batch_size: usize,
    /// Number of concurrently executing workers
    pub pool_size: usize,
    /// How failures propagate out of a batch
    pub failure_policy: FailurePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            channel: DEFAULT_CHANNEL.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            pool_size: DEFAULT_POOL_SIZE,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Create a new EngineConfig with custom values
    ///
    /// A zero batch size or pool size is replaced by its default, with a
    /// warning.
    pub fn new(
        channel: impl Into<String>,
        batch_size: usize,
        pool_size: usize,
        failure_policy: FailurePolicy,
    ) -> Self {
        let batch_size = if batch_size == 0 {
            warn!(
                batch_size,
                default = DEFAULT_BATCH_SIZE,
                "Invalid batch_size, using default"
            );
            DEFAULT_BATCH_SIZE
        } else {
            batch_size
        };

        let pool_size = if pool_size == 0 {
            warn!(
                pool_size,
                default = DEFAULT_POOL_SIZE,
                "Invalid pool_size, using default"
            );
            DEFAULT_POOL_SIZE
        } else {
            pool_size
        };

        Self {
            channel: channel.into(),
            batch_size,
            pool_size,
            failure_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();

        assert_eq!(config.channel, "product-discount-update");
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.pool_size, 6);
        assert_eq!(config.failure_policy, FailurePolicy::Collect);
    }

    #[rstest]
    #[case::custom(10, 3, 10, 3)]
    #[case::zero_batch_size(0, 3, 50, 3)]
    #[case::zero_pool_size(10, 0, 10, 6)]
    #[case::both_zero(0, 0, 50, 6)]
    fn test_new_falls_back_on_zero(
        #[case] batch_size: usize,
        #[case] pool_size: usize,
        #[case] expected_batch: usize,
        #[case] expected_pool: usize,
    ) {
        let config = EngineConfig::new("updates", batch_size, pool_size, FailurePolicy::Abort);

        assert_eq!(config.channel, "updates");
        assert_eq!(config.batch_size, expected_batch);
        assert_eq!(config.pool_size, expected_pool);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }
}
