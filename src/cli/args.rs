use crate::config::{
    EngineConfig, FailurePolicy, DEFAULT_BATCH_SIZE, DEFAULT_CHANNEL, DEFAULT_POOL_SIZE,
};
use crate::types::RecordId;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Recompute catalog discounts and publish change notifications
#[derive(Parser, Debug)]
#[command(name = "discount-engine")]
#[command(about = "Recompute catalog discounts and publish change notifications", long_about = None)]
pub struct CliArgs {
    /// Catalog CSV file the records are loaded from
    #[arg(
        short = 'c',
        long = "catalog",
        value_name = "CATALOG",
        help = "Path to the catalog CSV file"
    )]
    pub catalog: PathBuf,

    /// Execution strategy used for processing
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "batched",
        help = "Execution strategy: 'sequential' on the calling thread or 'batched' over the worker pool"
    )]
    pub strategy: StrategyType,

    /// Number of ids per chunk (batched mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of ids per chunk (default: 50)"
    )]
    pub batch_size: Option<usize>,

    /// Number of concurrently executing workers (batched mode only)
    #[arg(
        long = "pool-size",
        value_name = "COUNT",
        help = "Number of chunks processed concurrently (default: 6)"
    )]
    pub pool_size: Option<usize>,

    /// Channel change notifications are published to
    #[arg(
        long = "topic",
        value_name = "TOPIC",
        env = "DISCOUNT_UPDATE_TOPIC",
        help = "Notification channel (default: product-discount-update)"
    )]
    pub topic: Option<String>,

    /// How a failed record affects the rest of the batch
    #[arg(
        long = "failure-policy",
        value_name = "POLICY",
        default_value = "collect",
        help = "'collect' reports failures next to successes, 'abort' stops at the first failed chunk"
    )]
    pub failure_policy: FailurePolicy,

    /// Append published notifications to this file as JSON lines
    #[arg(long = "events", value_name = "PATH", help = "Write notifications to a JSON lines file")]
    pub events: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available execution strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sequential,
    Batched,
}

/// Operation to run against the catalog
#[derive(Clone, Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Recompute discounts for the given ids, or for every record when none are given
    Process {
        #[arg(value_name = "ID")]
        ids: Vec<RecordId>,
    },
    /// Clear the discount on every record
    Reset,
    /// List every record id
    Ids,
}

impl CliArgs {
    /// Create an EngineConfig from CLI arguments
    ///
    /// Missing values fall back to defaults. Zero sizes are replaced by their
    /// defaults with a warning.
    pub fn to_engine_config(&self) -> EngineConfig {
        EngineConfig::new(
            self.topic.as_deref().unwrap_or(DEFAULT_CHANNEL),
            self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            self.pool_size.unwrap_or(DEFAULT_POOL_SIZE),
            self.failure_policy,
        )
    }
}
