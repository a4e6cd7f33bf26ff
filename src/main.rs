//! Catalog Discount Engine CLI
//!
//! Command-line interface for recomputing catalog discounts from a CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --catalog catalog.csv process > updated.csv
//! cargo run -- --catalog catalog.csv process 1 2 3 > updated.csv
//! cargo run -- --strategy sequential --catalog catalog.csv process > updated.csv
//! cargo run -- --batch-size 20 --pool-size 4 --events events.jsonl --catalog catalog.csv process
//! cargo run -- --catalog catalog.csv reset > reset.csv
//! cargo run -- --catalog catalog.csv ids
//! ```
//!
//! The program loads the catalog into memory, runs the selected command, and
//! writes the resulting catalog to stdout. Notifications go to the `--events`
//! file when one is given. Logs and status messages go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unreadable catalog, failed records, failed reset, etc.)

use std::io::{self, Write};
use std::process;
use std::sync::Arc;

use catalog_discount_engine::cli::{self, CliArgs, Command};
use catalog_discount_engine::core::EventPublisher;
use catalog_discount_engine::types::DiscountError;
use catalog_discount_engine::{
    load_catalog, logging, write_catalog_csv, DiscountService, InMemoryPublisher,
    JsonLinesPublisher, ResetStatus,
};
use tracing::{info, warn};

fn main() {
    // Parse command-line arguments using clap
    let args = cli::parse_args();
    logging::init_logging();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<(), DiscountError> {
    let config = args.to_engine_config();
    let store = Arc::new(load_catalog(&args.catalog)?);

    let event_log = match &args.events {
        Some(path) => Some(Arc::new(JsonLinesPublisher::create(path)?)),
        None => None,
    };
    let publisher: Arc<dyn EventPublisher> = match &event_log {
        Some(log) => log.clone(),
        None => Arc::new(InMemoryPublisher::new()),
    };

    let service = DiscountService::new(store.clone(), publisher, args.strategy, &config)?;
    let result = run_command(&args.command, &service);
    service.shutdown();

    if let Some(log) = &event_log {
        log.flush()?;
    }

    if result.is_ok() && !matches!(args.command, Command::Ids) {
        let mut output = io::stdout().lock();
        write_catalog_csv(&store.snapshot(), &mut output)?;
    }
    result
}

fn run_command(command: &Command, service: &DiscountService) -> Result<(), DiscountError> {
    match command {
        Command::Process { ids } => {
            let ids = if ids.is_empty() {
                service.record_ids()?
            } else {
                ids.clone()
            };

            let report = service.process(&ids)?;
            info!(
                processed = report.processed_ids().len(),
                discounted = report.discounted_ids().len(),
                failed = report.failures().len(),
                skipped = report.skipped_ids().len(),
                "Batch finished"
            );

            for failure in report.failures() {
                warn!(id = failure.id, error = %failure.error, "Record failed");
            }
            report.into_result()?;
            eprintln!("Products processed and events published.");
            Ok(())
        }
        Command::Reset => {
            let status = service.reset();
            eprintln!("{}", status);
            match status {
                ResetStatus::Success { .. } => Ok(()),
                ResetStatus::DataConversionFailure { error }
                | ResetStatus::Failure { error } => Err(error),
            }
        }
        Command::Ids => {
            let mut output = io::stdout().lock();
            for id in service.record_ids()? {
                writeln!(output, "{}", id)?;
            }
            Ok(())
        }
    }
}
