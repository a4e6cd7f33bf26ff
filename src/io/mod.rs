//! I/O module
//!
//! Handles catalog CSV parsing and output, and the file-backed event log.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, catalog output)
//! - `catalog_reader` - Streaming catalog reader and store loader
//! - `event_log` - JSON Lines event publisher

pub mod catalog_reader;
pub mod csv_format;
pub mod event_log;

pub use catalog_reader::{load_catalog, CatalogReader};
pub use csv_format::{convert_catalog_row, write_catalog_csv, CatalogRow};
pub use event_log::JsonLinesPublisher;
