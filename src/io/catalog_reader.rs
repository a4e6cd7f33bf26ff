//! Catalog CSV reader with iterator interface
//!
//! Provides a streaming iterator over records from a catalog CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual row errors are yielded as `Err(DiscountError::ParseError)`
//!   carrying the line number, and iteration continues with the next row
//!
//! ```no_run
//! use catalog_discount_engine::io::CatalogReader;
//! use std::path::Path;
//!
//! let reader = CatalogReader::new(Path::new("catalog.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Loaded record {}", record.id),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

use crate::io::csv_format::{convert_catalog_row, CatalogRow};
use crate::store::InMemoryRecordStore;
use crate::types::{DiscountError, Record};
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

/// Streaming catalog reader
#[derive(Debug)]
pub struct CatalogReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl CatalogReader {
    /// Open a catalog file
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (the discount columns are optional)
    pub fn new(path: &Path) -> Result<Self, DiscountError> {
        let file = File::open(path).map_err(|e| DiscountError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }
}

impl Iterator for CatalogReader {
    type Item = Result<Record, DiscountError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CatalogRow>();
        let row = deserializer.next()?;
        self.line_num += 1;

        let line = Some(self.line_num);
        Some(match row {
            Ok(row) => convert_catalog_row(row)
                .map_err(|message| DiscountError::ParseError { line, message }),
            Err(e) => Err(DiscountError::ParseError {
                line,
                message: e.to_string(),
            }),
        })
    }
}

/// Load a catalog file into an in-memory store
///
/// Malformed rows are skipped with a warning. When an id appears more than
/// once the last row wins.
pub fn load_catalog(path: &Path) -> Result<InMemoryRecordStore, DiscountError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0usize;

    for result in CatalogReader::new(path)? {
        match result {
            Ok(record) => {
                if !seen.insert(record.id) {
                    warn!(id = record.id, "Duplicate record id, keeping the later row");
                }
                records.push(record);
            }
            Err(error) => {
                warn!(%error, "Skipping malformed catalog row");
                skipped += 1;
            }
        }
    }

    let store = InMemoryRecordStore::with_records(records);
    info!(
        path = %path.display(),
        records = store.len(),
        skipped,
        "Loaded catalog"
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calculator::tier;
    use crate::io::csv_format::write_catalog_csv;
    use rust_decimal::Decimal;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reader_fails_on_missing_file() {
        let result = CatalogReader::new(Path::new("nonexistent.csv"));

        let error = result.unwrap_err();
        assert!(error.to_string().contains("Failed to open file"));
    }

    #[test]
    fn test_reader_iterates_records_without_discount_columns() {
        let file = create_temp_csv(
            "id,name,category,price\n1,Desk,furniture,450.00\n2,Laptop,electronics,1500\n",
        );

        let records: Vec<_> = CatalogReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 2);
        let laptop = records[1].as_ref().unwrap();
        assert_eq!(laptop.id, 2);
        assert!(!laptop.offer_applied);
        assert_eq!(laptop.price_after_discount, laptop.price);
    }

    #[test]
    fn test_reader_includes_line_numbers_in_errors() {
        let file = create_temp_csv(concat!(
            "id,name,category,price\n",
            "1,Desk,furniture,450\n",
            "2,Chair,furniture,cheap\n",
            "3,Lamp,lighting,30\n",
        ));

        let records: Vec<_> = CatalogReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[2].is_ok());
        match &records[1] {
            Err(DiscountError::ParseError { line, message }) => {
                assert_eq!(*line, Some(3));
                assert!(message.contains("Invalid price"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_reader_handles_whitespace() {
        let file =
            create_temp_csv("id,name,category,price\n  7  ,  Desk  , furniture ,  450.00  \n");

        let records: Vec<_> = CatalogReader::new(file.path()).unwrap().collect();

        let record = records[0].as_ref().unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.name, "Desk");
    }

    #[test]
    fn test_load_catalog_skips_malformed_rows() {
        let file = create_temp_csv(
            "id,name,category,price\n1,Desk,furniture,450\nx,Bad,none,1\n3,Lamp,lighting,30\n",
        );

        let store = load_catalog(file.path()).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get(3).is_some());
    }

    #[test]
    fn test_load_catalog_last_duplicate_wins() {
        let file = create_temp_csv("id,name,category,price\n1,Old,misc,10\n1,New,misc,20\n");

        let store = load_catalog(file.path()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().name, "New");
    }

    #[test]
    fn test_written_catalog_loads_back_unchanged() {
        let records: Vec<Record> = ["850.10", "999.99", "800.01", "1234.567", "15"]
            .iter()
            .zip(1..)
            .map(|(price, id)| {
                let mut record =
                    Record::new(id, "Item", "misc", Decimal::from_str(price).unwrap());
                record.apply_tier(tier(record.price));
                record
            })
            .collect();
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        write_catalog_csv(&records, &mut file).unwrap();
        file.flush().expect("Failed to flush temp file");

        let store = load_catalog(file.path()).unwrap();

        assert_eq!(store.snapshot(), records);
    }
}
