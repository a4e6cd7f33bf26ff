//! CSV format handling for catalog records
//!
//! This module centralizes all CSV format concerns, providing:
//! - CatalogRow structure for deserialization
//! - Conversion from catalog rows to records
//! - Catalog output serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Format
//!
//! ```text
//! id,name,category,price,offer_applied,discount_percentage,price_after_discount
//! 1,Laptop,electronics,1500.00,true,10,1350.00
//! 2,Desk,furniture,450.00,,,
//! ```
//!
//! The three discount columns are optional on input. When they are left out
//! the record is loaded with no offer applied.

use crate::types::{DiscountError, Record, RecordId};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Column headers written by [`write_catalog_csv`]
pub const CATALOG_HEADER: [&str; 7] = [
    "id",
    "name",
    "category",
    "price",
    "offer_applied",
    "discount_percentage",
    "price_after_discount",
];

/// CSV row structure for deserialization
///
/// Numeric fields are kept as strings so that parse failures can be reported
/// with the offending value.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CatalogRow {
    pub id: RecordId,
    pub name: String,
    pub category: String,
    pub price: String,
    #[serde(default)]
    pub offer_applied: Option<String>,
    #[serde(default)]
    pub discount_percentage: Option<String>,
    #[serde(default)]
    pub price_after_discount: Option<String>,
}

/// Convert a CatalogRow to a Record
///
/// This function:
/// - Parses the price and rejects negative values
/// - Parses the optional discount columns
/// - Rejects rows whose discount columns break the discount invariant
///
/// # Returns
///
/// Result containing either:
/// - Ok(Record) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_catalog_row(row: CatalogRow) -> Result<Record, String> {
    let price = parse_amount(&row.price)
        .ok_or_else(|| format!("Invalid price '{}' for record {}", row.price, row.id))?;
    if price < Decimal::ZERO {
        return Err(format!("Negative price {} for record {}", price, row.id));
    }

    let mut record = Record::new(row.id, row.name, row.category, price);

    let offer_applied = match non_blank(row.offer_applied.as_deref()) {
        Some(value) => match value.to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                return Err(format!(
                    "Invalid offer_applied '{}' for record {}",
                    value, row.id
                ))
            }
        },
        None => false,
    };

    if let Some(value) = non_blank(row.discount_percentage.as_deref()) {
        record.discount_percentage = parse_amount(value).ok_or_else(|| {
            format!("Invalid discount_percentage '{}' for record {}", value, row.id)
        })?;
    }

    if let Some(value) = non_blank(row.price_after_discount.as_deref()) {
        record.price_after_discount = parse_amount(value).ok_or_else(|| {
            format!("Invalid price_after_discount '{}' for record {}", value, row.id)
        })?;
    }

    record.offer_applied = offer_applied;

    if !record.is_consistent() {
        return Err(format!(
            "Inconsistent discount fields for record {}",
            record.id
        ));
    }

    Ok(record)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_amount(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

/// Format a monetary amount for output
///
/// At least two decimal places are written. Amounts with more significant
/// decimals keep all of them, so the output reads back to the same value.
pub fn format_amount(amount: Decimal) -> String {
    let amount = amount.normalize();
    if amount.scale() <= 2 {
        format!("{:.2}", amount)
    } else {
        amount.to_string()
    }
}

/// Write records to CSV format
///
/// Records are sorted by id for deterministic output. Monetary columns are
/// written with [`format_amount`].
pub fn write_catalog_csv(
    records: &[Record],
    output: &mut dyn Write,
) -> Result<(), DiscountError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer.write_record(CATALOG_HEADER)?;

    let mut sorted_records = records.to_vec();
    sorted_records.sort_by_key(|record| record.id);

    for record in sorted_records {
        writer.write_record(&[
            record.id.to_string(),
            record.name,
            record.category,
            format_amount(record.price),
            record.offer_applied.to_string(),
            record.discount_percentage.normalize().to_string(),
            format_amount(record.price_after_discount),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
