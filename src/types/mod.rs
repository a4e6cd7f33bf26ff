//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Catalog record and its identifier
//! - `error`: Error types for the discount engine

pub mod error;
pub mod record;

pub use error::DiscountError;
pub use record::{Record, RecordId};
