//! Error types for the Catalog Discount Engine
//!
//! This module defines all error types that can occur while recomputing
//! discounts, persisting records and publishing change notifications.
//!
//! # Error Categories
//!
//! - **Lookup Errors**: a requested record id does not exist
//! - **Serialization Errors**: a record cannot be turned into a payload
//! - **Transport Errors**: the record store or the broker failed
//! - **File I/O and CSV Errors**: catalog loading and output
//! - **Execution Errors**: a worker panicked or the pool was shut down

use crate::types::RecordId;
use thiserror::Error;

/// Main error type for the discount engine
///
/// Errors are `Clone` so that per-record failures can be carried in batch
/// reports while the first one is also returned to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscountError {
    /// No record exists for the requested id
    #[error("Record {id} does not exist")]
    NotFound {
        /// The id that was looked up
        id: RecordId,
    },

    /// A record (or list of records) could not be serialized for publishing
    #[error("Failed to serialize {subject}: {message}")]
    Serialization {
        /// What was being serialized
        subject: String,
        /// Serializer error message
        message: String,
    },

    /// The record store or the event broker failed for an infrastructure reason
    #[error("Transport failure during {operation}: {message}")]
    Transport {
        /// Operation that failed (e.g. "save", "publish")
        operation: String,
        /// Description of the failure
        message: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Catalog CSV could not be parsed
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A chunk task terminated abnormally
    #[error("Worker for chunk {chunk} failed: {message}")]
    WorkerFailed {
        /// Index of the chunk whose task failed
        chunk: usize,
        /// Panic or cancellation message
        message: String,
    },

    /// Work was submitted after the worker pool was shut down
    #[error("Worker pool has been shut down")]
    PoolShutdown,
}

impl From<std::io::Error> for DiscountError {
    fn from(error: std::io::Error) -> Self {
        DiscountError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for DiscountError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        DiscountError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for DiscountError {
    fn from(error: serde_json::Error) -> Self {
        DiscountError::Serialization {
            subject: "payload".to_string(),
            message: error.to_string(),
        }
    }
}

impl DiscountError {
    /// Create a NotFound error
    pub fn not_found(id: RecordId) -> Self {
        DiscountError::NotFound { id }
    }

    /// Create a Serialization error
    pub fn serialization(subject: &str, message: impl ToString) -> Self {
        DiscountError::Serialization {
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a Transport error
    pub fn transport(operation: &str, message: impl ToString) -> Self {
        DiscountError::Transport {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a WorkerFailed error
    pub fn worker_failed(chunk: usize, message: impl ToString) -> Self {
        DiscountError::WorkerFailed {
            chunk,
            message: message.to_string(),
        }
    }

    /// Whether this error is a missing-record lookup
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiscountError::NotFound { .. })
    }
}
