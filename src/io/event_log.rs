//! JSON Lines event log
//!
//! An [`EventPublisher`] that appends every notification to a writer as one
//! JSON object per line:
//!
//! ```text
//! {"channel":"product-discount-update","payload":{"id":1,"name":"Laptop",...}}
//! ```
//!
//! Payloads that are valid JSON are embedded as-is; anything else is embedded
//! as a string.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use crate::core::traits::EventPublisher;
use crate::types::DiscountError;

#[derive(Serialize)]
struct EventLine<'a> {
    channel: &'a str,
    payload: Value,
}

/// Publisher writing JSON Lines to any writer
pub struct JsonLinesPublisher<W: Write + Send> {
    writer: Mutex<W>,
}

impl JsonLinesPublisher<BufWriter<File>> {
    /// Create (or truncate) an event log file
    pub fn create(path: &Path) -> Result<Self, DiscountError> {
        let file = File::create(path).map_err(|e| DiscountError::IoError {
            message: format!("Failed to create event log '{}': {}", path.display(), e),
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> JsonLinesPublisher<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Flush buffered lines
    pub fn flush(&self) -> Result<(), DiscountError> {
        self.writer
            .lock()
            .flush()
            .map_err(|e| DiscountError::transport("flush", e))
    }

    /// Unwrap the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> EventPublisher for JsonLinesPublisher<W> {
    fn publish(&self, channel: &str, payload: &[u8]) -> Result<(), DiscountError> {
        let payload = serde_json::from_slice(payload)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(payload).into_owned()));
        let mut line = serde_json::to_vec(&EventLine { channel, payload })?;
        line.push(b'\n');

        self.writer
            .lock()
            .write_all(&line)
            .map_err(|e| DiscountError::transport("publish", e))
    }
}
