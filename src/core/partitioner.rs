//! Batch partitioning for concurrent execution
//!
//! Splits an ordered list of record ids into contiguous, fixed-size chunks.
//! Each chunk becomes the unit of work handed to a single worker task.
//!
//! # Guarantees
//!
//! - Concatenating the chunks in order reproduces the input exactly
//! - Every chunk but the last has exactly `size` ids
//! - The last chunk has between 1 and `size` ids
//! - Empty input yields no chunks

use crate::types::RecordId;

/// Partition ids into ordered chunks of `size`
///
/// # Panics
///
/// Panics if `size` is zero. Callers obtain the size from
/// [`EngineConfig`](crate::config::EngineConfig), which never holds zero.
pub fn partition(ids: &[RecordId], size: usize) -> Vec<Vec<RecordId>> {
    assert!(size > 0, "chunk size must be positive");

    ids.chunks(size).map(<[RecordId]>::to_vec).collect()
}
