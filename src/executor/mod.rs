//! Concurrent execution of discount batches
//!
//! - **WorkerPool**: owned, fixed-size pool of worker threads with explicit shutdown
//! - **BatchExecutor**: partitions ids, runs one task per chunk on the pool and
//!   joins them before returning
//!
//! `BatchExecutor::execute` is synchronous from the caller's point of view even
//! though chunks run in parallel. It must not be called from inside an async
//! runtime.

pub mod batch_executor;
pub mod pool;

pub use batch_executor::BatchExecutor;
pub use pool::WorkerPool;
