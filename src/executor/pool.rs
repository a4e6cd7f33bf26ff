//! Bounded worker pool
//!
//! This module provides the `WorkerPool` struct, an owned handle to a tokio
//! multi-threaded runtime with a fixed number of worker threads, paired with a
//! fair semaphore holding one permit per worker.
//!
//! # Design
//!
//! ```text
//! WorkerPool
//!     ├── Runtime     (pool_size worker threads, "discount-worker")
//!     ├── Handle      (spawn + block_on without holding the runtime lock)
//!     └── Semaphore   (pool_size permits, granted in FIFO order)
//! ```
//!
//! A task holds a permit for as long as it runs, so at most `pool_size` chunks
//! execute at once. The semaphore grants permits in the order they were
//! requested, which makes dispatch strictly first-in first-out.
//!
//! # Lifecycle
//!
//! The pool is created once and shared (via `Arc`) by every batch execution.
//! [`WorkerPool::shutdown`] closes the semaphore, so later submissions fail with
//! `PoolShutdown`, then tears the runtime down.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::info;

use crate::types::DiscountError;

/// Fixed-size pool of worker threads
#[derive(Debug)]
pub struct WorkerPool {
    /// Owned runtime, taken out on shutdown
    runtime: Mutex<Option<Runtime>>,

    /// Handle to the runtime for spawning and blocking
    handle: Handle,

    /// One permit per worker
    permits: Arc<Semaphore>,

    /// Number of workers
    size: usize,
}

impl WorkerPool {
    /// Create a pool with `size` workers
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the runtime threads cannot be started.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Result<Self, DiscountError> {
        assert!(size > 0, "pool size must be positive");

        let runtime = Builder::new_multi_thread()
            .worker_threads(size)
            .thread_name("discount-worker")
            .build()?;
        let handle = runtime.handle().clone();

        info!(size, "Started worker pool");

        Ok(Self {
            runtime: Mutex::new(Some(runtime)),
            handle,
            permits: Arc::new(Semaphore::new(size)),
            size,
        })
    }

    /// Number of workers
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether [`shutdown`](Self::shutdown) has been called
    pub fn is_shutdown(&self) -> bool {
        self.permits.is_closed()
    }

    /// Wait for a free worker
    ///
    /// Permits are granted in request order. The permit must be moved into the
    /// task it was acquired for and released when that task ends.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, DiscountError> {
        Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| DiscountError::PoolShutdown)
    }

    /// Spawn a task on the pool's runtime
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Run a future to completion on the calling thread
    ///
    /// # Panics
    ///
    /// Panics when called from within an async execution context.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.handle.block_on(future)
    }

    /// Stop accepting work and tear the runtime down
    ///
    /// Blocks until the chunks that are already running have finished. Tasks
    /// still waiting for a worker are dropped. Calling this more than once is
    /// harmless.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async execution context.
    pub fn shutdown(&self) {
        self.permits.close();

        if let Some(runtime) = self.runtime.lock().take() {
            drop(runtime);
            info!(size = self.size, "Worker pool shut down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_new_pool_reports_size() {
        let pool = WorkerPool::new(3).unwrap();

        assert_eq!(pool.size(), 3);
        assert!(!pool.is_shutdown());
    }

    #[test]
    #[should_panic(expected = "pool size must be positive")]
    fn test_zero_size_panics() {
        let _ = WorkerPool::new(0);
    }

    #[test]
    fn test_tasks_run_on_named_worker_threads() {
        let pool = WorkerPool::new(2).unwrap();

        let name = pool
            .block_on(pool.spawn(async {
                std::thread::current().name().map(str::to_string)
            }))
            .unwrap();

        assert_eq!(name.as_deref(), Some("discount-worker"));
    }

    #[test]
    fn test_permits_bound_concurrency() {
        let pool = WorkerPool::new(2).unwrap();
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        pool.block_on(async {
            let mut handles = Vec::new();
            for _ in 0..6 {
                let permit = pool.acquire().await.unwrap();
                let active = Arc::clone(&active);
                let peak = Arc::clone(&peak);
                handles.push(pool.spawn(async move {
                    let _permit = permit;
                    let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(20));
                    active.fetch_sub(1, Ordering::SeqCst);
                }));
            }
            for handle in handles {
                handle.await.unwrap();
            }
        });

        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn test_shutdown_rejects_new_work() {
        let pool = WorkerPool::new(1).unwrap();

        pool.shutdown();
        pool.shutdown();

        assert!(pool.is_shutdown());
        let permit = futures::executor::block_on(pool.acquire());
        assert_eq!(permit.err(), Some(DiscountError::PoolShutdown));
    }
}
