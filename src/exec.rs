//! Execution contexts for thread-affinity dispatch
//!
//! The migration touches two concurrency domains: a background pool for
//! filesystem probing and the SQLite read, and the host's UI context
//! for the store injection. Both are modeled behind one trait so tests
//! can substitute an inline implementation for either side.

use tokio::runtime::Handle;

/// A unit of work handed to an execution context.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Somewhere work can be scheduled. Dispatch is fire-and-forget and
/// must not block the caller.
pub trait ExecutionContext: Send + Sync {
    fn dispatch(&self, task: Task);
}

/// Dispatches onto the tokio blocking pool.
#[derive(Debug, Clone)]
pub struct BackgroundPool {
    handle: Handle,
}

impl BackgroundPool {
    /// Captures the current runtime. Panics if called outside one, same
    /// as [`Handle::current`].
    pub fn new() -> Self {
        Self {
            handle: Handle::current(),
        }
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl ExecutionContext for BackgroundPool {
    fn dispatch(&self, task: Task) {
        self.handle.spawn_blocking(task);
    }
}

/// Runs tasks immediately on the calling thread.
///
/// Stands in for a UI loop in tests, and for hosts whose store bridge
/// already marshals onto the main thread itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineContext;

impl ExecutionContext for InlineContext {
    fn dispatch(&self, task: Task) {
        task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn inline_context_runs_synchronously() {
        let count = Arc::new(AtomicUsize::new(0));
        let ctx = InlineContext;
        let count_in_task = Arc::clone(&count);
        ctx.dispatch(Box::new(move || {
            count_in_task.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn background_pool_runs_off_the_caller() {
        let (tx, rx) = std::sync::mpsc::channel();
        let pool = BackgroundPool::new();
        pool.dispatch(Box::new(move || {
            tx.send(std::thread::current().id()).unwrap();
        }));
        let worker = tokio::task::spawn_blocking(move || rx.recv().unwrap())
            .await
            .unwrap();
        assert_ne!(worker, std::thread::current().id());
    }
}
