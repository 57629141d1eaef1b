//! Deferred task queue.
//!
//! Work that must not run inside the current notification turn is posted
//! here and executed when the owner of the queue calls
//! [`DeferredQueue::process_all`] or [`DeferredQueue::process_batch`]. The
//! main client is the screenplay adapter, which hands superseded synthesized
//! collections to the queue instead of dropping them while their signals may
//! still be delivering.
//!
//! Tasks are taken out of the queue before they run, so a task may post
//! further tasks; those run on the next processing call.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::logging::{PerfSpan, span_names, targets};

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask = Box<dyn FnOnce() + Send + 'static>;

struct TaskData {
    id: TaskId,
    task: BoxedTask,
}

/// Default number of tasks run by [`DeferredQueue::process_batch`].
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// A FIFO of closures to run after the current notification turn.
///
/// Dropping the queue drops any pending tasks without running them, which
/// still releases whatever they captured.
pub struct DeferredQueue {
    tasks: Mutex<VecDeque<TaskData>>,
    batch_size: AtomicUsize,
}

impl DeferredQueue {
    /// Create an empty queue with the default batch size.
    pub fn new() -> Self {
        Self::with_batch_size(DEFAULT_BATCH_SIZE)
    }

    /// Create an empty queue with a custom batch size.
    pub fn with_batch_size(batch_size: usize) -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            batch_size: AtomicUsize::new(batch_size.max(1)),
        }
    }

    /// Post a task to run on the next processing call.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = next_task_id();
        self.tasks.lock().push_back(TaskData {
            id,
            task: Box::new(task),
        });
        tracing::trace!(target: targets::DEFERRED, task = id.as_u64(), "task posted");
        id
    }

    /// Keep `value` alive until the next processing call, then drop it.
    pub fn defer_drop<T>(&self, value: T) -> TaskId
    where
        T: Send + 'static,
    {
        self.post(move || drop(value))
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled. The task's
    /// captures are dropped immediately.
    pub fn cancel(&self, id: TaskId) -> bool {
        let removed = {
            let mut tasks = self.tasks.lock();
            tasks
                .iter()
                .position(|t| t.id == id)
                .and_then(|pos| tasks.remove(pos))
        };
        removed.is_some()
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.lock().is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Set the number of tasks run per [`process_batch`](Self::process_batch).
    pub fn set_batch_size(&self, size: usize) {
        self.batch_size.store(size.max(1), Ordering::Relaxed);
    }

    /// Get the batch size.
    pub fn batch_size(&self) -> usize {
        self.batch_size.load(Ordering::Relaxed)
    }

    /// Run up to `batch_size` tasks.
    ///
    /// Returns the number of tasks processed.
    pub fn process_batch(&self) -> usize {
        let batch: Vec<TaskData> = {
            let mut tasks = self.tasks.lock();
            let count = tasks.len().min(self.batch_size());
            tasks.drain(..count).collect()
        };
        Self::run(batch)
    }

    /// Run every task that was pending when the call started.
    ///
    /// Returns the number of tasks processed.
    pub fn process_all(&self) -> usize {
        let batch: Vec<TaskData> = self.tasks.lock().drain(..).collect();
        Self::run(batch)
    }

    fn run(batch: Vec<TaskData>) -> usize {
        let count = batch.len();
        if count > 0 {
            let _span = PerfSpan::new(span_names::DEFERRED);
            tracing::debug!(target: targets::DEFERRED, count, "running deferred tasks");
            for task_data in batch {
                (task_data.task)();
            }
        }
        count
    }
}

impl Default for DeferredQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DeferredQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("pending", &self.pending_count())
            .field("batch_size", &self.batch_size())
            .finish()
    }
}

static_assertions::assert_impl_all!(DeferredQueue: Send, Sync);
