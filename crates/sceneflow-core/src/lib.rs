//! Core systems for sceneflow.
//!
//! This crate provides the plumbing the screenplay model is built on:
//!
//! - **Signal/Slot System**: Type-safe, re-entrant notification between models
//!   and their observers
//! - **Property System**: Change-detecting values that keep two-way wiring
//!   idempotent
//! - **Deferred Queue**: Work that must run after the current notification turn
//! - **Logging**: `tracing` targets and span helpers
//!
//! # Signal/Slot Example
//!
//! ```
//! use sceneflow_core::Signal;
//!
//! let row_count_changed = Signal::<usize>::new();
//!
//! let conn_id = row_count_changed.connect(|count| {
//!     println!("Row count is now {}", count);
//! });
//!
//! row_count_changed.emit(3);
//! row_count_changed.disconnect(conn_id);
//! ```
//!
//! # Deferred Queue Example
//!
//! ```
//! use std::sync::Arc;
//! use sceneflow_core::DeferredQueue;
//!
//! let queue = DeferredQueue::new();
//! let retired = Arc::new(String::from("old collection"));
//!
//! queue.defer_drop(retired.clone());
//! assert_eq!(Arc::strong_count(&retired), 2);
//!
//! queue.process_all();
//! assert_eq!(Arc::strong_count(&retired), 1);
//! ```

mod deferred;
pub mod logging;
pub mod property;
pub mod signal;

pub use deferred::{DEFAULT_BATCH_SIZE, DeferredQueue, TaskId};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal, connect_guarded};

pub use tracing;
