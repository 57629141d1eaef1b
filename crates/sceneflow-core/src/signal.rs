//! Signal/slot system for sceneflow.
//!
//! This module provides a type-safe, Qt-inspired signal/slot mechanism for
//! communication between models, adapters and their observers. Signals are
//! emitted when state changes, and connected slots (callbacks) are invoked
//! synchronously, in the order they were connected.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Re-entrancy
//!
//! Emission takes a snapshot of the connected slots and releases the
//! connection lock before invoking them. A slot may therefore connect,
//! disconnect, or emit on the same signal. A slot that is disconnected while
//! an emission is in flight is not invoked by the remainder of that emission.
//!
//! Delivery is synchronous on the emitting thread. There is no event loop and
//! no queued delivery; work that must run after the current notification turn
//! goes through [`crate::DeferredQueue`].
//!
//! # Example
//!
//! ```
//! use sceneflow_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID remains valid until the connection is explicitly disconnected or
    /// the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Internal storage for a single connection.
struct Connection<Args> {
    slot: Slot<Args>,
    /// Cleared on disconnect so an in-flight emission skips the slot.
    live: Arc<AtomicBool>,
    /// Monotonic connection sequence; slots run in this order.
    order: u64,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a reference
/// to the provided arguments.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(usize, usize)` for multiple arguments.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    blocked: AtomicBool,
    next_order: AtomicU64,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
            next_order: AtomicU64::new(0),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use sceneflow_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
            live: Arc::new(AtomicBool::new(true)),
            order: self.next_order.fetch_add(1, Ordering::Relaxed),
        };
        self.connections.lock().insert(connection)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        match self.connections.lock().remove(id) {
            Some(connection) => {
                connection.live.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        let mut connections = self.connections.lock();
        for (_, connection) in connections.drain() {
            connection.live.store(false, Ordering::Release);
        }
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked, this does nothing.
    #[tracing::instrument(skip_all, target = "sceneflow_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots = self.snapshot();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for (slot, live) in slots {
            if live.load(Ordering::Acquire) {
                slot(&args);
            }
        }
    }

    /// Copy out the live slots so the lock is not held while they run.
    fn snapshot(&self) -> Vec<(Slot<Args>, Arc<AtomicBool>)> {
        let connections = self.connections.lock();
        let mut entries: Vec<_> = connections
            .values()
            .map(|conn| (conn.order, conn.slot.clone(), conn.live.clone()))
            .collect();
        drop(connections);

        entries.sort_unstable_by_key(|(order, _, _)| *order);
        entries
            .into_iter()
            .map(|(_, slot, live)| (slot, live))
            .collect()
    }

    /// Connect a slot whose connection is removed when the guard is dropped.
    ///
    /// The guard only holds a weak reference to the signal; dropping it after
    /// the signal is gone is a no-op.
    pub fn connect_scoped<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        let weak = Arc::downgrade(self);
        ConnectionGuard::new(move || {
            if let Some(signal) = weak.upgrade() {
                signal.disconnect(id);
            }
        })
    }
}

/// Connect to a signal that lives inside a shared owner.
///
/// `signal` selects the signal field on `owner`. The returned guard holds the
/// owner weakly and disconnects on drop if the owner is still alive; it never
/// keeps the owner alive by itself.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use sceneflow_core::{Signal, connect_guarded};
///
/// struct Model {
///     changed: Signal<()>,
/// }
///
/// let model = Arc::new(Model { changed: Signal::new() });
/// let guard = connect_guarded(&model, |m| &m.changed, |_| {});
/// assert_eq!(model.changed.connection_count(), 1);
/// drop(guard);
/// assert_eq!(model.changed.connection_count(), 0);
/// ```
pub fn connect_guarded<O, Args, F>(
    owner: &Arc<O>,
    signal: fn(&O) -> &Signal<Args>,
    slot: F,
) -> ConnectionGuard
where
    O: Send + Sync + 'static,
    Args: 'static,
    F: Fn(&Args) + Send + Sync + 'static,
{
    let id = signal(owner).connect(slot);
    let weak = Arc::downgrade(owner);
    ConnectionGuard::new(move || {
        if let Some(owner) = weak.upgrade() {
            signal(&owner).disconnect(id);
        }
    })
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created by [`Signal::connect_scoped`] or [`connect_guarded`], or from any
/// disconnect action via [`ConnectionGuard::new`].
///
/// # Example
///
/// ```
/// use sceneflow_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Arc::new(Signal::<i32>::new());
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
#[must_use = "dropping the guard disconnects immediately"]
pub struct ConnectionGuard {
    disconnect: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ConnectionGuard {
    /// Wrap an arbitrary disconnect action.
    pub fn new<F>(disconnect: F) -> Self
    where
        F: FnOnce() + Send + Sync + 'static,
    {
        Self {
            disconnect: Some(Box::new(disconnect)),
        }
    }

    /// Disconnect now instead of waiting for drop.
    pub fn disconnect(mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }

    /// Keep the connection alive forever and discard the guard.
    pub fn forget(mut self) {
        self.disconnect = None;
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        if let Some(disconnect) = self.disconnect.take() {
            disconnect();
        }
    }
}

impl std::fmt::Debug for ConnectionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("armed", &self.disconnect.is_some())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionGuard: Send, Sync);
