//! Chrome visibility bus
//!
//! Any screen may ask for the navigation chrome (the bottom nav bar) to be
//! hidden or shown by publishing a [`VisibilityEvent`] on a named channel.
//! The navigation engine subscribes once and animates the bar toward the
//! requested state.
//!
//! Subscriptions are RAII guards: dropping the returned [`Subscription`]
//! removes the handler, so a screen that subscribes on mount is unsubscribed
//! on teardown without any explicit bookkeeping.
//!
//! # Example
//!
//! ```rust
//! use app_state::visibility::{VisibilityBus, VisibilityEvent};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let bus = VisibilityBus::default();
//! let hidden = Arc::new(AtomicBool::new(false));
//!
//! let flag = Arc::clone(&hidden);
//! let _sub = bus.subscribe(move |event| {
//!     flag.store(event == VisibilityEvent::Hide, Ordering::SeqCst);
//! });
//!
//! bus.publish(VisibilityEvent::Hide);
//! assert!(hidden.load(Ordering::SeqCst));
//! assert!(bus.is_hidden());
//! ```

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::{broadcast, watch};

/// Channel name used for the bottom navigation bar
pub const NAV_CHANNEL: &str = "nav-visibility";

/// Capacity of the async event broadcast
const EVENT_CAPACITY: usize = 16;

/// Visibility request published on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityEvent {
    /// Hide the chrome
    Hide,
    /// Show the chrome
    Show,
}

impl VisibilityEvent {
    /// Whether this event asks for the chrome to be hidden
    pub fn is_hide(self) -> bool {
        matches!(self, VisibilityEvent::Hide)
    }
}

type Handler = Arc<dyn Fn(VisibilityEvent) + Send + Sync>;

struct BusInner {
    name: String,
    handlers: Mutex<Vec<(u64, Handler)>>,
    next_id: AtomicU64,
    hidden_tx: watch::Sender<bool>,
    events_tx: broadcast::Sender<VisibilityEvent>,
}

/// Named publish/subscribe channel for chrome visibility
///
/// Cloning the bus yields another handle to the same channel.
#[derive(Clone)]
pub struct VisibilityBus {
    inner: Arc<BusInner>,
}

impl Default for VisibilityBus {
    fn default() -> Self {
        Self::new(NAV_CHANNEL)
    }
}

impl std::fmt::Debug for VisibilityBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibilityBus")
            .field("name", &self.inner.name)
            .field("subscribers", &self.subscriber_count())
            .field("hidden", &self.is_hidden())
            .finish()
    }
}

impl VisibilityBus {
    /// Create a new bus with the given channel name
    pub fn new(name: impl Into<String>) -> Self {
        let (hidden_tx, _) = watch::channel(false);
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            inner: Arc::new(BusInner {
                name: name.into(),
                handlers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                hidden_tx,
                events_tx,
            }),
        }
    }

    /// Channel name
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Publish an event to every subscriber
    ///
    /// Handlers run synchronously on the caller's thread. The handler list is
    /// snapshotted first so a handler may publish or drop its own
    /// subscription without deadlocking.
    pub fn publish(&self, event: VisibilityEvent) {
        tracing::debug!(channel = %self.inner.name, ?event, "visibility event");

        self.inner.hidden_tx.send_replace(event.is_hide());

        let handlers: Vec<Handler> = self
            .inner
            .handlers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event);
        }

        // No async listeners is fine
        let _ = self.inner.events_tx.send(event);
    }

    /// Shorthand for publishing [`VisibilityEvent::Hide`]
    pub fn hide(&self) {
        self.publish(VisibilityEvent::Hide);
    }

    /// Shorthand for publishing [`VisibilityEvent::Show`]
    pub fn show(&self) {
        self.publish(VisibilityEvent::Show);
    }

    /// Register a handler; it stays registered until the guard is dropped
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(VisibilityEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.handlers.lock().push((id, Arc::new(handler)));

        Subscription {
            bus: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of live handler subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.lock().len()
    }

    /// Derived state: whether the last published event was a hide
    pub fn is_hidden(&self) -> bool {
        *self.inner.hidden_tx.borrow()
    }

    /// Watch the derived hidden flag
    pub fn watch_hidden(&self) -> watch::Receiver<bool> {
        self.inner.hidden_tx.subscribe()
    }

    /// Receive every published event asynchronously
    pub fn subscribe_events(&self) -> broadcast::Receiver<VisibilityEvent> {
        self.inner.events_tx.subscribe()
    }
}

/// Guard returned by [`VisibilityBus::subscribe`]
///
/// The handler is removed when the guard is dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    bus: Weak<BusInner>,
    id: u64,
}

impl Subscription {
    /// Explicitly unsubscribe (same as dropping)
    pub fn unsubscribe(self) {}

    /// Whether the bus this subscription belongs to is still alive
    pub fn is_active(&self) -> bool {
        self.bus
            .upgrade()
            .map(|bus| bus.handlers.lock().iter().any(|(id, _)| *id == self.id))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.handlers.lock().retain(|(id, _)| *id != self.id);
        }
    }
}
