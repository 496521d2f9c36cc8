//! Session presence
//!
//! The navigation engine only needs one fact about the user's session:
//! whether one is present. [`AuthPredicate`] is that read; [`SessionFlag`]
//! is the shared flag the sign-in and sign-out flows flip.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Read-only "is a user session present" check
///
/// Implementations must be cheap: the auth gate calls this on every render
/// of a gated screen.
#[cfg_attr(test, mockall::automock)]
pub trait AuthPredicate: Send + Sync {
    /// Whether a user session is currently present
    fn is_authenticated(&self) -> bool;
}

impl<F> AuthPredicate for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_authenticated(&self) -> bool {
        self()
    }
}

/// Shared, cloneable session presence flag
#[derive(Clone)]
pub struct SessionFlag {
    present: Arc<AtomicBool>,
    tx: Arc<watch::Sender<bool>>,
}

impl Default for SessionFlag {
    fn default() -> Self {
        Self::new(false)
    }
}

impl std::fmt::Debug for SessionFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionFlag")
            .field("present", &self.is_present())
            .finish()
    }
}

impl SessionFlag {
    /// Create a flag with an initial value
    pub fn new(present: bool) -> Self {
        let (tx, _) = watch::channel(present);
        Self {
            present: Arc::new(AtomicBool::new(present)),
            tx: Arc::new(tx),
        }
    }

    /// Mark a session as present
    pub fn sign_in(&self) {
        self.set(true);
    }

    /// Mark the session as gone
    pub fn sign_out(&self) {
        self.set(false);
    }

    /// Set presence explicitly
    pub fn set(&self, present: bool) {
        let previous = self.present.swap(present, Ordering::SeqCst);
        if previous != present {
            tracing::debug!(present, "session presence changed");
            self.tx.send_replace(present);
        }
    }

    /// Current presence
    pub fn is_present(&self) -> bool {
        self.present.load(Ordering::SeqCst)
    }

    /// Subscribe to presence changes
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl AuthPredicate for SessionFlag {
    fn is_authenticated(&self) -> bool {
        self.is_present()
    }
}
