//! Shared application state for Wordhoard
//!
//! This crate holds the small pieces of process-wide state the navigation
//! engine consumes from the rest of the app: the chrome visibility bus and
//! the session (authentication) predicate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;
pub mod visibility;

pub use session::{AuthPredicate, SessionFlag};
pub use visibility::{Subscription, VisibilityBus, VisibilityEvent, NAV_CHANNEL};
