//! Wordhoard navigation engine
//!
//! Client-side router for the Wordhoard vocabulary app. It owns the per-tab
//! screen stacks, animates transitions between screens, presents overlay
//! routes as a draggable bottom sheet, gates screens behind a session, and
//! hides or shows the nav bar on request.
//!
//! The pieces live in their own crates:
//! - `app-navigation` - routes, stacks, tabs, screen resolution and caching
//! - `app-motion` - transitions, the overlay sheet and nav bar animation
//! - `app-state` - visibility bus and session flag
//!
//! This crate ties them together in [`Navigator`].
//!
//! # Example
//!
//! ```rust
//! use std::any::Any;
//! use std::time::Duration;
//! use wordhoard::{screen_factory, Navigator, NavigatorConfig, Screen, ScreenResolver};
//!
//! struct Page(&'static str);
//!
//! impl Screen for Page {
//!     fn name(&self) -> &str {
//!         self.0
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! let resolver = ScreenResolver::new(screen_factory(|_| Page("home")))
//!     .route("/vault", screen_factory(|_| Page("vault")))
//!     .prefix("/vault-word", screen_factory(|_| Page("word")));
//!
//! let mut nav = Navigator::new(resolver, NavigatorConfig::default());
//! nav.push("/vault");
//! nav.push("/vault-word?id=42");
//! assert!(nav.is_transitioning());
//!
//! nav.tick(Duration::from_millis(300));
//! assert_eq!(nav.frame().base.screen.name(), "word");
//! assert_eq!(nav.current_params().get("id").map(String::as_str), Some("42"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod frame;
pub mod navigator;

pub use config::{ConfigError, NavigatorConfig};
pub use frame::{Frame, Layer, NavBar, OutgoingLayer, SheetLayer};
pub use navigator::{NavEvent, Navigator, SharedNavigator};

pub use app_motion::{
    Direction, Easing, Offset, SheetPhase, TransitionKind, TransitionTable, Viewport,
};
pub use app_navigation::{
    normalize, same_instance, screen_factory, AuthGate, Feature, GateView, GatedScreen,
    InputFocus, NavAction, Route, RouteParams, Screen, ScreenContext, ScreenFactory, ScreenHandle,
    ScreenResolver, SignUpPrompt, Tab, REDIRECT_PARAM,
};
pub use app_state::{AuthPredicate, SessionFlag, VisibilityBus, VisibilityEvent};

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber honouring `RUST_LOG` (default `info`)
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
