//! Navigation core for Wordhoard
//!
//! This crate provides the stateful half of the client-side router:
//! - Route model (path + query params) with normalization and route keys
//! - Per-tab navigation stacks with history preservation
//! - Screen resolution with a home fallback
//! - Authentication gate for screens that need a session
//! - Screen instance cache so hidden screens keep their state
//!
//! Animation and gesture handling live in `app-motion`; the two are tied
//! together by the `Navigator` in the root crate.
//!
//! # Example
//!
//! ```rust
//! use app_navigation::{Route, Tab, TabManager};
//!
//! let mut tabs = TabManager::new();
//! tabs.push("/vault");
//! tabs.push("/vault-word?id=42");
//! assert_eq!(tabs.current_route().param("id"), Some("42"));
//!
//! tabs.back();
//! assert_eq!(tabs.current_path(), "/vault");
//!
//! tabs.switch_tab(Tab::Quiz, Route::new("/quiz/learn"));
//! assert_eq!(tabs.active_stack().depth(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod action;
pub mod auth_gate;
pub mod error;
pub mod focus;
pub mod resolver;
pub mod route;
pub mod screen;
pub mod screen_cache;
pub mod stack;
pub mod tab_manager;
pub mod tabs;

pub use action::NavAction;
pub use auth_gate::{
    AuthGate, Feature, GateView, GatedScreen, SignUpPrompt, DEFAULT_SIGN_UP_PATH, REDIRECT_PARAM,
};
pub use error::{Result, RouteError};
pub use focus::{InputFocus, NoFocus};
pub use resolver::{Resolution, ScreenResolver};
pub use route::{normalize, Route, RouteParams};
pub use screen::{same_instance, screen_factory, Screen, ScreenContext, ScreenFactory, ScreenHandle};
pub use screen_cache::ScreenCache;
pub use stack::{NavigationStack, StackEntry};
pub use tab_manager::{ChangeKind, StackChange, TabManager, DEFAULT_OVERLAY_ONLY};
pub use tabs::{tab_for_path, Tab};
