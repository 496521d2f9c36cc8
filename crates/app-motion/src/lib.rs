//! Motion for the Wordhoard navigation engine
//!
//! Everything here is driven by an explicit frame clock: callers advance
//! animations with `tick(dt)` and read the resulting values. Starting,
//! retargeting or resetting an animation only records state, so it never
//! blocks the next navigation action.
//!
//! # Modules
//!
//! - [`tokens`] - Motion durations, curves and gesture thresholds
//! - [`easing`] - Easing curves
//! - [`scalar`] - Animated scalar values
//! - [`transition`] - Screen transition animator
//! - [`sheet`] - Gesture-driven overlay sheet
//! - [`chrome`] - Nav bar show/hide animation
//!
//! # Example
//!
//! ```rust
//! use app_motion::{AnimatedScalar, Easing};
//! use std::time::Duration;
//!
//! let mut progress = AnimatedScalar::new(0.0);
//! progress.animate_to(1.0, Duration::from_millis(300), Easing::LINEAR);
//! progress.tick(Duration::from_millis(150));
//! assert!((progress.value() - 0.5).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod chrome;
pub mod easing;
pub mod scalar;
pub mod sheet;
pub mod tokens;
pub mod transition;

pub use chrome::{ChromeConfig, NavChrome};
pub use easing::{Easing, EasingParseError};
pub use scalar::{AnimatedScalar, Tick};
pub use sheet::{OverlaySheet, SheetConfig, SheetEvent, SheetPhase};
pub use transition::{
    Direction, Offset, TransitionAnimator, TransitionJob, TransitionKind, TransitionTable,
    Viewport,
};
