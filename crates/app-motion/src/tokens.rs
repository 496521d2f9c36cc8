//! Motion tokens
//!
//! Shared durations, curves and gesture thresholds so every animated part of
//! the navigation engine moves on the same scale.

use std::time::Duration;

// =============================================================================
// Duration Tokens
// =============================================================================

/// Animation durations (ms)
pub mod duration {
    /// Instant (0ms)
    pub const INSTANT: u64 = 0;
    /// Extra fast (50ms)
    pub const EXTRA_FAST: u64 = 50;
    /// Fast (100ms)
    pub const FAST: u64 = 100;
    /// Normal (150ms)
    pub const NORMAL: u64 = 150;
    /// Moderate (200ms)
    pub const MODERATE: u64 = 200;
    /// Slow (300ms)
    pub const SLOW: u64 = 300;
    /// Extra slow (500ms)
    pub const EXTRA_SLOW: u64 = 500;
}

/// Durations per animated element
pub mod motion {
    use super::{duration, Duration};

    /// Screen slide
    pub const TRANSITION: Duration = Duration::from_millis(duration::SLOW);
    /// Sheet rising into view
    pub const SHEET_OPEN: Duration = Duration::from_millis(duration::SLOW);
    /// Sheet leaving; shorter than opening
    pub const SHEET_CLOSE: Duration = Duration::from_millis(duration::MODERATE);
    /// Sheet returning to open after a short drag
    pub const SPRING_BACK: Duration = Duration::from_millis(duration::MODERATE);
    /// Nav bar show/hide
    pub const CHROME: Duration = Duration::from_millis(duration::MODERATE);
    /// Force a stuck sheet close after this long
    pub const SHEET_CLOSE_TIMEOUT: Duration = Duration::from_millis(1000);
}

// =============================================================================
// Easing Tokens
// =============================================================================

/// Easing functions
pub mod easing {
    use crate::easing::Easing;

    /// Default easing curve
    pub const DEFAULT: Easing = Easing::DEFAULT;
    /// Linear
    pub const LINEAR: Easing = Easing::LINEAR;
    /// Ease in
    pub const EASE_IN: Easing = Easing::EASE_IN;
    /// Ease out
    pub const EASE_OUT: Easing = Easing::EASE_OUT;
    /// Ease in out
    pub const EASE_IN_OUT: Easing = Easing::EASE_IN_OUT;
    /// Bounce
    pub const BOUNCE: Easing = Easing::BOUNCE;
}

// =============================================================================
// Gesture Tokens
// =============================================================================

/// Sheet drag thresholds
pub mod gesture {
    /// Release below this far (px) dismisses the sheet
    pub const DISMISS_DISTANCE: f32 = 140.0;
    /// Release faster than this (px/ms) downward dismisses the sheet
    pub const DISMISS_VELOCITY: f32 = 1.0;
}

// =============================================================================
// Layout Tokens
// =============================================================================

/// Default viewport and chrome sizes (pt)
pub mod layout {
    /// Viewport width
    pub const SCREEN_WIDTH: f32 = 390.0;
    /// Viewport height
    pub const SCREEN_HEIGHT: f32 = 844.0;
    /// Overlay sheet height
    pub const SHEET_HEIGHT: f32 = 560.0;
    /// Bottom nav bar height
    pub const NAV_BAR_HEIGHT: f32 = 64.0;
}
