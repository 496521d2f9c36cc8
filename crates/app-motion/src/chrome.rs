//! Nav bar show/hide animation
//!
//! [`NavChrome`] is the single engine-side subscriber of the visibility bus.
//! It keeps the derived hidden flag and eases the bar toward it; a new
//! request mid-animation retargets from wherever the bar currently is.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use app_state::{Subscription, VisibilityBus, VisibilityEvent};

use crate::easing::Easing;
use crate::scalar::AnimatedScalar;
use crate::tokens::{layout, motion};

/// Nav bar animation settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeConfig {
    /// Show/hide duration
    pub duration: Duration,
    /// Curve
    pub easing: Easing,
    /// Distance the bar travels when hiding
    pub bar_height: f32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            duration: motion::CHROME,
            easing: Easing::DEFAULT,
            bar_height: layout::NAV_BAR_HEIGHT,
        }
    }
}

/// Animated nav bar driven by the visibility bus
pub struct NavChrome {
    config: ChromeConfig,
    requested_hidden: Arc<AtomicBool>,
    hidden: bool,
    /// 0 = fully shown, 1 = fully hidden
    amount: AnimatedScalar,
    _subscription: Subscription,
}

impl std::fmt::Debug for NavChrome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavChrome")
            .field("hidden", &self.hidden)
            .field("amount", &self.amount.value())
            .finish()
    }
}

impl NavChrome {
    /// Subscribe to `bus`, starting in whatever state the bus reports
    pub fn attach(bus: &VisibilityBus, config: ChromeConfig) -> Self {
        let hidden = bus.is_hidden();
        let requested_hidden = Arc::new(AtomicBool::new(hidden));

        let flag = Arc::clone(&requested_hidden);
        let subscription = bus.subscribe(move |event: VisibilityEvent| {
            flag.store(event.is_hide(), Ordering::SeqCst);
        });

        Self {
            config,
            requested_hidden,
            hidden,
            amount: AnimatedScalar::new(if hidden { 1.0 } else { 0.0 }),
            _subscription: subscription,
        }
    }

    /// Advance the animation, picking up any request published since the
    /// last tick
    pub fn tick(&mut self, dt: Duration) {
        let requested = self.requested_hidden.load(Ordering::SeqCst);
        if requested != self.hidden {
            tracing::debug!(hidden = requested, "nav chrome retarget");
            self.hidden = requested;
            let target = if requested { 1.0 } else { 0.0 };
            self.amount
                .animate_to(target, self.config.duration, self.config.easing);
        }
        self.amount.tick(dt);
    }

    /// Derived state: whether the bar is (or is heading) hidden
    pub fn is_hidden(&self) -> bool {
        self.requested_hidden.load(Ordering::SeqCst)
    }

    /// Whether the bar is moving
    pub fn is_animating(&self) -> bool {
        self.amount.is_animating() || self.is_hidden() != self.hidden
    }

    /// Downward translation of the bar
    pub fn offset_y(&self) -> f32 {
        self.amount.interpolate(0.0, self.config.bar_height)
    }

    /// Bar opacity
    pub fn opacity(&self) -> f32 {
        self.amount.interpolate(1.0, 0.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> ChromeConfig {
        ChromeConfig {
            duration: Duration::from_millis(200),
            easing: Easing::LINEAR,
            bar_height: 64.0,
        }
    }

    #[test]
    fn test_hide_animates_rather_than_snaps() {
        let bus = VisibilityBus::default();
        let mut chrome = NavChrome::attach(&bus, linear());
        assert_eq!(chrome.opacity(), 1.0);

        bus.hide();
        assert!(chrome.is_hidden());
        assert_eq!(chrome.offset_y(), 0.0);

        chrome.tick(Duration::from_millis(100));
        assert!((chrome.offset_y() - 32.0).abs() < 0.01);
        assert!((chrome.opacity() - 0.5).abs() < 1e-3);

        chrome.tick(Duration::from_millis(100));
        assert_eq!(chrome.offset_y(), 64.0);
        assert_eq!(chrome.opacity(), 0.0);
        assert!(!chrome.is_animating());
    }

    #[test]
    fn test_show_mid_hide_retargets() {
        let bus = VisibilityBus::default();
        let mut chrome = NavChrome::attach(&bus, linear());

        bus.hide();
        chrome.tick(Duration::from_millis(100));
        bus.show();
        chrome.tick(Duration::from_millis(100));

        // halfway back from 32
        assert!((chrome.offset_y() - 16.0).abs() < 0.01);
        chrome.tick(Duration::from_millis(100));
        assert_eq!(chrome.offset_y(), 0.0);
    }

    #[test]
    fn test_repeated_hide_is_stable() {
        let bus = VisibilityBus::default();
        let mut chrome = NavChrome::attach(&bus, linear());
        bus.hide();
        chrome.tick(Duration::from_millis(200));
        bus.hide();
        chrome.tick(Duration::from_millis(50));
        assert_eq!(chrome.offset_y(), 64.0);
    }

    #[test]
    fn test_subscribes_once_and_releases_on_drop() {
        let bus = VisibilityBus::default();
        let chrome = NavChrome::attach(&bus, ChromeConfig::default());
        assert_eq!(bus.subscriber_count(), 1);
        drop(chrome);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_attach_to_hidden_bus() {
        let bus = VisibilityBus::default();
        bus.hide();
        let chrome = NavChrome::attach(&bus, linear());
        assert!(chrome.is_hidden());
        assert_eq!(chrome.opacity(), 0.0);
    }
}
