//! Overlay sheet controller
//!
//! Overlay routes (the translation panel, for example) are presented as a
//! bottom sheet above whatever screen is underneath. The sheet follows the
//! route: entering an overlay path opens it, leaving one closes it, and a
//! downward drag from the top of its content can dismiss it.
//!
//! ```text
//!  closed ──► opening ──► open ──► dragging ──► open (spring back)
//!    ▲                     │           │
//!    └────── closing ◄─────┴───────────┘ (dismiss)
//! ```
//!
//! Completion is observed in [`OverlaySheet::tick`], which reports
//! [`SheetEvent::Closed`] so the owner can pop the overlay route if it is
//! still on top of its tab's stack.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use app_navigation::{Route, Tab};

use crate::easing::Easing;
use crate::scalar::{AnimatedScalar, Tick};
use crate::tokens::{gesture, layout, motion};

/// Backdrop opacity when the sheet is fully open
const BACKDROP_MAX_OPACITY: f32 = 0.5;

/// Sheet lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SheetPhase {
    /// Not shown
    #[default]
    Closed,
    /// Rising into view
    Opening,
    /// Fully shown (possibly settling after a spring back)
    Open,
    /// Following the user's finger
    Dragging,
    /// Leaving
    Closing,
}

impl SheetPhase {
    /// Whether the sheet is on screen
    pub fn is_visible(self) -> bool {
        self != SheetPhase::Closed
    }
}

/// Completion reported by [`OverlaySheet::tick`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetEvent {
    /// The open animation finished
    Opened {
        /// Route shown in the sheet
        route: Route,
    },
    /// The sheet is gone
    Closed {
        /// Route that was shown in the sheet
        route: Route,
        /// Tab whose stack holds the route
        tab: Tab,
    },
}

/// Sheet timing, geometry and gesture thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Opening duration
    pub open_duration: Duration,
    /// Closing duration
    pub close_duration: Duration,
    /// Spring back duration after a short drag
    pub spring_back_duration: Duration,
    /// Curve for automatic movement
    pub easing: Easing,
    /// Sheet height used to normalise drag distance
    pub sheet_height: f32,
    /// Release below this distance dismisses
    pub dismiss_distance: f32,
    /// Release faster than this downward velocity dismisses
    pub dismiss_velocity: f32,
    /// Force `closing -> closed` after this much tick time
    pub close_timeout: Option<Duration>,
    /// Paths presented as a sheet
    pub overlay_paths: Vec<String>,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            open_duration: motion::SHEET_OPEN,
            close_duration: motion::SHEET_CLOSE,
            spring_back_duration: motion::SPRING_BACK,
            easing: Easing::DEFAULT,
            sheet_height: layout::SHEET_HEIGHT,
            dismiss_distance: gesture::DISMISS_DISTANCE,
            dismiss_velocity: gesture::DISMISS_VELOCITY,
            close_timeout: Some(motion::SHEET_CLOSE_TIMEOUT),
            overlay_paths: vec!["/translate".to_string()],
        }
    }
}

/// Gesture-driven bottom sheet state machine
#[derive(Debug, Clone)]
pub struct OverlaySheet {
    config: SheetConfig,
    phase: SheetPhase,
    progress: AnimatedScalar,
    route: Option<Route>,
    tab: Tab,
    /// Set once a close starts; later close requests are no-ops
    close_latch: bool,
    closing_for: Duration,
    at_top: bool,
    interaction_locked: bool,
}

impl Default for OverlaySheet {
    fn default() -> Self {
        Self::new(SheetConfig::default())
    }
}

impl OverlaySheet {
    /// Create a closed sheet
    pub fn new(config: SheetConfig) -> Self {
        Self {
            config,
            phase: SheetPhase::Closed,
            progress: AnimatedScalar::new(0.0),
            route: None,
            tab: Tab::default(),
            close_latch: false,
            closing_for: Duration::ZERO,
            at_top: true,
            interaction_locked: false,
        }
    }

    /// Whether `path` is presented as a sheet
    pub fn is_overlay_path(&self, path: &str) -> bool {
        let path = path.split('?').next().unwrap_or(path);
        self.config.overlay_paths.iter().any(|p| p == path)
    }

    /// Follow a change of the active top route
    pub fn on_route_change(&mut self, previous: &Route, current: &Route, tab: Tab) {
        let entering = self.is_overlay_path(current.path());

        match (entering, self.phase) {
            (true, SheetPhase::Closed | SheetPhase::Closing) => self.open(current.clone(), tab),
            (true, _) => {
                // overlay to overlay: keep the sheet, swap its content
                tracing::debug!(from = %previous, to = %current, "sheet route updated");
                self.route = Some(current.clone());
                self.tab = tab;
            }
            (false, SheetPhase::Closed | SheetPhase::Closing) => {}
            (false, _) => {
                self.close();
            }
        }
    }

    /// Start opening with `route` as content
    ///
    /// Opening from `closing` reverses from the current progress.
    pub fn open(&mut self, route: Route, tab: Tab) {
        tracing::debug!(%route, ?tab, "sheet opening");
        self.phase = SheetPhase::Opening;
        self.route = Some(route);
        self.tab = tab;
        self.close_latch = false;
        self.progress
            .animate_to(1.0, self.config.open_duration, self.config.easing);
    }

    /// Start closing; returns false when a close is already under way
    pub fn close(&mut self) -> bool {
        if self.close_latch || !self.phase.is_visible() || self.phase == SheetPhase::Closing {
            tracing::debug!(phase = ?self.phase, "duplicate sheet close ignored");
            return false;
        }

        tracing::debug!(route = ?self.route.as_ref().map(Route::to_string), "sheet closing");
        self.close_latch = true;
        self.phase = SheetPhase::Closing;
        self.closing_for = Duration::ZERO;
        self.progress
            .animate_to(0.0, self.config.close_duration, self.config.easing);
        true
    }

    /// Whether the sheet's content is scrolled to its top
    pub fn set_at_top(&mut self, at_top: bool) {
        self.at_top = at_top;
    }

    /// Block drag recognition
    pub fn set_interaction_locked(&mut self, locked: bool) {
        self.interaction_locked = locked;
    }

    /// Feed a drag movement sample (offsets from the touch start)
    ///
    /// Returns whether the sheet is following the drag.
    pub fn drag_move(&mut self, dx: f32, dy: f32) -> bool {
        if self.phase == SheetPhase::Open {
            let recognised = self.at_top
                && !self.interaction_locked
                && dy > 0.0
                && dy.abs() > dx.abs();
            if !recognised {
                return false;
            }
            tracing::trace!(dy, "sheet drag start");
            self.phase = SheetPhase::Dragging;
        }

        if self.phase != SheetPhase::Dragging {
            return false;
        }

        self.progress
            .set((1.0 - dy / self.config.sheet_height).clamp(0.0, 1.0));
        true
    }

    /// End a drag; returns true when the release dismissed the sheet
    pub fn drag_release(&mut self, dy: f32, velocity_y: f32) -> bool {
        if self.phase != SheetPhase::Dragging {
            return false;
        }

        if dy > self.config.dismiss_distance || velocity_y > self.config.dismiss_velocity {
            tracing::debug!(dy, velocity_y, "sheet dismissed by drag");
            return self.close();
        }

        tracing::debug!(dy, velocity_y, "sheet spring back");
        self.phase = SheetPhase::Open;
        self.progress
            .animate_to(1.0, self.config.spring_back_duration, self.config.easing);
        false
    }

    /// Advance animations by `dt`
    pub fn tick(&mut self, dt: Duration) -> Option<SheetEvent> {
        match self.phase {
            SheetPhase::Closed | SheetPhase::Dragging => None,
            SheetPhase::Open => {
                self.progress.tick(dt);
                None
            }
            SheetPhase::Opening => match self.progress.tick(dt) {
                Tick::Finished => {
                    self.phase = SheetPhase::Open;
                    let route = self.route.clone()?;
                    tracing::debug!(%route, "sheet open");
                    Some(SheetEvent::Opened { route })
                }
                Tick::Running | Tick::Idle => None,
            },
            SheetPhase::Closing => {
                self.closing_for += dt;
                let finished = self.progress.tick(dt) == Tick::Finished;
                let timed_out = self
                    .config
                    .close_timeout
                    .is_some_and(|timeout| self.closing_for >= timeout);

                if !finished && !timed_out {
                    return None;
                }
                if !finished {
                    tracing::warn!(elapsed_ms = self.closing_for.as_millis() as u64, "sheet close forced");
                }
                self.finish_close()
            }
        }
    }

    fn finish_close(&mut self) -> Option<SheetEvent> {
        self.phase = SheetPhase::Closed;
        self.progress.set(0.0);
        self.close_latch = false;
        self.closing_for = Duration::ZERO;

        let route = self.route.take()?;
        tracing::debug!(%route, "sheet closed");
        Some(SheetEvent::Closed {
            route,
            tab: self.tab,
        })
    }

    /// Current phase
    pub fn phase(&self) -> SheetPhase {
        self.phase
    }

    /// 0 (hidden) to 1 (fully open)
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Route shown in the sheet; `Some` exactly while visible
    pub fn sheet_route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Tab the sheet route belongs to
    pub fn sheet_tab(&self) -> Option<Tab> {
        self.route.as_ref().map(|_| self.tab)
    }

    /// Downward translation of the sheet
    pub fn offset_y(&self) -> f32 {
        (1.0 - self.progress.value()) * self.config.sheet_height
    }

    /// Opacity of the dimming layer behind the sheet
    pub fn backdrop_opacity(&self) -> f32 {
        self.progress.value().clamp(0.0, 1.0) * BACKDROP_MAX_OPACITY
    }

    /// Configuration in use
    pub fn config(&self) -> &SheetConfig {
        &self.config
    }
}
