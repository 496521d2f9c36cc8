//! Screen transition animator
//!
//! Watches stack changes and, when a change qualifies, slides the previous
//! top screen out over the new one. The new screen is already mounted
//! underneath; only the outgoing layer moves.
//!
//! ```text
//!   idle ──(qualifying change)──► animating ──(progress = 1)──► idle
//!                                   │   ▲
//!                                   └───┘ qualifying change: reset to 0, restart
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use app_navigation::{Route, StackChange};

use crate::easing::Easing;
use crate::scalar::{AnimatedScalar, Tick};
use crate::tokens::{layout, motion};

/// How a stack change is animated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Slide along x
    Horizontal,
    /// Slide along y
    Vertical,
    /// No animation
    #[default]
    None,
}

/// Whether the change went deeper or came back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Push or replace
    Forward,
    /// Back
    Backward,
}

impl Direction {
    /// Sign of the outgoing layer's travel: forward exits toward negative
    /// x / y, backward toward positive
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => -1.0,
            Direction::Backward => 1.0,
        }
    }
}

/// Screen size used to turn progress into a translation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: layout::SCREEN_WIDTH,
            height: layout::SCREEN_HEIGHT,
        }
    }
}

/// 2D translation of a layer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// translateX
    pub x: f32,
    /// translateY
    pub y: f32,
}

// =============================================================================
// Classification
// =============================================================================

/// Wildcard matching any path in a rule
pub const ANY_PATH: &str = "*";

#[derive(Debug, Clone, PartialEq, Eq)]
struct TransitionRule {
    a: String,
    b: String,
    kind: TransitionKind,
}

impl TransitionRule {
    fn matches(&self, from: &Route, to: &Route) -> bool {
        let hit = |pattern: &str, route: &Route| pattern == ANY_PATH || route.is_under(pattern);
        (hit(&self.a, from) && hit(&self.b, to)) || (hit(&self.b, from) && hit(&self.a, to))
    }
}

/// Predicate table classifying a (previous, next) pair of top routes
///
/// Rules are symmetric and checked in order; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    rules: Vec<TransitionRule>,
}

impl Default for TransitionTable {
    fn default() -> Self {
        Self::new()
            .rule("/vault", "/vault-word", TransitionKind::Horizontal)
            .rule("/vault-word", "/vault-word", TransitionKind::Horizontal)
            .rule("/quiz", "/quiz", TransitionKind::Horizontal)
            .rule("/stories", "/story", TransitionKind::Horizontal)
            .rule("/story", "/story", TransitionKind::Horizontal)
            .rule(ANY_PATH, "/paywall", TransitionKind::Vertical)
            .rule(ANY_PATH, "/signup", TransitionKind::Vertical)
    }
}

impl TransitionTable {
    /// Empty table; everything classifies as [`TransitionKind::None`]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a symmetric rule between two path prefixes (`*` matches any path)
    pub fn rule(mut self, a: &str, b: &str, kind: TransitionKind) -> Self {
        self.rules.push(TransitionRule {
            a: a.to_string(),
            b: b.to_string(),
            kind,
        });
        self
    }

    /// Classify a change of top route
    ///
    /// Identical routes are classified like any other pair: pushing a route
    /// onto itself still slides.
    pub fn classify(&self, previous: &Route, next: &Route) -> TransitionKind {
        self.rules
            .iter()
            .find(|rule| rule.matches(previous, next))
            .map_or(TransitionKind::None, |rule| rule.kind)
    }
}

// =============================================================================
// Animator
// =============================================================================

/// An in-flight transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionJob {
    /// Slide axis
    pub kind: TransitionKind,
    /// Travel direction
    pub direction: Direction,
    /// Route of the outgoing layer
    pub from_route: Route,
    /// Route now on top
    pub to_route: Route,
    /// 0 → 1 over the transition
    pub progress: AnimatedScalar,
}

impl TransitionJob {
    /// Translation of the outgoing layer at the current progress
    pub fn offset(&self, viewport: Viewport) -> Offset {
        let travel = self.progress.value() * self.direction.sign();
        match self.kind {
            TransitionKind::Horizontal => Offset {
                x: travel * viewport.width,
                y: 0.0,
            },
            TransitionKind::Vertical => Offset {
                x: 0.0,
                y: travel * viewport.height,
            },
            TransitionKind::None => Offset::default(),
        }
    }
}

/// Drives the outgoing-layer slide for qualifying stack changes
#[derive(Debug, Clone)]
pub struct TransitionAnimator {
    table: TransitionTable,
    duration: Duration,
    easing: Easing,
    viewport: Viewport,
    job: Option<TransitionJob>,
}

impl Default for TransitionAnimator {
    fn default() -> Self {
        Self::new(TransitionTable::default())
    }
}

impl TransitionAnimator {
    /// Create an idle animator
    pub fn new(table: TransitionTable) -> Self {
        Self {
            table,
            duration: motion::TRANSITION,
            easing: Easing::DEFAULT,
            viewport: Viewport::default(),
            job: None,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the viewport
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// React to a stack change
    ///
    /// A qualifying change starts a job, superseding any job in flight (its
    /// progress restarts from 0 against the new pair). Tab switches and
    /// non-qualifying changes cancel the job in flight, since its outgoing
    /// layer no longer sits above the right screen.
    pub fn on_change(&mut self, change: &StackChange) -> Option<&TransitionJob> {
        let unchanged = !change.top_changed() && change.depth == change.previous_depth;
        let kind = if change.tab_switched() || unchanged {
            TransitionKind::None
        } else {
            self.table.classify(&change.previous, &change.current)
        };

        if kind == TransitionKind::None {
            if self.job.take().is_some() {
                tracing::debug!(to = %change.current, "transition cancelled");
            }
            return None;
        }

        let direction = if change.is_forward() {
            Direction::Forward
        } else {
            Direction::Backward
        };

        if self.job.is_some() {
            tracing::debug!(to = %change.current, "transition superseded");
        }
        tracing::debug!(?kind, ?direction, from = %change.previous, to = %change.current, "transition start");

        let mut progress = AnimatedScalar::new(0.0);
        progress.restart(0.0, 1.0, self.duration, self.easing);

        self.job = Some(TransitionJob {
            kind,
            direction,
            from_route: change.previous.clone(),
            to_route: change.current.clone(),
            progress,
        });
        self.job.as_ref()
    }

    /// Advance the job; returns it once it completes
    pub fn tick(&mut self, dt: Duration) -> Option<TransitionJob> {
        let job = self.job.as_mut()?;
        match job.progress.tick(dt) {
            Tick::Finished => {
                tracing::trace!(to = %job.to_route, "transition finished");
                self.job.take()
            }
            Tick::Running | Tick::Idle => None,
        }
    }

    /// Drop the job in flight
    pub fn cancel(&mut self) {
        self.job = None;
    }

    /// The job in flight
    pub fn job(&self) -> Option<&TransitionJob> {
        self.job.as_ref()
    }

    /// Whether a job is in flight
    pub fn is_animating(&self) -> bool {
        self.job.is_some()
    }

    /// Outgoing layer translation, if animating
    pub fn outgoing_offset(&self) -> Option<Offset> {
        self.job.as_ref().map(|job| job.offset(self.viewport))
    }

    /// Viewport in use
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Classification table
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }
}
