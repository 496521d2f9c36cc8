//! The navigation engine
//!
//! [`Navigator`] owns the per-tab stacks, the screen cache and every
//! animation, and wires them together:
//!
//! 1. A primitive (`push`, `replace`, `back`, `switch_tab`) mutates the
//!    stacks synchronously.
//! 2. The resulting change is shown to the overlay sheet and, unless an
//!    overlay route is involved, to the transition animator, which may
//!    snapshot the previous top screen as an outgoing layer.
//! 3. [`Navigator::tick`] advances the animations and applies their
//!    completions; [`Navigator::frame`] reports what to draw.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use app_motion::{
    NavChrome, Offset, OverlaySheet, SheetEvent, SheetPhase, TransitionAnimator, TransitionTable,
};
use app_navigation::{
    InputFocus, NavAction, Route, RouteParams, ScreenCache, ScreenHandle, ScreenResolver,
    StackChange, Tab, TabManager,
};
use app_state::VisibilityBus;

use crate::config::NavigatorConfig;
use crate::frame::{Frame, Layer, NavBar, OutgoingLayer, SheetLayer};

/// Render key suffix for an outgoing screen that shares its route with the
/// base layer
const OUTGOING_SUFFIX: &str = "outgoing";

/// Completion observed during a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// A transition finished and its outgoing layer was dropped
    TransitionFinished {
        /// Route that slid in
        to: Route,
    },
    /// The sheet finished opening
    SheetOpened {
        /// Sheet route
        route: Route,
    },
    /// The sheet finished closing
    SheetClosed {
        /// Sheet route
        route: Route,
        /// Tab the route belonged to
        tab: Tab,
    },
    /// The closed sheet's route was still on top of the active stack and was popped
    OverlayPopped {
        /// Popped route
        route: Route,
    },
}

/// Navigator shared between the renderer and screens
pub type SharedNavigator = Arc<Mutex<Navigator>>;

struct Outgoing {
    route: Route,
    render_key: String,
    screen: ScreenHandle,
}

/// Client-side navigation and overlay presentation engine
pub struct Navigator {
    config: NavigatorConfig,
    tabs: TabManager,
    cache: ScreenCache,
    transition: TransitionAnimator,
    outgoing: Option<Outgoing>,
    sheet: OverlaySheet,
    chrome: NavChrome,
    bus: VisibilityBus,
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("tabs", &self.tabs)
            .field("cache", &self.cache)
            .field("transition", &self.transition.job())
            .field("sheet", &self.sheet.phase())
            .field("chrome", &self.chrome)
            .finish_non_exhaustive()
    }
}

impl Navigator {
    /// Create a navigator on the home tab at `/`
    ///
    /// An invalid config is logged and used as-is; use [`Navigator::try_new`]
    /// to reject it instead.
    pub fn new(resolver: ScreenResolver, config: NavigatorConfig) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!(error = %err, "navigator config failed validation");
        }
        Self::build(resolver, config)
    }

    /// Create a navigator, rejecting a config that fails validation
    pub fn try_new(resolver: ScreenResolver, config: NavigatorConfig) -> crate::config::Result<Self> {
        config.validate()?;
        Ok(Self::build(resolver, config))
    }

    fn build(resolver: ScreenResolver, config: NavigatorConfig) -> Self {
        let cache = match config.cache_capacity() {
            Some(capacity) => ScreenCache::with_capacity(resolver, capacity),
            None => ScreenCache::new(resolver),
        };
        let bus = VisibilityBus::default();
        let chrome = NavChrome::attach(&bus, config.chrome_config());

        Self {
            tabs: TabManager::new().with_overlay_only(config.overlay_only_paths.clone()),
            cache,
            transition: Self::animator(&config, TransitionTable::default()),
            outgoing: None,
            sheet: OverlaySheet::new(config.sheet_config()),
            chrome,
            bus,
            config,
        }
    }

    fn animator(config: &NavigatorConfig, table: TransitionTable) -> TransitionAnimator {
        TransitionAnimator::new(table)
            .with_duration(config.transition_duration())
            .with_easing(config.easing)
            .with_viewport(config.viewport())
    }

    /// Listen on a specific visibility bus instead of a private one
    pub fn with_bus(mut self, bus: VisibilityBus) -> Self {
        self.chrome = NavChrome::attach(&bus, self.config.chrome_config());
        self.bus = bus;
        self
    }

    /// Set the hook that dismisses text input focus before each primitive
    pub fn with_focus(mut self, focus: Arc<dyn InputFocus>) -> Self {
        self.tabs = self.tabs.with_focus(focus);
        self
    }

    /// Replace the transition classification table
    pub fn with_transition_table(mut self, table: TransitionTable) -> Self {
        self.transition = Self::animator(&self.config, table);
        self
    }

    /// Wrap for sharing across owners
    pub fn into_shared(self) -> SharedNavigator {
        Arc::new(Mutex::new(self))
    }

    // -------------------------------------------------------------------------
    // Primitives
    // -------------------------------------------------------------------------

    /// Push a route onto the active tab
    pub fn push(&mut self, route: impl Into<Route>) {
        let change = self.tabs.push(route);
        self.apply(change);
    }

    /// Replace the top of the active tab
    pub fn replace(&mut self, route: impl Into<Route>) {
        let change = self.tabs.replace(route);
        self.apply(change);
    }

    /// Go back; returns false when already at the stack root
    pub fn back(&mut self) -> bool {
        match self.tabs.back() {
            Some(change) => {
                self.apply(change);
                true
            }
            None => false,
        }
    }

    /// Switch tabs
    pub fn switch_tab(&mut self, tab: Tab, default_route: impl Into<Route>) {
        let change = self.tabs.switch_tab(tab, default_route);
        self.apply(change);
    }

    /// Run a navigation action
    pub fn dispatch(&mut self, action: &NavAction) {
        tracing::debug!(?action, "dispatch");
        match action {
            NavAction::Push { route } => self.push(route),
            NavAction::Replace { route } => self.replace(route),
            NavAction::Back => {
                self.back();
            }
            NavAction::SwitchTab { tab, default_route } => self.switch_tab(*tab, default_route),
        }
    }

    fn apply(&mut self, change: StackChange) {
        self.sheet
            .on_route_change(&change.previous, &change.current, change.tab);

        // The sheet presents overlay routes; the base layer does not move
        let involves_overlay = self.sheet.is_overlay_path(change.previous.path())
            || self.sheet.is_overlay_path(change.current.path());
        if involves_overlay {
            return;
        }

        let started = self.transition.on_change(&change).is_some();
        self.outgoing = if started {
            Some(self.snapshot_outgoing(&change.previous))
        } else {
            None
        };
    }

    fn snapshot_outgoing(&mut self, route: &Route) -> Outgoing {
        let key = route.route_key();

        if self.base_route().route_key() == key {
            Outgoing {
                render_key: format!("{}#{}", key, OUTGOING_SUFFIX),
                screen: self.cache.clone_for_concurrent_display(route, OUTGOING_SUFFIX),
                route: route.clone(),
            }
        } else {
            Outgoing {
                render_key: key,
                screen: self.cache.get_element(route),
                route: route.clone(),
            }
        }
    }

    /// Top-most route of the active stack that is not shown as a sheet
    fn base_route(&self) -> Route {
        self.tabs
            .active_stack()
            .entries()
            .rev()
            .map(|entry| &entry.route)
            .find(|route| !self.sheet.is_overlay_path(route.path()))
            .cloned()
            .unwrap_or_else(|| self.tabs.active_tab().root_route())
    }

    // -------------------------------------------------------------------------
    // Frame clock
    // -------------------------------------------------------------------------

    /// Advance every animation by `dt` and apply completions
    pub fn tick(&mut self, dt: Duration) -> Vec<NavEvent> {
        let mut events = Vec::new();

        if let Some(job) = self.transition.tick(dt) {
            self.outgoing = None;
            events.push(NavEvent::TransitionFinished { to: job.to_route });
        }

        self.chrome.tick(dt);

        match self.sheet.tick(dt) {
            Some(SheetEvent::Opened { route }) => events.push(NavEvent::SheetOpened { route }),
            Some(SheetEvent::Closed { route, tab }) => {
                let popped = self.tabs.pop_if_top(tab, &route);
                events.push(NavEvent::SheetClosed {
                    route: route.clone(),
                    tab,
                });
                if let Some(change) = popped {
                    self.apply(change);
                    events.push(NavEvent::OverlayPopped { route });
                }
            }
            None => {}
        }

        events
    }

    /// What to draw right now
    ///
    /// Builds (and caches) any screen that has not been constructed yet.
    pub fn frame(&mut self) -> Frame {
        let base_route = self.base_route();
        let base = Layer {
            screen: self.cache.get_element(&base_route),
            render_key: base_route.route_key(),
            route: base_route,
            offset: Offset::default(),
        };

        let outgoing = match (self.transition.job(), &self.outgoing) {
            (Some(job), Some(out)) => Some(OutgoingLayer {
                kind: job.kind,
                progress: job.progress.value(),
                layer: Layer {
                    route: out.route.clone(),
                    render_key: out.render_key.clone(),
                    screen: Arc::clone(&out.screen),
                    offset: job.offset(self.transition.viewport()),
                },
            }),
            _ => None,
        };

        let sheet = match self.sheet.sheet_route().cloned() {
            Some(route) => Some(SheetLayer {
                phase: self.sheet.phase(),
                backdrop_opacity: self.sheet.backdrop_opacity(),
                layer: Layer {
                    screen: self.cache.get_element(&route),
                    render_key: route.route_key(),
                    route,
                    offset: Offset {
                        x: 0.0,
                        y: self.sheet.offset_y(),
                    },
                },
            }),
            None => None,
        };

        Frame {
            base,
            outgoing,
            sheet,
            nav_bar: NavBar {
                active: self.tabs.active_tab(),
                offset_y: self.chrome.offset_y(),
                opacity: self.chrome.opacity(),
                hidden: self.chrome.is_hidden(),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Sheet input
    // -------------------------------------------------------------------------

    /// Close the overlay sheet; false if it is already closing or closed
    pub fn close_sheet(&mut self) -> bool {
        self.sheet.close()
    }

    /// Report whether the sheet's content is scrolled to its top
    pub fn set_sheet_at_top(&mut self, at_top: bool) {
        self.sheet.set_at_top(at_top);
    }

    /// Lock or unlock sheet drag recognition
    pub fn set_sheet_interaction_locked(&mut self, locked: bool) {
        self.sheet.set_interaction_locked(locked);
    }

    /// Feed a drag sample; true while the sheet follows the finger
    pub fn sheet_drag_move(&mut self, dx: f32, dy: f32) -> bool {
        self.sheet.drag_move(dx, dy)
    }

    /// End a drag; true when it dismissed the sheet
    pub fn sheet_drag_release(&mut self, dy: f32, velocity_y: f32) -> bool {
        self.sheet.drag_release(dy, velocity_y)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Top route of the active tab
    pub fn current_route(&self) -> &Route {
        self.tabs.current_route()
    }

    /// Path of the current route
    pub fn current_path(&self) -> &str {
        self.tabs.current_path()
    }

    /// Params of the current route
    pub fn current_params(&self) -> &RouteParams {
        self.tabs.current_params()
    }

    /// Active tab
    pub fn active_tab(&self) -> Tab {
        self.tabs.active_tab()
    }

    /// Stacks
    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    /// Screen cache
    pub fn cache(&self) -> &ScreenCache {
        &self.cache
    }

    /// Transition animator
    pub fn transition(&self) -> &TransitionAnimator {
        &self.transition
    }

    /// Whether a transition is running
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_animating()
    }

    /// Overlay sheet
    pub fn sheet(&self) -> &OverlaySheet {
        &self.sheet
    }

    /// Sheet phase
    pub fn sheet_phase(&self) -> SheetPhase {
        self.sheet.phase()
    }

    /// The visibility bus screens publish on
    pub fn bus(&self) -> &VisibilityBus {
        &self.bus
    }

    /// Configuration in use
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }
}
