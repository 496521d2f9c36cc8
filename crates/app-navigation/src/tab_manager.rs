//! Stack & tab manager
//!
//! Owns one [`NavigationStack`] per tab and the active-tab pointer. The
//! active stack is held directly; inactive tabs are kept as snapshots and
//! restored when the user switches back.
//!
//! Every mutation dismisses text-input focus before touching the stacks and
//! reports a [`StackChange`] describing the old and new top routes, which the
//! transition animator classifies.

use std::collections::HashMap;
use std::sync::Arc;

use crate::focus::{InputFocus, NoFocus};
use crate::route::{Route, RouteParams};
use crate::stack::NavigationStack;
use crate::tabs::{tab_for_path, Tab};

/// Default overlay-only paths
pub const DEFAULT_OVERLAY_ONLY: &[&str] = &["/translate"];

/// Which primitive produced a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// `push`
    Push,
    /// `replace`
    Replace,
    /// `back`
    Back,
    /// `switch_tab`
    SwitchTab,
    /// Overlay route removed after its sheet closed
    OverlayDismissed,
}

/// Before/after view of a stack mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackChange {
    /// Primitive that caused the change
    pub kind: ChangeKind,
    /// Top route before the change
    pub previous: Route,
    /// Top route after the change
    pub current: Route,
    /// Active stack depth before the change
    pub previous_depth: usize,
    /// Active stack depth after the change
    pub depth: usize,
    /// Active tab before the change
    pub previous_tab: Tab,
    /// Active tab after the change
    pub tab: Tab,
}

impl StackChange {
    /// Whether the active tab changed
    pub fn tab_switched(&self) -> bool {
        self.previous_tab != self.tab
    }

    /// Whether the top route changed
    pub fn top_changed(&self) -> bool {
        self.previous != self.current
    }

    /// Whether the change moved deeper into the stack
    ///
    /// Replacements count as forward.
    pub fn is_forward(&self) -> bool {
        match self.kind {
            ChangeKind::Push | ChangeKind::Replace => true,
            ChangeKind::Back | ChangeKind::OverlayDismissed => false,
            ChangeKind::SwitchTab => self.depth >= self.previous_depth,
        }
    }
}

/// Per-tab stacks plus the active-tab pointer
pub struct TabManager {
    /// Active tab
    active: Tab,
    /// Stack of the active tab
    active_stack: NavigationStack,
    /// Snapshots of inactive tabs
    saved: HashMap<Tab, NavigationStack>,
    /// Routes that only make sense as a transient overlay
    overlay_only: Vec<String>,
    /// Focus dismissal hook
    focus: Arc<dyn InputFocus>,
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TabManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabManager")
            .field("active", &self.active)
            .field("active_stack", &self.active_stack)
            .field("saved", &self.saved.keys().collect::<Vec<_>>())
            .field("overlay_only", &self.overlay_only)
            .finish_non_exhaustive()
    }
}

impl TabManager {
    /// Start on the home tab at `/`
    pub fn new() -> Self {
        Self::starting_at(Tab::Home, Tab::Home.root_route())
    }

    /// Start on a specific tab and route
    pub fn starting_at(tab: Tab, route: impl Into<Route>) -> Self {
        Self {
            active: tab,
            active_stack: NavigationStack::new(route.into()),
            saved: HashMap::new(),
            overlay_only: DEFAULT_OVERLAY_ONLY.iter().map(|p| p.to_string()).collect(),
            focus: Arc::new(NoFocus),
        }
    }

    /// Set the overlay-only paths
    pub fn with_overlay_only<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overlay_only = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the focus dismissal hook
    pub fn with_focus(mut self, focus: Arc<dyn InputFocus>) -> Self {
        self.focus = focus;
        self
    }

    // -------------------------------------------------------------------------
    // Primitives
    // -------------------------------------------------------------------------

    /// Push a route onto the active stack
    pub fn push(&mut self, route: impl Into<Route>) -> StackChange {
        self.focus.dismiss();
        let route = route.into();
        tracing::debug!(tab = %self.active, route = %route, "push");

        self.record(ChangeKind::Push, |tabs| tabs.active_stack.push(route))
    }

    /// Replace the top of the active stack
    pub fn replace(&mut self, route: impl Into<Route>) -> StackChange {
        self.focus.dismiss();
        let route = route.into();
        tracing::debug!(tab = %self.active, route = %route, "replace");

        self.record(ChangeKind::Replace, |tabs| tabs.active_stack.replace(route))
    }

    /// Go back one step
    ///
    /// No-op at the stack root. If the route that would become the new top
    /// is overlay-only, it is skipped as well; when that would underflow the
    /// stack resets to the active tab's root.
    pub fn back(&mut self) -> Option<StackChange> {
        self.focus.dismiss();

        if !self.active_stack.can_go_back() {
            tracing::debug!(tab = %self.active, "back ignored at stack root");
            return None;
        }

        let lands_on_overlay = self
            .active_stack
            .peek_below(1)
            .is_some_and(|route| self.is_overlay_only(route.path()));

        Some(self.record(ChangeKind::Back, |tabs| {
            if !lands_on_overlay {
                tabs.active_stack.pop();
            } else if !tabs.active_stack.pop_n(2) {
                tracing::debug!(tab = %tabs.active, "back past overlay underflows, resetting");
                tabs.active_stack.reset(tabs.active.root_route());
            }
        }))
    }

    /// Switch to `tab`
    ///
    /// The current stack is saved under the current tab. Switching to the
    /// active tab resets it to `default_route`. Home and account always
    /// start fresh from their canonical root. Other tabs resume their saved
    /// stack, or start at `default_route` if they have none.
    pub fn switch_tab(&mut self, tab: Tab, default_route: impl Into<Route>) -> StackChange {
        self.focus.dismiss();
        let default_route = default_route.into();
        tracing::debug!(from = %self.active, to = %tab, "switch tab");

        self.record(ChangeKind::SwitchTab, |tabs| {
            let fresh_root = if tab.always_resets() {
                tab.root_route()
            } else {
                default_route
            };

            if tab == tabs.active {
                tabs.active_stack.reset(fresh_root);
                return;
            }

            let restored = tabs.saved.remove(&tab).filter(|_| !tab.always_resets());
            let next = restored.unwrap_or_else(|| NavigationStack::new(fresh_root));
            let previous = std::mem::replace(&mut tabs.active_stack, next);
            tabs.saved.insert(tabs.active, previous);
            tabs.active = tab;
        })
    }

    /// Pop `route` from `tab` if it is still that stack's top
    ///
    /// Used once an overlay sheet finishes closing. An overlay that is the
    /// stack's only entry is replaced by the tab's root. Returns a change
    /// only when the active stack was modified.
    pub fn pop_if_top(&mut self, tab: Tab, route: &Route) -> Option<StackChange> {
        if tab != self.active {
            let stack = self.saved.get_mut(&tab)?;
            if stack.current() == route {
                tracing::debug!(tab = %tab, route = %route, "dropped overlay from saved stack");
                Self::drop_top(stack, tab);
            }
            return None;
        }

        if self.active_stack.current() != route {
            return None;
        }

        tracing::debug!(tab = %tab, route = %route, "dropping closed overlay");
        Some(self.record(ChangeKind::OverlayDismissed, |tabs| {
            Self::drop_top(&mut tabs.active_stack, tab);
        }))
    }

    fn drop_top(stack: &mut NavigationStack, tab: Tab) {
        if !stack.pop() {
            tracing::debug!(tab = %tab, "overlay was the stack root, resetting");
            stack.reset(tab.root_route());
        }
    }

    fn record(&mut self, kind: ChangeKind, mutate: impl FnOnce(&mut Self)) -> StackChange {
        let previous = self.active_stack.current().clone();
        let previous_depth = self.active_stack.depth();
        let previous_tab = self.active;

        mutate(self);

        StackChange {
            kind,
            previous,
            current: self.active_stack.current().clone(),
            previous_depth,
            depth: self.active_stack.depth(),
            previous_tab,
            tab: self.active,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Active tab
    pub fn active_tab(&self) -> Tab {
        self.active
    }

    /// Stack of the active tab
    pub fn active_stack(&self) -> &NavigationStack {
        &self.active_stack
    }

    /// Stack of any tab; `None` for a tab that was never visited
    pub fn stack(&self, tab: Tab) -> Option<&NavigationStack> {
        if tab == self.active {
            Some(&self.active_stack)
        } else {
            self.saved.get(&tab)
        }
    }

    /// Top route of the active stack
    pub fn current_route(&self) -> &Route {
        self.active_stack.current()
    }

    /// Path of the current route
    pub fn current_path(&self) -> &str {
        self.current_route().path()
    }

    /// Params of the current route
    pub fn current_params(&self) -> &RouteParams {
        self.current_route().params()
    }

    /// Whether `path` is an overlay-only route
    pub fn is_overlay_only(&self, path: &str) -> bool {
        self.overlay_only.iter().any(|p| p == path)
    }

    /// Tab a path belongs to
    pub fn tab_for_route(&self, path: &str) -> Tab {
        tab_for_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::MockInputFocus;
    use proptest::prelude::*;

    fn paths(tabs: &TabManager) -> Vec<String> {
        tabs.active_stack()
            .routes()
            .into_iter()
            .map(|r| r.to_path_string())
            .collect()
    }

    #[test]
    fn test_starts_at_home() {
        let tabs = TabManager::new();
        assert_eq!(tabs.active_tab(), Tab::Home);
        assert_eq!(paths(&tabs), vec!["/"]);
    }

    #[test]
    fn test_push_normalizes_and_appends() {
        let mut tabs = TabManager::new();
        let change = tabs.push("/vault-word?id=42");

        assert_eq!(change.kind, ChangeKind::Push);
        assert_eq!(change.previous.path(), "/");
        assert_eq!(change.current.param("id"), Some("42"));
        assert_eq!(change.depth, 2);
        assert!(change.is_forward());
        assert_eq!(tabs.current_params().get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn test_replace_keeps_depth() {
        let mut tabs = TabManager::new();
        tabs.push("/vault");
        let change = tabs.replace("/quiz");

        assert_eq!(change.previous_depth, change.depth);
        assert_eq!(paths(&tabs), vec!["/", "/quiz"]);
    }

    #[test]
    fn test_back_at_root_is_noop() {
        let mut tabs = TabManager::new();
        assert!(tabs.back().is_none());
        assert_eq!(tabs.active_stack().depth(), 1);
    }

    #[test]
    fn test_back_pops_one() {
        let mut tabs = TabManager::new();
        tabs.push("/vault");
        tabs.push("/vault-word?id=42");

        let change = tabs.back().unwrap();
        assert_eq!(change.kind, ChangeKind::Back);
        assert!(!change.is_forward());
        assert_eq!(tabs.current_path(), "/vault");
    }

    #[test]
    fn test_back_skips_overlay_only_route() {
        let mut tabs = TabManager::new();
        tabs.push("/vault");
        tabs.push("/translate?word=hola");
        tabs.push("/vault-word?id=7");

        tabs.back();
        assert_eq!(paths(&tabs), vec!["/", "/vault"]);
    }

    #[test]
    fn test_back_skip_underflow_resets_to_root() {
        let mut tabs = TabManager::starting_at(Tab::Quiz, "/translate");
        tabs.push("/quiz/learn");

        tabs.back();
        assert_eq!(paths(&tabs), vec!["/quiz"]);
    }

    #[test]
    fn test_overlay_only_is_configurable() {
        let mut tabs = TabManager::new().with_overlay_only(["/vault"]);
        tabs.push("/vault");
        tabs.push("/vault-word");
        tabs.back();
        assert_eq!(paths(&tabs), vec!["/"]);
        assert!(!tabs.is_overlay_only("/translate"));
    }

    #[test]
    fn test_switch_tab_restores_history() {
        let mut tabs = TabManager::new();
        tabs.switch_tab(Tab::Vault, "/vault");
        tabs.push("/vault-word?id=1");
        let before = tabs.active_stack().clone();

        tabs.switch_tab(Tab::Quiz, "/quiz/learn");
        assert_eq!(paths(&tabs), vec!["/quiz/learn"]);

        tabs.switch_tab(Tab::Vault, "/vault");
        assert_eq!(tabs.active_stack(), &before);
    }

    #[test]
    fn test_switch_to_home_or_account_resets() {
        let mut tabs = TabManager::new();
        tabs.push("/vault");
        tabs.switch_tab(Tab::Account, "/account");
        tabs.push("/signup?redirect=%2Fvault");

        tabs.switch_tab(Tab::Home, "/ignored");
        assert_eq!(paths(&tabs), vec!["/"]);

        tabs.switch_tab(Tab::Account, "/ignored");
        assert_eq!(paths(&tabs), vec!["/account"]);
    }

    #[test]
    fn test_switch_to_active_tab_resets_to_default() {
        let mut tabs = TabManager::new();
        tabs.switch_tab(Tab::Stories, "/stories");
        tabs.push("/story/3");

        let change = tabs.switch_tab(Tab::Stories, "/stories");
        assert!(!change.tab_switched());
        assert_eq!(paths(&tabs), vec!["/stories"]);
    }

    #[test]
    fn test_stack_accessor() {
        let mut tabs = TabManager::new();
        assert!(tabs.stack(Tab::Quiz).is_none());

        tabs.switch_tab(Tab::Quiz, "/quiz");
        assert_eq!(tabs.stack(Tab::Home).map(NavigationStack::depth), Some(1));
        assert_eq!(tabs.stack(Tab::Quiz).map(NavigationStack::depth), Some(1));
    }

    #[test]
    fn test_pop_if_top() {
        let mut tabs = TabManager::new();
        tabs.push("/translate?word=hola");
        let overlay = tabs.current_route().clone();

        let change = tabs.pop_if_top(Tab::Home, &overlay).unwrap();
        assert_eq!(change.kind, ChangeKind::OverlayDismissed);
        assert_eq!(tabs.current_path(), "/");

        // Already gone
        assert!(tabs.pop_if_top(Tab::Home, &overlay).is_none());
    }

    #[test]
    fn test_pop_if_top_on_saved_tab() {
        let mut tabs = TabManager::new();
        tabs.push("/translate");
        let overlay = tabs.current_route().clone();
        tabs.switch_tab(Tab::Quiz, "/quiz");

        assert!(tabs.pop_if_top(Tab::Home, &overlay).is_none());
        assert_eq!(tabs.stack(Tab::Home).map(NavigationStack::depth), Some(1));
    }

    #[test]
    fn test_pop_if_top_resets_overlay_at_root() {
        let mut tabs = TabManager::new();
        tabs.switch_tab(Tab::Stories, "/translate");
        let overlay = tabs.current_route().clone();

        let change = tabs.pop_if_top(Tab::Stories, &overlay).unwrap();
        assert_eq!(change.kind, ChangeKind::OverlayDismissed);
        assert_eq!(paths(&tabs), vec!["/stories"]);

        // Same rule for a saved stack
        tabs.switch_tab(Tab::Quiz, "/translate");
        tabs.switch_tab(Tab::Vault, "/vault");
        assert!(tabs.pop_if_top(Tab::Quiz, &overlay).is_none());
        let quiz: Vec<String> = tabs
            .stack(Tab::Quiz)
            .unwrap()
            .routes()
            .iter()
            .map(|r| r.to_path_string())
            .collect();
        assert_eq!(quiz, vec!["/quiz"]);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Push(&'static str),
        Replace(&'static str),
        Back,
    }

    fn op() -> impl Strategy<Value = Op> {
        let route = prop::sample::select(vec![
            "/vault",
            "/vault-word?id=1",
            "/translate?word=hund",
            "/story?id=2",
            "/quiz/learn",
        ]);
        prop_oneof![
            route.clone().prop_map(Op::Push),
            route.prop_map(Op::Replace),
            Just(Op::Back),
        ]
    }

    proptest! {
        #[test]
        fn test_depth_follows_primitives(
            start in prop::sample::select(vec![Tab::Home, Tab::Vault, Tab::Stories]),
            ops in proptest::collection::vec(op(), 0..40),
        ) {
            let mut tabs = TabManager::starting_at(start, start.root_route());
            for op in ops {
                let before = tabs.active_stack().depth();
                match op {
                    Op::Push(route) => {
                        tabs.push(route);
                        prop_assert_eq!(tabs.active_stack().depth(), before + 1);
                    }
                    Op::Replace(route) => {
                        tabs.replace(route);
                        prop_assert_eq!(tabs.active_stack().depth(), before);
                    }
                    Op::Back => {
                        tabs.back();
                        prop_assert!(tabs.active_stack().depth() <= before);
                    }
                }
                prop_assert!(tabs.active_stack().depth() >= 1);
            }
        }
    }

    #[test]
    fn test_every_primitive_dismisses_focus() {
        let mut focus = MockInputFocus::new();
        focus.expect_dismiss().times(5).return_const(());

        let mut tabs = TabManager::new().with_focus(Arc::new(focus));
        tabs.push("/vault");
        tabs.replace("/vault");
        tabs.back();
        tabs.back();
        tabs.switch_tab(Tab::Quiz, "/quiz");
    }

    #[test]
    fn test_tab_for_route() {
        let tabs = TabManager::new();
        assert_eq!(tabs.tab_for_route("/quiz/learn"), Tab::Quiz);
        assert_eq!(tabs.tab_for_route("/unknown"), Tab::Home);
    }
}
