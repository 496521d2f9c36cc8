//! Navigation stack
//!
//! One stack per tab, oldest entry first. The stack is never empty: the
//! bottom entry is stored apart from the rest so an empty stack cannot be
//! represented at all.

use serde::{Deserialize, Serialize};

use crate::route::Route;

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self {
            route,
            key: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Navigation stack for a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStack {
    /// Bottom entry
    base: StackEntry,
    /// Entries above the base (bottom to top)
    above: Vec<StackEntry>,
}

impl NavigationStack {
    /// Create a new navigation stack with a single route
    pub fn new(root: Route) -> Self {
        Self {
            base: StackEntry::new(root),
            above: Vec::new(),
        }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        self.above.push(StackEntry::new(route));
    }

    /// Pop the top route (returns false when only the base is left)
    pub fn pop(&mut self) -> bool {
        self.above.pop().is_some()
    }

    /// Pop `count` routes; fails without touching the stack if that would
    /// remove the base
    pub fn pop_n(&mut self, count: usize) -> bool {
        if count > self.above.len() {
            return false;
        }
        let keep = self.above.len() - count;
        self.above.truncate(keep);
        true
    }

    /// Replace the top route, keeping the depth
    pub fn replace(&mut self, route: Route) {
        *self.current_entry_mut() = StackEntry::new(route);
    }

    /// Get the current (top) route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.above.last().unwrap_or(&self.base)
    }

    fn current_entry_mut(&mut self) -> &mut StackEntry {
        self.above.last_mut().unwrap_or(&mut self.base)
    }

    /// Route `depth` entries below the top (0 = top)
    pub fn peek_below(&self, depth: usize) -> Option<&Route> {
        let len = self.depth();
        if depth >= len {
            return None;
        }
        self.entries().nth(len - 1 - depth).map(|entry| &entry.route)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.above.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }

    /// All entries, bottom to top
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &StackEntry> + '_ {
        std::iter::once(&self.base).chain(self.above.iter())
    }

    /// All routes, bottom to top
    pub fn routes(&self) -> Vec<&Route> {
        self.entries().map(|entry| &entry.route).collect()
    }

    /// Whether `route` appears anywhere in the stack
    pub fn contains(&self, route: &Route) -> bool {
        self.entries().any(|entry| &entry.route == route)
    }

    /// Reset to a single route
    pub fn reset(&mut self, route: Route) {
        self.base = StackEntry::new(route);
        self.above.clear();
    }
}
