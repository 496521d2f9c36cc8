//! Screen resolver
//!
//! Maps a path to the factory that builds its screen. Exact paths are looked
//! up first, then registered prefixes (longest first) for dynamic detail
//! pages. A prefix only matches whole segments, so `/quiz` covers
//! `/quiz/learn` but not `/quizzical`. Anything else resolves to the home factory, so navigation never
//! fails on an unknown path.

use std::collections::HashMap;

use crate::route::path_is_under;
use crate::screen::ScreenFactory;

/// How a path was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exact table hit
    Exact(String),
    /// Prefix table hit
    Prefix(String),
    /// Nothing matched; home factory used
    Fallback,
}

/// Path → screen factory table
#[derive(Clone)]
pub struct ScreenResolver {
    /// Exact paths
    exact: HashMap<String, ScreenFactory>,
    /// Dynamic prefixes
    prefixes: Vec<(String, ScreenFactory)>,
    /// Fallback factory
    home: ScreenFactory,
}

impl std::fmt::Debug for ScreenResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut exact: Vec<_> = self.exact.keys().collect();
        exact.sort();
        f.debug_struct("ScreenResolver")
            .field("exact", &exact)
            .field(
                "prefixes",
                &self.prefixes.iter().map(|(p, _)| p).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl ScreenResolver {
    /// Create a resolver whose fallback is `home`
    pub fn new(home: ScreenFactory) -> Self {
        Self {
            exact: HashMap::new(),
            prefixes: Vec::new(),
            home,
        }
    }

    /// Register a factory for an exact path
    pub fn add_route(&mut self, path: &str, factory: ScreenFactory) {
        self.exact.insert(clean_path(path).to_string(), factory);
    }

    /// Register a factory for `prefix` and every path below it
    pub fn add_prefix(&mut self, prefix: &str, factory: ScreenFactory) {
        let prefix = clean_path(prefix);
        self.prefixes.retain(|(p, _)| p != prefix);
        self.prefixes.push((prefix.to_string(), factory));
        self.prefixes.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()));
    }

    /// Builder form of [`add_route`](Self::add_route)
    pub fn route(mut self, path: &str, factory: ScreenFactory) -> Self {
        self.add_route(path, factory);
        self
    }

    /// Builder form of [`add_prefix`](Self::add_prefix)
    pub fn prefix(mut self, prefix: &str, factory: ScreenFactory) -> Self {
        self.add_prefix(prefix, factory);
        self
    }

    /// Factory for `path`
    pub fn resolve(&self, path: &str) -> ScreenFactory {
        self.lookup(path).0
    }

    /// Factory for `path` plus how it was found
    pub fn lookup(&self, path: &str) -> (ScreenFactory, Resolution) {
        let path = clean_path(path);

        if let Some(factory) = self.exact.get(path) {
            return (factory.clone(), Resolution::Exact(path.to_string()));
        }

        if let Some((prefix, factory)) = self.prefixes.iter().find(|(p, _)| path_is_under(path, p)) {
            return (factory.clone(), Resolution::Prefix(prefix.clone()));
        }

        tracing::debug!(path, "no screen registered, falling back to home");
        (self.home.clone(), Resolution::Fallback)
    }

    /// Whether `path` resolves without falling back
    pub fn is_known(&self, path: &str) -> bool {
        !matches!(self.lookup(path).1, Resolution::Fallback)
    }
}

/// Drop any query and a trailing slash (except on the root)
fn clean_path(path: &str) -> &str {
    let path = path.split_once('?').map_or(path, |(path, _)| path);
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
