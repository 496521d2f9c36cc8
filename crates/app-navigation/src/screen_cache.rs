//! Screen instance cache
//!
//! Memoizes constructed screens by route key so a screen that is hidden
//! (under another screen, or on an inactive tab) keeps its internal state
//! instead of being rebuilt on every render.
//!
//! The cache is unbounded by default: entries live for the whole process,
//! trading memory for never remounting a screen. A capacity turns it into an
//! LRU; evicting a screen that is still on a stack only costs a remount.

use lru::LruCache;
use std::num::NonZeroUsize;

use crate::resolver::ScreenResolver;
use crate::route::Route;
use crate::screen::{ScreenContext, ScreenHandle};

/// Route-keyed cache of constructed screens
pub struct ScreenCache {
    resolver: ScreenResolver,
    entries: LruCache<String, ScreenHandle>,
    constructed: u64,
}

impl std::fmt::Debug for ScreenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenCache")
            .field("entries", &self.entries.len())
            .field("constructed", &self.constructed)
            .field("resolver", &self.resolver)
            .finish()
    }
}

impl ScreenCache {
    /// Create an unbounded cache
    pub fn new(resolver: ScreenResolver) -> Self {
        Self {
            resolver,
            entries: LruCache::unbounded(),
            constructed: 0,
        }
    }

    /// Create a cache holding at most `capacity` screens
    pub fn with_capacity(resolver: ScreenResolver, capacity: NonZeroUsize) -> Self {
        Self {
            resolver,
            entries: LruCache::new(capacity),
            constructed: 0,
        }
    }

    /// Cached screen for `route`, constructing it on first use
    pub fn get_element(&mut self, route: &Route) -> ScreenHandle {
        let key = route.route_key();

        if let Some(screen) = self.entries.get(&key) {
            return screen.clone();
        }

        let screen = self.construct(ScreenContext::new(route.clone()));
        if let Some((evicted, _)) = self.entries.push(key.clone(), screen.clone()) {
            if evicted != key {
                tracing::debug!(route = %evicted, "evicted screen instance");
            }
        }
        screen
    }

    /// Fresh, uncached instance of `route` under its own render key
    ///
    /// Needed when one route is on screen twice at once (an animating
    /// underlay and the settled base) so the two never share an identity.
    pub fn clone_for_concurrent_display(&mut self, route: &Route, suffix: &str) -> ScreenHandle {
        self.construct(ScreenContext::with_suffix(route.clone(), suffix))
    }

    fn construct(&mut self, context: ScreenContext) -> ScreenHandle {
        let factory = self.resolver.resolve(context.route.path());
        tracing::debug!(render_key = %context.render_key, "constructing screen");
        self.constructed += 1;
        factory(&context)
    }

    /// Cached screen for `route` without constructing or touching recency
    pub fn peek(&self, route: &Route) -> Option<ScreenHandle> {
        self.entries.peek(&route.route_key()).cloned()
    }

    /// Whether `route` has a cached screen
    pub fn contains(&self, route: &Route) -> bool {
        self.entries.contains(&route.route_key())
    }

    /// Number of cached screens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total screens constructed, clones included
    pub fn constructed(&self) -> u64 {
        self.constructed
    }

    /// The resolver behind the cache
    pub fn resolver(&self) -> &ScreenResolver {
        &self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::same_instance;
    use crate::screen::testing::{downcast, named};

    fn cache() -> ScreenCache {
        let resolver = ScreenResolver::new(named("home"))
            .route("/vault", named("vault"))
            .prefix("/vault-word", named("word"));
        ScreenCache::new(resolver)
    }

    #[test]
    fn test_same_route_same_instance() {
        let mut cache = cache();
        let route = Route::parse("/vault-word?id=42");

        let a = cache.get_element(&route);
        let b = cache.get_element(&Route::parse("/vault-word?id=42"));

        assert!(same_instance(&a, &b));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.constructed(), 1);
    }

    #[test]
    fn test_params_change_identity() {
        let mut cache = cache();
        let a = cache.get_element(&Route::parse("/vault-word?id=1"));
        let b = cache.get_element(&Route::parse("/vault-word?id=2"));

        assert!(!same_instance(&a, &b));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_clone_is_never_the_cached_instance() {
        let mut cache = cache();
        let route = Route::new("/vault");

        let cached = cache.get_element(&route);
        let clone = cache.clone_for_concurrent_display(&route, "underlay");
        let again = cache.clone_for_concurrent_display(&route, "underlay");

        assert!(!same_instance(&cached, &clone));
        assert!(!same_instance(&clone, &again));
        assert_eq!(downcast(&clone).context.render_key, "/vault#underlay");
        assert_eq!(cache.len(), 1);
        assert!(same_instance(&cache.get_element(&route), &cached));
    }

    #[test]
    fn test_unknown_route_uses_home() {
        let mut cache = cache();
        let screen = cache.get_element(&Route::new("/mystery"));
        assert_eq!(screen.name(), "home");
        assert!(cache.contains(&Route::new("/mystery")));
    }

    #[test]
    fn test_peek_does_not_construct() {
        let mut cache = cache();
        assert!(cache.peek(&Route::new("/vault")).is_none());
        assert!(cache.is_empty());

        cache.get_element(&Route::new("/vault"));
        assert!(cache.peek(&Route::new("/vault")).is_some());
    }

    #[test]
    fn test_bounded_cache_evicts_least_recent() {
        let resolver = ScreenResolver::new(named("home"));
        let mut cache = ScreenCache::with_capacity(resolver, NonZeroUsize::new(2).unwrap());

        let first = cache.get_element(&Route::new("/a"));
        cache.get_element(&Route::new("/b"));
        cache.get_element(&Route::new("/a"));
        cache.get_element(&Route::new("/c"));

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&Route::new("/b")));
        assert!(same_instance(&cache.get_element(&Route::new("/a")), &first));
    }
}
