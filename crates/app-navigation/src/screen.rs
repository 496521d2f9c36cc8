//! Screen abstraction
//!
//! The engine never looks inside a screen. It only builds screens from
//! factories, keeps the instances alive, and hands them to the renderer.

use std::any::Any;
use std::sync::Arc;

use crate::route::Route;

/// An opaque, constructed screen
///
/// Screens may own timers and in-flight animations; keeping the instance
/// alive is what keeps that state alive.
pub trait Screen: Any + Send + Sync {
    /// Short name for logs and debugging
    fn name(&self) -> &str;

    /// Downcast support for renderers that know concrete screen types
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a constructed screen
pub type ScreenHandle = Arc<dyn Screen>;

/// Everything a factory knows about the screen it is building
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenContext {
    /// Route being rendered
    pub route: Route,
    /// Cache identity of the route
    pub route_key: String,
    /// Render identity of this particular instance
    pub render_key: String,
}

impl ScreenContext {
    /// Context for the cached instance of `route`
    pub fn new(route: Route) -> Self {
        let route_key = route.route_key();
        Self {
            render_key: route_key.clone(),
            route_key,
            route,
        }
    }

    /// Context for an extra instance of `route` under a distinct render key
    pub fn with_suffix(route: Route, suffix: &str) -> Self {
        let route_key = route.route_key();
        Self {
            render_key: format!("{}#{}", route_key, suffix),
            route_key,
            route,
        }
    }
}

/// Builds a screen for a route
pub type ScreenFactory = Arc<dyn Fn(&ScreenContext) -> ScreenHandle + Send + Sync>;

/// Wrap a constructor returning a concrete screen type into a [`ScreenFactory`]
pub fn screen_factory<F, S>(build: F) -> ScreenFactory
where
    F: Fn(&ScreenContext) -> S + Send + Sync + 'static,
    S: Screen + 'static,
{
    Arc::new(move |ctx: &ScreenContext| -> ScreenHandle { Arc::new(build(ctx)) })
}

/// Whether two handles point at the same instance
pub fn same_instance(a: &ScreenHandle, b: &ScreenHandle) -> bool {
    std::ptr::eq(
        Arc::as_ptr(a) as *const (),
        Arc::as_ptr(b) as *const (),
    )
}
