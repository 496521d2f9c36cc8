//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::any::Any;
use std::sync::Arc;

use wordhoard::{
    screen_factory, AuthGate, Feature, Navigator, NavigatorConfig, Screen, ScreenContext,
    ScreenFactory, ScreenResolver,
};

/// Screen that records the context it was built with
pub struct Page {
    pub name: &'static str,
    pub context: ScreenContext,
}

impl Screen for Page {
    fn name(&self) -> &str {
        self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn page(name: &'static str) -> ScreenFactory {
    screen_factory(move |ctx: &ScreenContext| Page {
        name,
        context: ctx.clone(),
    })
}

/// The app's route table, with vault and quiz behind the gate
pub fn resolver(gate: &AuthGate) -> ScreenResolver {
    ScreenResolver::new(page("home"))
        .route("/vault", gate.gate(Feature::Vault, page("vault")))
        .prefix("/vault-word", gate.gate(Feature::Vault, page("vault-word")))
        .prefix("/quiz", gate.gate(Feature::Quiz, page("quiz")))
        .route("/stories", page("stories"))
        .prefix("/story", page("story"))
        .route("/account", page("account"))
        .route("/signup", page("signup"))
        .route("/translate", page("translate"))
        .route("/paywall", page("paywall"))
}

/// Navigator for a signed-in user, with linear curves and a 400x800 viewport
pub fn signed_in_navigator() -> Navigator {
    let config = NavigatorConfig::new()
        .viewport_size(400.0, 800.0)
        .easing(wordhoard::Easing::LINEAR);
    let gate = config.auth_gate(Arc::new(|| true));
    Navigator::new(resolver(&gate), config)
}

/// Paths of the active stack, bottom to top
pub fn stack_paths(nav: &Navigator) -> Vec<String> {
    nav.tabs()
        .active_stack()
        .routes()
        .iter()
        .map(|route| route.to_path_string())
        .collect()
}
