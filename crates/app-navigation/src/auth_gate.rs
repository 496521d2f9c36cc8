//! Authentication gate
//!
//! Wraps a screen factory so the screen is only shown while a user session
//! is present. Otherwise a standard "sign-up required" prompt is shown in its
//! place. The prompt's primary action goes to the sign-up screen and carries
//! the gated route in a `redirect` param, so the flow can resume after the
//! user signs up.
//!
//! The predicate is read on every call to [`GatedScreen::view`], not once at
//! construction: a cached gated screen starts showing its content as soon as
//! the user signs in.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::{Arc, OnceLock};

use app_state::AuthPredicate;

use crate::action::NavAction;
use crate::route::Route;
use crate::screen::{Screen, ScreenContext, ScreenFactory, ScreenHandle};

/// Param carrying the route to resume after authentication
pub const REDIRECT_PARAM: &str = "redirect";

/// Default sign-up path
pub const DEFAULT_SIGN_UP_PATH: &str = "/signup";

/// Features that sit behind the gate; selects the prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    /// Saved word vault
    Vault,
    /// Quizzes and flashcards
    Quiz,
    /// Story exercises
    Stories,
    /// Translation panel
    Translation,
    /// Learning progress
    Progress,
    /// Account management
    Account,
}

impl Feature {
    /// Prompt message shown when this feature is gated
    pub fn message(&self) -> &'static str {
        match self {
            Feature::Vault => "Create an account to save words to your vault.",
            Feature::Quiz => "Create an account to take quizzes and track your answers.",
            Feature::Stories => "Create an account to unlock story exercises.",
            Feature::Translation => "Create an account to translate words as you read.",
            Feature::Progress => "Create an account to keep track of your progress.",
            Feature::Account => "Create an account to manage your profile.",
        }
    }
}

/// The standard sign-up-required screen content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpPrompt {
    /// Gated feature
    pub feature: Feature,
    /// Message keyed by feature
    pub message: String,
    /// Primary button label
    pub primary_label: String,
    /// Go to sign-up, carrying the redirect target
    pub primary: NavAction,
    /// Secondary button label
    pub secondary_label: String,
    /// Plain back navigation
    pub secondary: NavAction,
}

/// Builds gated factories
#[derive(Clone)]
pub struct AuthGate {
    predicate: Arc<dyn AuthPredicate>,
    sign_up_path: String,
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("sign_up_path", &self.sign_up_path)
            .finish_non_exhaustive()
    }
}

impl AuthGate {
    /// Create a gate reading `predicate`
    pub fn new(predicate: Arc<dyn AuthPredicate>) -> Self {
        Self {
            predicate,
            sign_up_path: DEFAULT_SIGN_UP_PATH.to_string(),
        }
    }

    /// Override the sign-up path
    pub fn with_sign_up_path(mut self, path: impl Into<String>) -> Self {
        self.sign_up_path = path.into();
        self
    }

    /// Wrap `inner` so it is only shown to signed-in users
    pub fn gate(&self, feature: Feature, inner: ScreenFactory) -> ScreenFactory {
        let gate = self.clone();
        Arc::new(move |ctx: &ScreenContext| -> ScreenHandle {
            Arc::new(GatedScreen {
                feature,
                prompt: gate.prompt_for(feature, &ctx.route),
                context: ctx.clone(),
                predicate: Arc::clone(&gate.predicate),
                inner_factory: Arc::clone(&inner),
                inner: OnceLock::new(),
            })
        })
    }

    /// Prompt for `feature` shown in place of `route`
    pub fn prompt_for(&self, feature: Feature, route: &Route) -> SignUpPrompt {
        let sign_up =
            Route::new(&self.sign_up_path).with_param(REDIRECT_PARAM, route.to_path_string());

        SignUpPrompt {
            feature,
            message: feature.message().to_string(),
            primary_label: "Sign up".to_string(),
            primary: NavAction::Push { route: sign_up },
            secondary_label: "Go back".to_string(),
            secondary: NavAction::Back,
        }
    }
}

/// What a gated screen shows right now
#[derive(Clone)]
pub enum GateView<'a> {
    /// Session present; the real screen
    Granted(ScreenHandle),
    /// No session; the prompt
    SignUpRequired(&'a SignUpPrompt),
}

impl std::fmt::Debug for GateView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateView::Granted(screen) => f.debug_tuple("Granted").field(&screen.name()).finish(),
            GateView::SignUpRequired(prompt) => {
                f.debug_tuple("SignUpRequired").field(prompt).finish()
            }
        }
    }
}

/// Screen produced by [`AuthGate::gate`]
///
/// The inner screen is built the first time the predicate passes and kept
/// for the lifetime of the gated instance.
pub struct GatedScreen {
    feature: Feature,
    context: ScreenContext,
    prompt: SignUpPrompt,
    predicate: Arc<dyn AuthPredicate>,
    inner_factory: ScreenFactory,
    inner: OnceLock<ScreenHandle>,
}

impl GatedScreen {
    /// Downcast a handle to a gated screen
    pub fn from_handle(handle: &ScreenHandle) -> Option<&GatedScreen> {
        handle.as_any().downcast_ref::<GatedScreen>()
    }

    /// Evaluate the predicate and pick what to show
    pub fn view(&self) -> GateView<'_> {
        if self.predicate.is_authenticated() {
            let inner = self
                .inner
                .get_or_init(|| (self.inner_factory)(&self.context));
            GateView::Granted(Arc::clone(inner))
        } else {
            tracing::debug!(
                feature = ?self.feature,
                route = %self.context.route,
                "sign-up required"
            );
            GateView::SignUpRequired(&self.prompt)
        }
    }

    /// Gated feature
    pub fn feature(&self) -> Feature {
        self.feature
    }

    /// Context the gated screen was built with
    pub fn context(&self) -> &ScreenContext {
        &self.context
    }

    /// The prompt shown without a session
    pub fn prompt(&self) -> &SignUpPrompt {
        &self.prompt
    }
}

impl Screen for GatedScreen {
    fn name(&self) -> &str {
        "auth-gate"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
