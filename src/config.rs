//! Navigator configuration
//!
//! All knobs of the navigation engine in one serde struct. Every field has a
//! default, so a JSON file only needs the values it changes:
//!
//! ```json
//! { "screenWidth": 430, "overlayPaths": ["/translate", "/define"] }
//! ```

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use app_motion::tokens::{duration, gesture, layout, motion};
use app_motion::{ChromeConfig, Easing, SheetConfig, Viewport};
use app_navigation::{AuthGate, Route, RouteError, DEFAULT_OVERLAY_ONLY, DEFAULT_SIGN_UP_PATH};
use app_state::AuthPredicate;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configured route is malformed
    #[error("Invalid route in {field}: {source}")]
    Route {
        /// Offending field
        field: &'static str,
        /// Underlying route error
        source: RouteError,
    },

    /// A value is out of range
    #[error("Invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Navigation engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigatorConfig {
    /// Viewport width
    pub screen_width: f32,
    /// Viewport height
    pub screen_height: f32,
    /// Overlay sheet height
    pub sheet_height: f32,
    /// Nav bar height
    pub nav_bar_height: f32,

    /// Screen slide duration (ms)
    pub transition_ms: u64,
    /// Sheet open duration (ms)
    pub sheet_open_ms: u64,
    /// Sheet close duration (ms)
    pub sheet_close_ms: u64,
    /// Nav bar show/hide duration (ms)
    pub chrome_ms: u64,
    /// Sheet spring back duration (ms)
    pub spring_back_ms: u64,
    /// Curve for every automatic animation
    pub easing: Easing,

    /// Drag distance (px) past which a release dismisses the sheet
    pub dismiss_distance: f32,
    /// Downward release velocity (px/ms) past which the sheet dismisses
    pub dismiss_velocity: f32,
    /// Force a stuck sheet close after this long; `null` disables
    pub close_timeout_ms: Option<u64>,

    /// Paths presented as a bottom sheet
    pub overlay_paths: Vec<String>,
    /// Paths skipped when going back
    pub overlay_only_paths: Vec<String>,
    /// Where the auth gate sends signed-out users
    pub sign_up_path: String,

    /// Screen cache capacity; `null` keeps every screen
    pub screen_cache_capacity: Option<usize>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            screen_width: layout::SCREEN_WIDTH,
            screen_height: layout::SCREEN_HEIGHT,
            sheet_height: layout::SHEET_HEIGHT,
            nav_bar_height: layout::NAV_BAR_HEIGHT,
            transition_ms: duration::SLOW,
            sheet_open_ms: duration::SLOW,
            sheet_close_ms: duration::MODERATE,
            chrome_ms: duration::MODERATE,
            spring_back_ms: duration::MODERATE,
            easing: Easing::DEFAULT,
            dismiss_distance: gesture::DISMISS_DISTANCE,
            dismiss_velocity: gesture::DISMISS_VELOCITY,
            close_timeout_ms: Some(motion::SHEET_CLOSE_TIMEOUT.as_millis() as u64),
            overlay_paths: DEFAULT_OVERLAY_ONLY.iter().map(|p| p.to_string()).collect(),
            overlay_only_paths: DEFAULT_OVERLAY_ONLY.iter().map(|p| p.to_string()).collect(),
            sign_up_path: DEFAULT_SIGN_UP_PATH.to_string(),
            screen_cache_capacity: None,
        }
    }
}

impl NavigatorConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from JSON and validate
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON file and validate
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading navigator config");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check sizes are positive and paths are absolute
    pub fn validate(&self) -> Result<()> {
        positive("screenWidth", self.screen_width)?;
        positive("screenHeight", self.screen_height)?;
        positive("sheetHeight", self.sheet_height)?;
        positive("dismissDistance", self.dismiss_distance)?;
        non_negative("navBarHeight", self.nav_bar_height)?;
        non_negative("dismissVelocity", self.dismiss_velocity)?;
        if self.screen_cache_capacity == Some(0) {
            return Err(invalid("screenCacheCapacity", "must be at least 1 (or null)"));
        }

        for path in &self.overlay_paths {
            route("overlayPaths", path)?;
        }
        for path in &self.overlay_only_paths {
            route("overlayOnlyPaths", path)?;
        }
        route("signUpPath", &self.sign_up_path)?;

        Ok(())
    }

    /// Set the viewport size
    pub fn viewport_size(mut self, width: f32, height: f32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    /// Set the transition duration
    pub fn transition_ms(mut self, ms: u64) -> Self {
        self.transition_ms = ms;
        self
    }

    /// Set the sheet open and close durations
    pub fn sheet_ms(mut self, open: u64, close: u64) -> Self {
        self.sheet_open_ms = open;
        self.sheet_close_ms = close;
        self
    }

    /// Set the stuck-close fallback
    pub fn close_timeout_ms(mut self, ms: Option<u64>) -> Self {
        self.close_timeout_ms = ms;
        self
    }

    /// Set the curve
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the overlay paths
    pub fn overlay_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overlay_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Bound the screen cache
    pub fn screen_cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.screen_cache_capacity = capacity;
        self
    }

    /// Viewport for the transition animator
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.screen_width,
            height: self.screen_height,
        }
    }

    /// Transition duration
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Sheet controller settings
    pub fn sheet_config(&self) -> SheetConfig {
        SheetConfig {
            open_duration: Duration::from_millis(self.sheet_open_ms),
            close_duration: Duration::from_millis(self.sheet_close_ms),
            spring_back_duration: Duration::from_millis(self.spring_back_ms),
            easing: self.easing,
            sheet_height: self.sheet_height,
            dismiss_distance: self.dismiss_distance,
            dismiss_velocity: self.dismiss_velocity,
            close_timeout: self.close_timeout_ms.map(Duration::from_millis),
            overlay_paths: self.overlay_paths.clone(),
        }
    }

    /// Nav bar settings
    pub fn chrome_config(&self) -> ChromeConfig {
        ChromeConfig {
            duration: Duration::from_millis(self.chrome_ms),
            easing: self.easing,
            bar_height: self.nav_bar_height,
        }
    }

    /// Auth gate sending signed-out users to the configured sign-up path
    pub fn auth_gate(&self, predicate: Arc<dyn AuthPredicate>) -> AuthGate {
        AuthGate::new(predicate).with_sign_up_path(self.sign_up_path.clone())
    }

    /// Cache capacity, if bounded
    pub fn cache_capacity(&self) -> Option<NonZeroUsize> {
        self.screen_cache_capacity.and_then(NonZeroUsize::new)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    // also rejects NaN
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}

fn route(field: &'static str, path: &str) -> Result<()> {
    Route::parse_strict(path)
        .map(|_| ())
        .map_err(|source| ConfigError::Route { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = NavigatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.transition_ms, 300);
        assert_eq!(config.sheet_close_ms, 200);
        assert_eq!(config.close_timeout_ms, Some(1000));
        assert_eq!(config.overlay_paths, vec!["/translate".to_string()]);
        assert!(config.cache_capacity().is_none());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            NavigatorConfig::from_json_str(r#"{"screenWidth": 430, "closeTimeoutMs": null}"#)
                .unwrap();
        assert_eq!(config.screen_width, 430.0);
        assert_eq!(config.screen_height, layout::SCREEN_HEIGHT);
        assert!(config.close_timeout_ms.is_none());
        assert!(config.sheet_config().close_timeout.is_none());
    }

    #[test]
    fn test_easing_from_css_string() {
        let config =
            NavigatorConfig::from_json_str(r#"{"easing": "cubic-bezier(0.4, 0, 0.2, 1)"}"#)
                .unwrap();
        assert_eq!(config.easing, Easing::EASE_IN_OUT);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = NavigatorConfig::from_json_str(r#"{"sheetHeight": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "sheetHeight", .. }));

        let err = NavigatorConfig::from_json_str(r#"{"overlayPaths": ["translate"]}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Route {
                field: "overlayPaths",
                source: RouteError::MissingLeadingSlash(_)
            }
        ));

        let err = NavigatorConfig::from_json_str(r#"{"screenCacheCapacity": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = NavigatorConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_builder() {
        let config = NavigatorConfig::new()
            .viewport_size(400.0, 800.0)
            .transition_ms(250)
            .overlay_paths(["/translate", "/define"])
            .screen_cache_capacity(Some(8));

        assert_eq!(config.viewport(), Viewport { width: 400.0, height: 800.0 });
        assert_eq!(config.transition_duration(), Duration::from_millis(250));
        assert_eq!(config.sheet_config().overlay_paths.len(), 2);
        assert_eq!(config.cache_capacity().map(NonZeroUsize::get), Some(8));
    }

    #[test]
    fn test_round_trips_through_camel_case() {
        let json = serde_json::to_value(NavigatorConfig::default()).unwrap();
        assert!(json.get("dismissDistance").is_some());
        assert!(json.get("screenCacheCapacity").unwrap().is_null());
    }
}
