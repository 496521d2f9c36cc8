//! Route model
//!
//! A [`Route`] is a normalized `{ path, params }` pair. Routes are built from
//! strings like `/vault-word?id=42` and serialize back to the same form.
//! Parsing is total: malformed query fragments are skipped, never rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, RouteError};

/// Query parameters of a route
///
/// Ordered so that serialization, and therefore the route key, is stable.
pub type RouteParams = BTreeMap<String, String>;

/// A normalized route: a path that starts with `/` plus flat string params
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RouteRepr")]
pub struct Route {
    path: String,
    #[serde(default)]
    params: RouteParams,
}

/// Wire form; deserialization goes through [`Route::with_params`] so the
/// leading-slash invariant holds for stored routes too.
#[derive(Deserialize)]
struct RouteRepr {
    path: String,
    #[serde(default)]
    params: RouteParams,
}

impl From<RouteRepr> for Route {
    fn from(repr: RouteRepr) -> Self {
        Route::with_params(repr.path, repr.params)
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Route {
    /// Create a route with no params
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            params: RouteParams::new(),
        }
    }

    /// Create a route with params
    pub fn with_params(path: impl AsRef<str>, params: RouteParams) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            params,
        }
    }

    /// Add a param, builder style
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Parse `path?key=value&...`
    ///
    /// Splits on the first `?`. Each `&`-separated pair is split on its
    /// first `=` and both sides are percent-decoded. Pairs without `=` are
    /// ignored; a later duplicate key overwrites an earlier one.
    pub fn parse(input: &str) -> Self {
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (input, None),
        };

        let mut params = RouteParams::new();
        if let Some(query) = query {
            parse_query(query, &mut params);
        }

        Self {
            path: normalize_path(path),
            params,
        }
    }

    /// Parse, rejecting inputs `parse` would silently repair
    ///
    /// Used when routes come from configuration rather than from screens.
    pub fn parse_strict(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(RouteError::Empty);
        }
        if !input.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash(input.to_string()));
        }
        Ok(Self::parse(input))
    }

    /// The path, always starting with `/`
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All params
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// A single param
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Serialize back to `path?key=value&...`
    ///
    /// Params are emitted in key order, percent-encoded.
    pub fn to_path_string(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }

        let query = self
            .params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.path, query)
    }

    /// Cache identity of this route: path plus serialized params
    pub fn route_key(&self) -> String {
        self.to_path_string()
    }

    /// Whether this route's path equals `path` or sits beneath it
    pub fn is_under(&self, prefix: &str) -> bool {
        path_is_under(&self.path, prefix)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path_string())
    }
}

impl From<&str> for Route {
    fn from(input: &str) -> Self {
        Route::parse(input)
    }
}

impl From<String> for Route {
    fn from(input: String) -> Self {
        Route::parse(&input)
    }
}

impl From<&String> for Route {
    fn from(input: &String) -> Self {
        Route::parse(input)
    }
}

impl From<&Route> for Route {
    fn from(route: &Route) -> Self {
        route.clone()
    }
}

/// Normalize a string or structured route
///
/// Structured input is returned unchanged.
pub fn normalize(input: impl Into<Route>) -> Route {
    input.into()
}

/// `path == prefix` or `path` continues `prefix` at a `/` boundary
pub(crate) fn path_is_under(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

fn parse_query(query: &str, params: &mut RouteParams) {
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        params.insert(decode_component(key), decode_component(value));
    }
}

/// Percent-decode, keeping the raw text when it is not valid UTF-8
fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_plain_path() {
        let route = Route::parse("/vault");
        assert_eq!(route.path(), "/vault");
        assert!(route.params().is_empty());
    }

    #[test]
    fn test_parse_with_query() {
        let route = Route::parse("/vault-word?id=42&lang=es");
        assert_eq!(route.path(), "/vault-word");
        assert_eq!(route.param("id"), Some("42"));
        assert_eq!(route.param("lang"), Some("es"));
    }

    #[test]
    fn test_parse_decodes_key_and_value() {
        let route = Route::parse("/search?the%20word=caf%C3%A9");
        assert_eq!(route.param("the word"), Some("café"));
    }

    #[test]
    fn test_parse_ignores_pairs_without_equals() {
        let route = Route::parse("/quiz?flag&level=2&&");
        assert_eq!(route.params().len(), 1);
        assert_eq!(route.param("level"), Some("2"));
    }

    #[test]
    fn test_parse_splits_value_on_first_equals() {
        let route = Route::parse("/signup?redirect=/vault-word?id=42");
        assert_eq!(route.path(), "/signup");
        assert_eq!(route.param("redirect"), Some("/vault-word?id=42"));
    }

    #[test]
    fn test_parse_tolerates_bad_escapes() {
        let route = Route::parse("/quiz?q=%FF%FE");
        assert_eq!(route.param("q"), Some("%FF%FE"));
    }

    #[test]
    fn test_parse_adds_leading_slash() {
        assert_eq!(Route::parse("vault").path(), "/vault");
        assert_eq!(Route::parse("").path(), "/");
        assert_eq!(Route::parse("?x=1").path(), "/");
    }

    #[test]
    fn test_normalize_structured_is_identity() {
        let route = Route::new("/quiz/learn").with_param("deck", "a b");
        assert_eq!(normalize(&route), route);
        assert_eq!(normalize(route.clone()), route);
    }

    #[test]
    fn test_serialize_round_trip() {
        let route = Route::new("/vault-word")
            .with_param("id", "42")
            .with_param("from", "story reader");
        let text = route.to_path_string();
        assert_eq!(text, "/vault-word?from=story%20reader&id=42");
        assert_eq!(normalize(text.as_str()), route);
    }

    fn segment() -> impl Strategy<Value = String> {
        "[A-Za-z0-9._~-]{1,10}"
    }

    fn route_strategy() -> impl Strategy<Value = Route> {
        (
            proptest::collection::vec(segment(), 0..4),
            proptest::collection::btree_map("\\PC{1,8}", "\\PC{0,12}", 0..4),
        )
            .prop_map(|(segments, params)| {
                Route::with_params(format!("/{}", segments.join("/")), params)
            })
    }

    proptest! {
        #[test]
        fn test_serialize_then_normalize_is_identity(route in route_strategy()) {
            let text = route.to_path_string();
            prop_assert_eq!(normalize(text.as_str()), route);
        }
    }

    #[test]
    fn test_route_key_is_order_independent() {
        let a = Route::parse("/quiz?b=2&a=1");
        let b = Route::parse("/quiz?a=1&b=2");
        assert_eq!(a.route_key(), b.route_key());
        assert_eq!(a.route_key(), "/quiz?a=1&b=2");
    }

    #[test]
    fn test_route_key_without_params() {
        assert_eq!(Route::new("/").route_key(), "/");
    }

    #[test]
    fn test_is_under() {
        let route = Route::new("/quiz/learn");
        assert!(route.is_under("/quiz"));
        assert!(route.is_under("/"));
        assert!(!route.is_under("/qui"));
        assert!(!Route::new("/vault-word").is_under("/vault"));
    }

    #[test]
    fn test_parse_strict() {
        assert!(Route::parse_strict("/ok?a=1").is_ok());
        assert_eq!(Route::parse_strict(""), Err(RouteError::Empty));
        assert!(matches!(
            Route::parse_strict("nope"),
            Err(RouteError::MissingLeadingSlash(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Route::parse("/quiz?deck=1").to_string(), "/quiz?deck=1");
    }

    #[test]
    fn test_deserialize_repairs_path() {
        let route: Route = serde_json::from_str(r#"{"path":"vault"}"#).unwrap();
        assert_eq!(route.path(), "/vault");
    }

    #[test]
    fn test_route_serialization() {
        let route = Route::parse("/vault-word?id=42");
        let json = serde_json::to_string(&route).unwrap();
        let parsed: Route = serde_json::from_str(&json).unwrap();
        assert_eq!(route, parsed);
    }
}
