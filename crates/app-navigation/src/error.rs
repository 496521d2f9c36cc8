//! Navigation error types
//!
//! Navigation primitives never fail; these errors only surface when routes
//! are read from configuration.

/// Route validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Empty route string
    #[error("Route is empty")]
    Empty,

    /// Path does not start with `/`
    #[error("Route must start with '/': {0}")]
    MissingLeadingSlash(String),
}

/// Result type for route validation
pub type Result<T> = std::result::Result<T, RouteError>;
