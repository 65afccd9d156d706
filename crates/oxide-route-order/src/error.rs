//! Error types for route declaration and build configuration.

/// Errors raised when a declaration or build option has the wrong shape.
///
/// Every variant describes a mistake in the calling application. Nothing here
/// is retried or recovered from; the first violation is returned as-is.
#[derive(Debug, thiserror::Error)]
pub enum RouteOrderError {
    /// A declaration received an unsupported number of arguments.
    #[error("invalid number of arguments for {operation}: expected {expected}, got {found}")]
    Arity {
        /// Declaration kind (`get`, `param`, ...).
        operation: String,
        /// Accepted argument counts, for the message.
        expected: &'static str,
        /// Number of arguments supplied.
        found: usize,
    },

    /// A route path was not a string.
    #[error("first argument of {operation} must be a route string")]
    PathType {
        /// Declaration kind.
        operation: String,
    },

    /// A handler argument was not a handler reference.
    #[error("handler argument of {operation} must be a handler name")]
    HandlerType {
        /// Declaration kind.
        operation: String,
    },

    /// A param hook name was not a string.
    #[error("first argument of param must be a param name string")]
    ParamNameType,

    /// A priority was supplied but was not an integer in range.
    #[error("priority argument of {operation} must be an integer, got {value}")]
    PriorityType {
        /// Declaration kind.
        operation: String,
        /// The rejected value, rendered as JSON.
        value: String,
    },

    /// Build options were supplied but had the wrong shape.
    #[error("invalid build options: {0}")]
    OptionsType(String),

    /// A handler name has no binding.
    #[error("no {kind} bound to name '{name}'")]
    UnboundHandler {
        /// Which binding table was consulted.
        kind: &'static str,
        /// The unresolved name.
        name: String,
    },

    /// The manifest document itself is malformed.
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    /// The manifest is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RouteOrderError {
    /// Returns true for the argument-shape violations of a single declaration
    /// or of the build options.
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::Arity { .. }
                | Self::PathType { .. }
                | Self::HandlerType { .. }
                | Self::ParamNameType
                | Self::PriorityType { .. }
                | Self::OptionsType(_)
        )
    }
}

/// Result type for declaration and build operations.
pub type Result<T> = std::result::Result<T, RouteOrderError>;
