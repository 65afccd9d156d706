//! Build options.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, RouteOrderError};

/// Options fixed for the duration of one build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// When paths tie on priority and parameter presence, try the one with
    /// more segments first (`/my/deep/path` before `/my/path`). When false,
    /// fewer segments go first.
    #[serde(default = "default_depth_first")]
    pub depth_first: bool,
}

const fn default_depth_first() -> bool {
    true
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            depth_first: default_depth_first(),
        }
    }
}

impl BuildOptions {
    /// Deepest paths first.
    pub const fn depth_first() -> Self {
        Self { depth_first: true }
    }

    /// Shallowest paths first.
    pub const fn shallow_first() -> Self {
        Self { depth_first: false }
    }

    /// Resolves optional options, defaulting to depth-first.
    pub fn resolve(options: Option<Self>) -> Self {
        options.unwrap_or_default()
    }

    /// Reads options from a JSON value.
    ///
    /// The value must be an object. A missing `depthFirst` defaults to true;
    /// other keys are ignored.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(RouteOrderError::OptionsType(format!(
                "options must be an object, got {value}"
            )));
        }
        Self::deserialize(value).map_err(|e| RouteOrderError::OptionsType(e.to_string()))
    }

    /// Parses options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_is_depth_first() {
        assert!(BuildOptions::default().depth_first);
        assert_eq!(BuildOptions::resolve(None), BuildOptions::depth_first());
        assert_eq!(
            BuildOptions::resolve(Some(BuildOptions::shallow_first())),
            BuildOptions::shallow_first()
        );
    }

    #[test]
    fn test_missing_field_defaults_true() {
        let options = BuildOptions::from_value(&json!({})).unwrap();
        assert!(options.depth_first);

        let options = BuildOptions::from_value(&json!({"other": 1})).unwrap();
        assert!(options.depth_first);
    }

    #[test]
    fn test_explicit_field() {
        let options = BuildOptions::from_json(r#"{"depthFirst": false}"#).unwrap();
        assert!(!options.depth_first);
    }

    #[test]
    fn test_non_object_rejected() {
        for value in [json!(true), json!("deep"), json!([1]), json!(3)] {
            let err = BuildOptions::from_value(&value).unwrap_err();
            assert!(matches!(err, RouteOrderError::OptionsType(_)), "{value}");
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_wrong_field_type_rejected() {
        let err = BuildOptions::from_value(&json!({"depthFirst": "yes"})).unwrap_err();
        assert!(matches!(err, RouteOrderError::OptionsType(_)));
    }
}
