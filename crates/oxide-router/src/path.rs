//! Path pattern matching.

use crate::request::PathParams;

/// A segment in a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A literal string segment.
    Literal(String),
    /// A parameter segment (`:id` or `{id}`).
    Param(String),
    /// A wildcard segment matching the remainder of the path (`*rest` or `{*rest}`).
    Wildcard(String),
}

impl PathSegment {
    /// Classifies one `/`-delimited piece of a pattern.
    ///
    /// `{x` without the closing brace and a bare `*` are literals.
    pub fn parse(part: &str) -> Self {
        let braced = part.strip_prefix('{').and_then(|s| s.strip_suffix('}'));
        let param = braced.or_else(|| part.strip_prefix(':'));

        match param {
            Some(name) => match name.strip_prefix('*') {
                Some(rest) => Self::Wildcard(rest.to_string()),
                None => Self::Param(name.to_string()),
            },
            None => match part.strip_prefix('*') {
                Some(rest) if !rest.is_empty() => Self::Wildcard(rest.to_string()),
                _ => Self::Literal(part.to_string()),
            },
        }
    }

    /// Returns true for segments that match only their own text.
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

/// A parsed path pattern for matching URLs.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Parsed segments.
    segments: Vec<PathSegment>,
}

impl PathPattern {
    /// Parses a path pattern string.
    ///
    /// Pattern syntax:
    /// - `/users` - Literal path
    /// - `/users/:id` or `/users/{id}` - Path with parameter
    /// - `/files/*path` or `/files/{*path}` - Wildcard (matches rest of path)
    ///
    /// Empty segments are ignored, so a trailing slash matches the same
    /// requests as the pattern without it.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_router::PathPattern;
    ///
    /// let pattern = PathPattern::new("/posts/:id/comments/{comment_id}");
    /// let params = pattern.match_path("/posts/123/comments/456").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// ```
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(PathSegment::parse)
            .collect();

        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// Attempts to match a path against this pattern.
    ///
    /// Returns extracted parameters if the path matches.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let mut parts = path.split('/').filter(|s| !s.is_empty());
        let mut params = PathParams::new();

        for segment in &self.segments {
            match segment {
                PathSegment::Literal(lit) => {
                    if parts.next()? != lit {
                        return None;
                    }
                }
                PathSegment::Param(name) => {
                    params.insert(name.as_str(), parts.next()?);
                }
                PathSegment::Wildcard(name) => {
                    let rest: Vec<&str> = parts.by_ref().collect();
                    if rest.is_empty() {
                        return None;
                    }
                    params.insert(name.as_str(), rest.join("/"));
                }
            }
        }

        if parts.next().is_some() {
            return None;
        }

        Some(params)
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the parameter names in the order they appear.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Param(name) | PathSegment::Wildcard(name) => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }
}
