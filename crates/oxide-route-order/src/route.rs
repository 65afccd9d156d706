//! Declared routes and hooks.

use oxide_router::{Method, PathSegment};

/// Separator between path segments.
pub const SEGMENT_DELIMITER: char = '/';

/// A declared endpoint waiting to be sequenced.
#[derive(Debug, Clone)]
pub struct Route<H> {
    /// HTTP method; routes are only ever ordered against the same method.
    pub method: Method,
    /// Path pattern, passed to the dispatcher untouched.
    pub path: String,
    /// Opaque handler, forwarded to the dispatcher.
    pub handler: H,
    /// Higher priorities are tried first.
    pub priority: i32,
}

impl<H> Route<H> {
    /// Creates a route. `None` priority means 0.
    pub fn new(method: Method, path: impl Into<String>, handler: H, priority: Option<i32>) -> Self {
        Self {
            method,
            path: path.into(),
            handler,
            priority: priority.unwrap_or_default(),
        }
    }

    /// Structural facts about the path used by the comparator.
    pub fn shape(&self) -> PathShape {
        PathShape::of(&self.path)
    }
}

/// What the sequencer needs to know about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathShape {
    /// Any segment is a parameter or wildcard to the router.
    pub has_param: bool,
    /// Number of `/`-delimited pieces, empty ones included.
    pub depth: usize,
}

impl PathShape {
    /// Derives the shape of a path pattern.
    ///
    /// A segment is a parameter when [`PathSegment::parse`] says it is not a
    /// literal: `:id`, `{id}`, `*rest` and `{*rest}`. Depth counts every piece
    /// produced by splitting on `/`, so `/my/path` is 3 deep and a trailing
    /// slash adds one.
    pub fn of(path: &str) -> Self {
        let mut has_param = false;
        let mut depth = 0;
        for segment in path.split(SEGMENT_DELIMITER) {
            depth += 1;
            has_param |= !PathSegment::parse(segment).is_literal();
        }
        Self { has_param, depth }
    }
}

/// A hook bound to a path parameter name.
#[derive(Debug, Clone)]
pub struct ParamHook<P> {
    /// Parameter identifier.
    pub name: String,
    /// Opaque handler, forwarded to the dispatcher.
    pub handler: P,
}
