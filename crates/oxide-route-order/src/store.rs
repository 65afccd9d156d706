//! The registration store.
//!
//! [`RouteTable`] accumulates declarations in the order they are made. It does
//! not sort and it never talks to the dispatcher; that happens at build time
//! (see [`crate::sequencer`]).

use std::collections::BTreeMap;
use std::fmt;

use oxide_router::Method;
use tracing::trace;

use crate::dispatcher::Dispatcher;
use crate::route::{ParamHook, Route};

/// Declared routes, param hooks and middleware for one dispatcher type.
///
/// # Example
///
/// ```
/// use oxide_route_order::{BuildOptions, Plan, RouteTable};
/// use oxide_router::Method;
///
/// let mut table: RouteTable<Plan<&str>> = RouteTable::new();
/// table
///     .get("/my/path", "shallow")
///     .get("/my/deep/path", "deep")
///     .get_with_priority("/low", "first", 5);
///
/// let plan = table.build(None);
/// assert_eq!(plan.paths(Method::Get), ["/low", "/my/deep/path", "/my/path"]);
///
/// let plan = table.build(Some(BuildOptions::shallow_first()));
/// assert_eq!(plan.paths(Method::Get), ["/low", "/my/path", "/my/deep/path"]);
/// ```
pub struct RouteTable<D: Dispatcher> {
    routes: BTreeMap<Method, Vec<Route<D::Handler>>>,
    params: Vec<ParamHook<D::ParamHandler>>,
    middleware: Vec<D::Middleware>,
}

impl<D: Dispatcher> Default for RouteTable<D> {
    fn default() -> Self {
        Self {
            routes: BTreeMap::new(),
            params: Vec::new(),
            middleware: Vec::new(),
        }
    }
}

impl<D: Dispatcher> Clone for RouteTable<D> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            params: self.params.clone(),
            middleware: self.middleware.clone(),
        }
    }
}

impl<D: Dispatcher> fmt::Debug for RouteTable<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (method, routes) in &self.routes {
            let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
            map.entry(method, &paths);
        }
        map.finish()
    }
}

impl<D: Dispatcher> RouteTable<D> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a route. A `None` priority is 0.
    pub fn route(
        &mut self,
        method: Method,
        path: impl Into<String>,
        handler: D::Handler,
        priority: Option<i32>,
    ) -> &mut Self {
        let route = Route::new(method, path, handler, priority);
        trace!(%method, path = %route.path, priority = route.priority, "declared route");
        self.routes.entry(method).or_default().push(route);
        self
    }

    /// Declares a GET route with priority 0.
    pub fn get(&mut self, path: impl Into<String>, handler: D::Handler) -> &mut Self {
        self.route(Method::Get, path, handler, None)
    }

    /// Declares a GET route with an explicit priority.
    pub fn get_with_priority(
        &mut self,
        path: impl Into<String>,
        handler: D::Handler,
        priority: i32,
    ) -> &mut Self {
        self.route(Method::Get, path, handler, Some(priority))
    }

    /// Declares a POST route with priority 0.
    pub fn post(&mut self, path: impl Into<String>, handler: D::Handler) -> &mut Self {
        self.route(Method::Post, path, handler, None)
    }

    /// Declares a POST route with an explicit priority.
    pub fn post_with_priority(
        &mut self,
        path: impl Into<String>,
        handler: D::Handler,
        priority: i32,
    ) -> &mut Self {
        self.route(Method::Post, path, handler, Some(priority))
    }

    /// Declares a PUT route with priority 0.
    pub fn put(&mut self, path: impl Into<String>, handler: D::Handler) -> &mut Self {
        self.route(Method::Put, path, handler, None)
    }

    /// Declares a PUT route with an explicit priority.
    pub fn put_with_priority(
        &mut self,
        path: impl Into<String>,
        handler: D::Handler,
        priority: i32,
    ) -> &mut Self {
        self.route(Method::Put, path, handler, Some(priority))
    }

    /// Declares a PATCH route with priority 0.
    pub fn patch(&mut self, path: impl Into<String>, handler: D::Handler) -> &mut Self {
        self.route(Method::Patch, path, handler, None)
    }

    /// Declares a PATCH route with an explicit priority.
    pub fn patch_with_priority(
        &mut self,
        path: impl Into<String>,
        handler: D::Handler,
        priority: i32,
    ) -> &mut Self {
        self.route(Method::Patch, path, handler, Some(priority))
    }

    /// Declares a DELETE route with priority 0.
    pub fn delete(&mut self, path: impl Into<String>, handler: D::Handler) -> &mut Self {
        self.route(Method::Delete, path, handler, None)
    }

    /// Declares a DELETE route with an explicit priority.
    pub fn delete_with_priority(
        &mut self,
        path: impl Into<String>,
        handler: D::Handler,
        priority: i32,
    ) -> &mut Self {
        self.route(Method::Delete, path, handler, Some(priority))
    }

    /// Declares global middleware. Middleware is registered in declaration
    /// order, ahead of everything else.
    pub fn use_middleware(&mut self, middleware: D::Middleware) -> &mut Self {
        trace!(index = self.middleware.len(), "declared middleware");
        self.middleware.push(middleware);
        self
    }

    /// Declares a hook for a path parameter name.
    pub fn param(&mut self, name: impl Into<String>, handler: D::ParamHandler) -> &mut Self {
        let name = name.into();
        trace!(%name, "declared param hook");
        self.params.push(ParamHook { name, handler });
        self
    }

    /// Routes declared for a method, in declaration order.
    pub fn routes(&self, method: Method) -> &[Route<D::Handler>] {
        self.routes.get(&method).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Param hooks, in declaration order.
    pub fn param_hooks(&self) -> &[ParamHook<D::ParamHandler>] {
        &self.params
    }

    /// Middleware, in declaration order.
    pub fn middleware(&self) -> &[D::Middleware] {
        &self.middleware
    }

    /// Total number of declared routes across all methods.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    /// True if nothing at all has been declared.
    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.params.is_empty() && self.middleware.is_empty()
    }
}
