//! The registration interface of the underlying dispatcher.

use std::fmt;
use std::sync::Arc;

use oxide_router::{Handler, Method, Middleware, ParamHandler, Router};

/// Something that accepts ordered registrations.
///
/// The sequencer calls these in its final order and never calls handlers
/// itself. Handler types are `Clone` because a store can be built more than
/// once.
pub trait Dispatcher {
    /// Route handler type.
    type Handler: Clone;
    /// Middleware type.
    type Middleware: Clone;
    /// Param hook handler type.
    type ParamHandler: Clone;

    /// Registers global middleware.
    fn register_middleware(&mut self, middleware: Self::Middleware);

    /// Registers a hook for a path parameter name.
    fn register_param(&mut self, name: &str, handler: Self::ParamHandler);

    /// Registers a route at the end of the dispatcher's match order.
    fn register_route(&mut self, method: Method, path: &str, handler: Self::Handler);
}

impl Dispatcher for Router {
    type Handler = Handler;
    type Middleware = Arc<dyn Middleware>;
    type ParamHandler = ParamHandler;

    fn register_middleware(&mut self, middleware: Self::Middleware) {
        self.add_middleware(middleware);
    }

    fn register_param(&mut self, name: &str, handler: Self::ParamHandler) {
        self.add_param(name, handler);
    }

    fn register_route(&mut self, method: Method, path: &str, handler: Self::Handler) {
        self.add_route(method, path, handler);
    }
}

/// One registration call, as recorded by [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission<T> {
    /// `register_middleware`
    Middleware(T),
    /// `register_param`
    Param {
        /// Parameter name.
        name: String,
        /// Hook handler.
        handler: T,
    },
    /// `register_route`
    Route {
        /// HTTP method.
        method: Method,
        /// Path pattern.
        path: String,
        /// Route handler.
        handler: T,
    },
}

impl<T: fmt::Display> fmt::Display for Emission<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Middleware(handler) => write!(f, "use {handler}"),
            Self::Param { name, handler } => write!(f, "param {name} {handler}"),
            Self::Route {
                method,
                path,
                handler,
            } => write!(f, "{method} {path} -> {handler}"),
        }
    }
}

/// A dispatcher that only records what it was asked to register.
///
/// Handy for printing the order a build would produce, and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan<T> {
    emissions: Vec<Emission<T>>,
}

impl<T> Default for Plan<T> {
    fn default() -> Self {
        Self {
            emissions: Vec::new(),
        }
    }
}

impl<T> Plan<T> {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded registrations, in call order.
    pub fn emissions(&self) -> &[Emission<T>] {
        &self.emissions
    }

    /// Route paths registered for one method, in call order.
    pub fn paths(&self, method: Method) -> Vec<&str> {
        self.emissions
            .iter()
            .filter_map(|e| match e {
                Emission::Route { method: m, path, .. } if *m == method => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Route handlers registered for one method, in call order.
    pub fn handlers(&self, method: Method) -> Vec<&T> {
        self.emissions
            .iter()
            .filter_map(|e| match e {
                Emission::Route {
                    method: m, handler, ..
                } if *m == method => Some(handler),
                _ => None,
            })
            .collect()
    }

    /// Number of recorded registrations.
    pub fn len(&self) -> usize {
        self.emissions.len()
    }

    /// True if nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.emissions.is_empty()
    }
}

impl<T: Clone> Dispatcher for Plan<T> {
    type Handler = T;
    type Middleware = T;
    type ParamHandler = T;

    fn register_middleware(&mut self, middleware: T) {
        self.emissions.push(Emission::Middleware(middleware));
    }

    fn register_param(&mut self, name: &str, handler: T) {
        self.emissions.push(Emission::Param {
            name: name.to_string(),
            handler,
        });
    }

    fn register_route(&mut self, method: Method, path: &str, handler: T) {
        self.emissions.push(Emission::Route {
            method,
            path: path.to_string(),
            handler,
        });
    }
}

#[cfg(test)]
mod tests {
    use oxide_router::{LoggingMiddleware, MiddlewareResult, Response, handler, param_handler};

    use super::*;

    #[test]
    fn test_plan_records_in_call_order() {
        let mut plan = Plan::new();
        plan.register_route(Method::Get, "/a", "a");
        plan.register_middleware("log");
        plan.register_route(Method::Post, "/b", "b");
        plan.register_param("id", "load");

        assert_eq!(plan.len(), 4);
        assert_eq!(plan.emissions()[1], Emission::Middleware("log"));
        assert_eq!(plan.paths(Method::Get), ["/a"]);
        assert_eq!(plan.handlers(Method::Post), [&"b"]);
    }

    #[test]
    fn test_emission_display() {
        let route = Emission::Route {
            method: Method::Get,
            path: "/users/:id".to_string(),
            handler: "show_user",
        };
        assert_eq!(route.to_string(), "GET /users/:id -> show_user");
        assert_eq!(Emission::Middleware("log").to_string(), "use log");
        let param = Emission::Param {
            name: "id".to_string(),
            handler: "load",
        };
        assert_eq!(param.to_string(), "param id load");
    }

    #[test]
    fn test_router_dispatcher() {
        let mut router = Router::new();
        router.register_middleware(Arc::new(LoggingMiddleware));
        router.register_param(
            "id",
            param_handler(|req, _| async move { MiddlewareResult::Continue(req) }),
        );
        router.register_route(Method::Get, "/z", handler(|_| async { Response::ok() }));
        router.register_route(Method::Get, "/a", handler(|_| async { Response::ok() }));

        assert_eq!(router.patterns(Method::Get), ["/z", "/a"]);
        assert_eq!(router.middleware_len(), 1);
        assert_eq!(router.param_names().collect::<Vec<_>>(), ["id"]);
    }
}
