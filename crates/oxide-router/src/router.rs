//! Main router implementation.

use std::future::Future;
use std::sync::Arc;

use crate::error::{Result, RouterError};
use crate::middleware::{BoxFuture, Middleware, MiddlewareResult, ParamHandler, param_handler};
use crate::path::PathPattern;
use crate::request::{Method, PathParams, Request};
use crate::response::Response;

/// A boxed async handler function.
pub type Handler = Arc<dyn Fn(Request) -> BoxFuture<'static, Response> + Send + Sync>;

/// Boxes an async function into a [`Handler`].
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |req| Box::pin(f(req)))
}

/// A single registered route.
#[derive(Clone)]
pub struct Route {
    /// HTTP method.
    pub method: Method,
    /// Path pattern.
    pub pattern: PathPattern,
    /// Request handler.
    pub handler: Handler,
}

impl Route {
    /// Creates a new route.
    pub fn new(method: Method, pattern: &str, handler: Handler) -> Self {
        Self {
            method,
            pattern: PathPattern::new(pattern),
            handler,
        }
    }
}

#[derive(Clone)]
struct ParamBinding {
    name: String,
    handler: ParamHandler,
}

/// A first-match HTTP router.
///
/// Routes are tried in the order they were registered and the first whose
/// pattern matches wins, so registration order decides which of two
/// overlapping routes (`/users/me` vs `/users/:id`) serves a request.
#[derive(Clone, Default)]
pub struct Router {
    /// Registered routes, in match order.
    routes: Vec<Route>,
    /// Global middleware.
    middleware: Vec<Arc<dyn Middleware>>,
    /// Param hooks, in registration order.
    params: Vec<ParamBinding>,
}

impl Router {
    /// Creates a new empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route to the end of the match order.
    pub fn add_route(&mut self, method: Method, path: &str, handler: Handler) {
        self.routes.push(Route::new(method, path, handler));
    }

    /// Appends global middleware.
    pub fn add_middleware(&mut self, mw: Arc<dyn Middleware>) {
        self.middleware.push(mw);
    }

    /// Binds a hook to a path parameter name.
    pub fn add_param(&mut self, name: impl Into<String>, handler: ParamHandler) {
        self.params.push(ParamBinding {
            name: name.into(),
            handler,
        });
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get<F, Fut>(self, path: &str, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Get, path, f)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post<F, Fut>(self, path: &str, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.route(Method::Post, path, f)
    }

    /// Adds a route with any method.
    #[must_use]
    pub fn route<F, Fut>(mut self, method: Method, path: &str, f: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add_route(method, path, handler(f));
        self
    }

    /// Adds global middleware.
    #[must_use]
    pub fn middleware(mut self, mw: impl Middleware + 'static) -> Self {
        self.add_middleware(Arc::new(mw));
        self
    }

    /// Adds a param hook.
    #[must_use]
    pub fn param<F, Fut>(mut self, name: &str, f: F) -> Self
    where
        F: Fn(Request, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = MiddlewareResult> + Send + 'static,
    {
        self.add_param(name, param_handler(f));
        self
    }

    /// Returns the registered routes in match order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the patterns registered for one method, in match order.
    pub fn patterns(&self, method: Method) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|r| r.method == method)
            .map(|r| r.pattern.pattern())
            .collect()
    }

    /// Returns the names of the bound param hooks, in registration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Returns the number of global middleware.
    pub fn middleware_len(&self) -> usize {
        self.middleware.len()
    }

    /// Handles an incoming request.
    pub fn handle(&self, mut request: Request) -> BoxFuture<'_, Response> {
        Box::pin(async move {
            let mut early = None;
            for mw in &self.middleware {
                match mw.before(&request).await {
                    MiddlewareResult::Continue(req) => request = req,
                    MiddlewareResult::Response(res) => {
                        early = Some(res);
                        break;
                    }
                }
            }

            let mut response = match early {
                Some(res) => res,
                None => self.dispatch(request).await,
            };

            // After hooks run even when a before hook short-circuited.
            for mw in self.middleware.iter().rev() {
                response = mw.after(response).await;
            }

            response
        })
    }

    async fn dispatch(&self, mut request: Request) -> Response {
        let (route, params) = match self.find_route(&request) {
            Ok(found) => found,
            Err(RouterError::MethodNotAllowed { .. }) => return Response::method_not_allowed(),
            Err(_) => return Response::not_found(),
        };
        request.params = params;

        for binding in &self.params {
            let Some(value) = request.params.get(&binding.name).map(str::to_string) else {
                continue;
            };
            match (binding.handler)(request, value).await {
                MiddlewareResult::Continue(req) => request = req,
                MiddlewareResult::Response(res) => return res,
            }
        }

        (route.handler)(request).await
    }

    /// Finds the first matching route for the request.
    fn find_route(&self, request: &Request) -> Result<(&Route, PathParams)> {
        let mut method_matched = false;

        for route in &self.routes {
            if let Some(params) = route.pattern.match_path(&request.path) {
                method_matched = true;
                if route.method == request.method {
                    return Ok((route, params));
                }
            }
        }

        if method_matched {
            Err(RouterError::MethodNotAllowed {
                method: request.method.to_string(),
                path: request.path.clone(),
            })
        } else {
            Err(RouterError::NotFound {
                method: request.method.to_string(),
                path: request.path.clone(),
            })
        }
    }
}
