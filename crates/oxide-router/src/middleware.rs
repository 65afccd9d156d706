//! Middleware and param hooks for request/response processing.

use std::future::Future;
use std::sync::Arc;

pub use futures::future::BoxFuture;
use tracing::info;

use crate::request::Request;
use crate::response::Response;

/// Result of middleware processing.
pub enum MiddlewareResult {
    /// Continue to the next middleware/handler.
    Continue(Request),
    /// Stop processing and return this response.
    Response(Response),
}

/// Trait for middleware that processes requests and responses.
///
/// Middleware can:
/// - Modify the request before it reaches the handler
/// - Short-circuit processing and return a response
/// - Modify the response after the handler runs
///
/// `before` hooks run in registration order, `after` hooks in reverse.
pub trait Middleware: Send + Sync {
    /// Called before the request handler.
    ///
    /// Can modify the request or short-circuit with a response.
    fn before<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, MiddlewareResult>;

    /// Called after the request handler.
    ///
    /// Can modify the response.
    fn after<'a>(&'a self, res: Response) -> BoxFuture<'a, Response>;
}

/// A hook bound to a path parameter name.
///
/// Called with the request and the captured value whenever the matched route
/// captured a parameter of that name, before the route handler runs.
pub type ParamHandler =
    Arc<dyn Fn(Request, String) -> BoxFuture<'static, MiddlewareResult> + Send + Sync>;

/// Boxes an async closure into a [`ParamHandler`].
///
/// # Example
///
/// ```
/// use oxide_router::{param_handler, MiddlewareResult};
///
/// let load_user = param_handler(|req, id| async move {
///     MiddlewareResult::Continue(req.with_extension("user", format!("user-{id}")))
/// });
/// # let _ = load_user;
/// ```
pub fn param_handler<F, Fut>(f: F) -> ParamHandler
where
    F: Fn(Request, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MiddlewareResult> + Send + 'static,
{
    Arc::new(move |req, value| Box::pin(f(req, value)))
}

/// Middleware that logs requests and response statuses.
pub struct LoggingMiddleware;

impl Middleware for LoggingMiddleware {
    fn before<'a>(&'a self, req: &'a Request) -> BoxFuture<'a, MiddlewareResult> {
        Box::pin(async move {
            info!(method = %req.method, path = %req.path, "request");
            MiddlewareResult::Continue(req.clone())
        })
    }

    fn after<'a>(&'a self, res: Response) -> BoxFuture<'a, Response> {
        Box::pin(async move {
            info!(status = res.status, "response");
            res
        })
    }
}
