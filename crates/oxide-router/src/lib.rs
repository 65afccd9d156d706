//! # oxide-router
//!
//! A lightweight first-match URL router with middleware and param hooks.
//!
//! This crate provides:
//! - Path pattern matching with parameters (`:id` or `{id}`) and wildcards
//! - HTTP method-based routing
//! - Middleware support (before/after hooks)
//! - Param hooks that run when a matched route captures a named parameter
//!
//! Routes are matched in registration order. The router does not reorder
//! anything, so callers that care about which of two overlapping patterns
//! wins must register them in the right order (see `oxide-route-order`).
//!
//! ## Quick Start
//!
//! ```ignore
//! use oxide_router::{Router, Request, Response};
//!
//! async fn hello_handler(_req: Request) -> Response {
//!     Response::text("Hello, World!")
//! }
//!
//! async fn user_handler(req: Request) -> Response {
//!     let id = req.params.get("id").unwrap_or("unknown");
//!     Response::text(format!("user {id}"))
//! }
//!
//! let router = Router::new()
//!     .get("/", hello_handler)
//!     .get("/users/:id", user_handler);
//!
//! let response = router.handle(Request::get("/users/123")).await;
//! ```
//!
//! ## Param hooks
//!
//! ```ignore
//! use oxide_router::{MiddlewareResult, Router};
//!
//! let router = Router::new()
//!     .param("id", |req, id| async move {
//!         MiddlewareResult::Continue(req.with_extension("user", load(&id)))
//!     })
//!     .get("/users/:id", user_handler);
//! ```
//!
//! ## Registration interface
//!
//! Besides the builder methods, [`Router::add_route`],
//! [`Router::add_middleware`] and [`Router::add_param`] append boxed
//! [`Handler`]s, middleware and [`ParamHandler`]s through `&mut self`.

mod error;
mod middleware;
mod path;
mod request;
mod response;
mod router;

pub use error::{Result, RouterError};
pub use middleware::{
    BoxFuture, LoggingMiddleware, Middleware, MiddlewareResult, ParamHandler, param_handler,
};
pub use path::{PathPattern, PathSegment};
pub use request::{Method, PathParams, Request};
pub use response::Response;
pub use router::{Handler, Route, Router, handler};
