//! # oxide-route-order
//!
//! Deterministic route ordering in front of a first-match dispatcher.
//!
//! Routes, middleware and param hooks are declared into a [`RouteTable`] in
//! any order. Nothing reaches the dispatcher until [`RouteTable::build`],
//! which registers middleware, then param hooks, then each method's routes
//! sorted so that:
//!
//! - a higher priority is tried first,
//! - a static path is tried before a path with a parameter segment,
//! - among equals, deeper paths go first (or shallower, with
//!   [`BuildOptions::shallow_first`]),
//! - anything still tied keeps its declaration order.
//!
//! ## Quick Start
//!
//! ```ignore
//! use oxide_route_order::RouteTable;
//! use oxide_router::{handler, Router, Request, Response};
//!
//! let mut table: RouteTable<Router> = RouteTable::new();
//! table
//!     .get("/users/:id", handler(show_user))
//!     .get("/users/me", handler(show_me));
//!
//! // `/users/me` is registered first even though it was declared second.
//! let router = table.build(None);
//! let response = router.handle(Request::get("/users/me")).await;
//! ```
//!
//! ## Manifests
//!
//! Declarations can also be loaded from JSON, with handlers referenced by
//! name and resolved through [`Bindings`]. See [`manifest`].
//!
//! ## Dispatchers
//!
//! Anything implementing [`Dispatcher`] can be built into. The crate provides
//! implementations for [`oxide_router::Router`] and for [`Plan`], which just
//! records the registrations.

mod dispatcher;
mod error;
pub mod manifest;
mod options;
mod route;
pub mod sequencer;
mod store;

pub use dispatcher::{Dispatcher, Emission, Plan};
pub use error::{Result, RouteOrderError};
pub use manifest::{Bindings, Manifest, ParamDecl, RouteDecl};
pub use options::BuildOptions;
pub use route::{ParamHook, PathShape, Route, SEGMENT_DELIMITER};
pub use sequencer::{compare, sequence};
pub use store::RouteTable;
