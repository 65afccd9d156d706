//! The route sequencer.
//!
//! Routes of one method are put in a total order before they reach the
//! dispatcher. The first decisive rule wins:
//!
//! 1. Higher priority first.
//! 2. Static paths before paths with a parameter segment.
//! 3. By segment count: deeper first when [`BuildOptions::depth_first`] is
//!    set, shallower first otherwise.
//! 4. Declaration order.
//!
//! Methods are ordered independently of each other.

use std::cmp::Ordering;

use oxide_router::Method;
use tracing::{debug, info};

use crate::dispatcher::Dispatcher;
use crate::options::BuildOptions;
use crate::route::Route;
use crate::store::RouteTable;

/// Compares two routes of the same method.
///
/// Never returns `Equal` for routes that differ in priority, parameter
/// presence, or depth. Routes it does call `Equal` keep their declaration
/// order under [`sequence`].
pub fn compare<H>(a: &Route<H>, b: &Route<H>, options: &BuildOptions) -> Ordering {
    let (sa, sb) = (a.shape(), b.shape());

    b.priority
        .cmp(&a.priority)
        .then_with(|| sa.has_param.cmp(&sb.has_param))
        .then_with(|| {
            if options.depth_first {
                sb.depth.cmp(&sa.depth)
            } else {
                sa.depth.cmp(&sb.depth)
            }
        })
}

/// Sorts routes into match order. The sort is stable.
pub fn sequence<'a, H>(
    routes: impl IntoIterator<Item = &'a Route<H>>,
    options: &BuildOptions,
) -> Vec<&'a Route<H>>
where
    H: 'a,
{
    let mut ordered: Vec<&Route<H>> = routes.into_iter().collect();
    ordered.sort_by(|a, b| compare(a, b, options));
    ordered
}

impl<D: Dispatcher> RouteTable<D> {
    /// The order a build would register one method's routes in.
    pub fn ordered(
        &self,
        method: Method,
        options: Option<BuildOptions>,
    ) -> Vec<&Route<D::Handler>> {
        sequence(self.routes(method), &BuildOptions::resolve(options))
    }

    /// Builds a fresh dispatcher from the declarations.
    ///
    /// `None` options mean depth-first. The table is left untouched, so
    /// building again yields the same registrations.
    pub fn build(&self, options: Option<BuildOptions>) -> D
    where
        D: Default,
    {
        self.build_into(D::default(), options)
    }

    /// Registers the declarations into an existing dispatcher and returns it.
    ///
    /// Middleware goes first, then param hooks, both in declaration order.
    /// Routes follow, one method at a time in [`Method::ALL`] order, each
    /// method's routes sorted by [`compare`].
    ///
    /// Nothing is deduplicated: handing the same dispatcher to two builds
    /// registers every declaration twice.
    pub fn build_into(&self, mut dispatcher: D, options: Option<BuildOptions>) -> D {
        let options = BuildOptions::resolve(options);

        for middleware in self.middleware() {
            dispatcher.register_middleware(middleware.clone());
        }

        for hook in self.param_hooks() {
            dispatcher.register_param(&hook.name, hook.handler.clone());
        }

        let mut route_count = 0;
        for method in Method::ALL {
            for (position, route) in sequence(self.routes(method), &options)
                .into_iter()
                .enumerate()
            {
                debug!(
                    %method,
                    path = %route.path,
                    priority = route.priority,
                    position,
                    "registering route"
                );
                dispatcher.register_route(method, &route.path, route.handler.clone());
                route_count += 1;
            }
        }

        info!(
            middleware = self.middleware().len(),
            params = self.param_hooks().len(),
            routes = route_count,
            depth_first = options.depth_first,
            "routes built"
        );

        dispatcher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{Emission, Plan};

    fn route(path: &str, priority: i32) -> Route<()> {
        Route::new(Method::Get, path, (), Some(priority))
    }

    #[test]
    fn test_priority_beats_shape() {
        let opts = BuildOptions::default();
        assert_eq!(
            compare(&route("/:a", 1), &route("/x/y/z", 0), &opts),
            Ordering::Less
        );
        assert_eq!(
            compare(&route("/a", -1), &route("/b", 0), &opts),
            Ordering::Greater
        );
    }

    #[test]
    fn test_static_beats_param() {
        let opts = BuildOptions::default();
        assert_eq!(
            compare(&route("/a/b", 0), &route("/a/:id", 0), &opts),
            Ordering::Less
        );
        assert_eq!(
            compare(&route("/:x", 0), &route("/a/b/c/d", 0), &opts),
            Ordering::Greater
        );
    }

    #[test]
    fn test_depth_direction() {
        let deep = route("/my/deep/path", 0);
        let shallow = route("/my/path", 0);
        assert_eq!(
            compare(&deep, &shallow, &BuildOptions::depth_first()),
            Ordering::Less
        );
        assert_eq!(
            compare(&deep, &shallow, &BuildOptions::shallow_first()),
            Ordering::Greater
        );
    }

    #[test]
    fn test_full_tie_is_equal() {
        let opts = BuildOptions::default();
        assert_eq!(
            compare(&route("/a/:x", 2), &route("/b/:y", 2), &opts),
            Ordering::Equal
        );
    }

    #[test]
    fn test_sequence_is_stable() {
        let routes = [route("/a", 0), route("/b", 0), route("/c/d", 0), route("/e", 0)];
        let ordered: Vec<&str> = sequence(&routes, &BuildOptions::default())
            .into_iter()
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(ordered, ["/c/d", "/a", "/b", "/e"]);
    }

    #[test]
    fn test_build_emits_hooks_before_routes() {
        let mut table: RouteTable<Plan<&str>> = RouteTable::new();
        table
            .post("/users", "create")
            .get("/users/:id", "show")
            .param("id", "load")
            .use_middleware("log");

        let plan = table.build(None);
        assert_eq!(
            plan.emissions(),
            [
                Emission::Middleware("log"),
                Emission::Param {
                    name: "id".to_string(),
                    handler: "load"
                },
                Emission::Route {
                    method: Method::Get,
                    path: "/users/:id".to_string(),
                    handler: "show"
                },
                Emission::Route {
                    method: Method::Post,
                    path: "/users".to_string(),
                    handler: "create"
                },
            ]
        );
    }

    #[test]
    fn test_build_into_reused_dispatcher_duplicates() {
        let mut table: RouteTable<Plan<&str>> = RouteTable::new();
        table.get("/a", "a").use_middleware("log");

        let plan = table.build_into(Plan::new(), None);
        let plan = table.build_into(plan, None);
        assert_eq!(plan.len(), 4);
        assert_eq!(plan.paths(Method::Get), ["/a", "/a"]);
    }

    #[test]
    fn test_ordered_matches_build() {
        let mut table: RouteTable<Plan<&str>> = RouteTable::new();
        table
            .get("/x/:id", "p")
            .get("/x/y", "s")
            .get_with_priority("/z", "z", 3);

        let ordered: Vec<&str> = table
            .ordered(Method::Get, None)
            .into_iter()
            .map(|r| r.path.as_str())
            .collect();
        assert_eq!(ordered, ["/z", "/x/y", "/x/:id"]);
        assert_eq!(table.build(None).paths(Method::Get), ordered);
    }
}
