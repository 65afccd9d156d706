//! Build order for concrete declaration sets.

mod common;
use common::*;

use oxide_route_order::{BuildOptions, Emission, Manifest, RouteOrderError};
use oxide_router::Method;
use serde_json::json;

#[test]
fn deep_path_registered_before_shallow_by_default() {
    let mut t = table();
    t.get("/my/path", "shallow").get("/my/deep/path", "deep");

    assert_eq!(get_order(&t, None), ["/my/deep/path", "/my/path"]);
}

#[test]
fn static_path_registered_before_param_path() {
    let mut t = table();
    t.get("/a/:id", "param").get("/a/b", "static");

    assert_eq!(get_order(&t, None), ["/a/b", "/a/:id"]);
}

#[test]
fn higher_priority_registered_first() {
    let mut t = table();
    t.get("/low", "low").get_with_priority("/high", "high", 5);

    assert_eq!(get_order(&t, None), ["/high", "/low"]);
}

#[test]
fn shallow_first_reverses_depth_tie_break() {
    let mut t = table();
    t.get("/my/path", "shallow").get("/my/deep/path", "deep");

    assert_eq!(
        get_order(&t, Some(BuildOptions::shallow_first())),
        ["/my/path", "/my/deep/path"]
    );
}

#[test]
fn get_declaration_with_one_argument_is_rejected() {
    let err = Manifest::from_value(&json!({"routes": {"get": [["/my/path"]]}})).unwrap_err();

    assert!(err.is_invalid_argument());
    match err {
        RouteOrderError::Arity {
            operation,
            expected,
            found,
        } => {
            assert_eq!(operation, "get");
            assert_eq!(expected, "2 or 3");
            assert_eq!(found, 1);
        }
        other => panic!("expected arity error, got {other:?}"),
    }
}

#[test]
fn options_without_depth_first_default_to_deep() {
    let mut t = table();
    t.get("/my/path", "shallow").get("/my/deep/path", "deep");
    let options = BuildOptions::from_json("{}").unwrap();

    assert_eq!(get_order(&t, Some(options)), ["/my/deep/path", "/my/path"]);
}

#[test]
fn priority_outranks_static_and_depth() {
    let mut t = table();
    t.get("/a/b/c", "deep")
        .get("/a", "shallow")
        .get_with_priority("/:any", "catch_all", 1)
        .get_with_priority("/neg", "neg", -1);

    assert_eq!(get_order(&t, None), ["/:any", "/a/b/c", "/a", "/neg"]);
}

#[test]
fn depth_only_breaks_ties_within_the_same_param_class() {
    let mut t = table();
    t.get("/x/:a/:b/:c", "deep_param")
        .get("/x", "shallow_static")
        .get("/x/:a", "shallow_param")
        .get("/x/y/z", "deep_static");

    assert_eq!(
        get_order(&t, None),
        ["/x/y/z", "/x", "/x/:a/:b/:c", "/x/:a"]
    );
    assert_eq!(
        get_order(&t, Some(BuildOptions::shallow_first())),
        ["/x", "/x/y/z", "/x/:a", "/x/:a/:b/:c"]
    );
}

#[test]
fn duplicate_paths_are_all_registered_in_declaration_order() {
    let mut t = table();
    t.get("/dup", "first").get("/other", "x").get("/dup", "second");

    let plan = t.build(None);
    assert_eq!(plan.paths(Method::Get), ["/dup", "/other", "/dup"]);
    assert_eq!(plan.handlers(Method::Get), [&"first", &"x", &"second"]);
}

#[test]
fn braced_params_count_as_params() {
    let mut t = table();
    t.get("/users/{id}", "braced").get("/users/new", "static");

    assert_eq!(get_order(&t, None), ["/users/new", "/users/{id}"]);
}

#[test]
fn wildcards_count_as_params() {
    let mut t = table();
    t.get("/files/*rest", "bare")
        .get("/files/{*rest}", "braced")
        .get("/files/readme", "static");

    assert_eq!(
        get_order(&t, None),
        ["/files/readme", "/files/*rest", "/files/{*rest}"]
    );
}

#[test]
fn unclosed_brace_is_a_static_segment() {
    let mut t = table();
    t.get("/users/{id", "odd").get("/users/new", "static");

    assert_eq!(get_order(&t, None), ["/users/{id", "/users/new"]);
}

#[test]
fn methods_are_ordered_independently() {
    let mut t = table();
    t.get("/a", "a")
        .post_with_priority("/z", "z", 100)
        .get("/b/c", "bc")
        .post("/:id", "p");

    let plan = t.build(None);
    assert_eq!(plan.paths(Method::Get), ["/b/c", "/a"]);
    assert_eq!(plan.paths(Method::Post), ["/z", "/:id"]);
}

#[test]
fn emission_order_is_middleware_params_then_routes_by_method() {
    let mut t = table();
    t.delete("/d", "del")
        .param("id", "load_id")
        .post("/p", "post")
        .use_middleware("log")
        .get("/g", "get")
        .param("slug", "load_slug")
        .use_middleware("auth");

    let kinds: Vec<String> = t
        .build(None)
        .emissions()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        kinds,
        [
            "use log",
            "use auth",
            "param id load_id",
            "param slug load_slug",
            "GET /g -> get",
            "POST /p -> post",
            "DELETE /d -> del",
        ]
    );
}

#[test]
fn rebuilding_yields_identical_registrations() {
    let mut t = table();
    t.get("/a/:x", "ax")
        .get("/a/b", "ab")
        .get_with_priority("/c", "c", 2)
        .use_middleware("log");

    assert_eq!(t.build(None), t.build(None));
}

#[test]
fn declarations_after_a_build_show_up_in_the_next_build() {
    let mut t = table();
    t.get("/a", "a");
    let first = t.build(None);

    t.get("/a/b", "ab");
    let second = t.build(None);

    assert_eq!(first.paths(Method::Get), ["/a"]);
    assert_eq!(second.paths(Method::Get), ["/a/b", "/a"]);
}

#[test]
fn manifest_order_matches_typed_declarations() {
    let manifest = Manifest::from_json(
        r#"{
            "options": {"depthFirst": false},
            "use": ["log"],
            "routes": {
                "get": [["/my/deep/path", "deep"], ["/my/path", "shallow"], ["/:x", "x", 3]]
            }
        }"#,
    )
    .unwrap();

    let plan = manifest.plan_table().build(manifest.options);
    assert_eq!(plan.paths(Method::Get), ["/:x", "/my/path", "/my/deep/path"]);
    assert_eq!(plan.emissions()[0], Emission::Middleware("log".to_string()));
}
