//! JSON declaration manifests.
//!
//! A manifest lists declarations the way they would be written in code, each
//! one an argument list:
//!
//! ```json
//! {
//!   "options": { "depthFirst": true },
//!   "use": ["logger"],
//!   "param": [["id", "load_user"]],
//!   "routes": {
//!     "get": [["/users/:id", "show_user"], ["/users/me", "show_me", 5]]
//!   }
//! }
//! ```
//!
//! Handlers are referred to by name and resolved through [`Bindings`]. JSON is
//! untyped, so this is where argument shapes are checked.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::{fmt, slice};

use oxide_router::Method;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::Value;

use crate::dispatcher::{Dispatcher, Plan};
use crate::error::{Result, RouteOrderError};
use crate::options::BuildOptions;
use crate::store::RouteTable;

/// A route declaration read from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecl {
    /// HTTP method.
    pub method: Method,
    /// Path pattern.
    pub path: String,
    /// Name of the bound handler.
    pub handler: String,
    /// Explicit priority, if given.
    pub priority: Option<i32>,
}

/// A param hook declaration read from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDecl {
    /// Parameter name.
    pub name: String,
    /// Name of the bound hook.
    pub handler: String,
}

/// Declarations parsed from a JSON manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Build options, if the manifest sets them.
    pub options: Option<BuildOptions>,
    /// Middleware names, in declaration order.
    pub middleware: Vec<String>,
    /// Param hooks, in declaration order.
    pub params: Vec<ParamDecl>,
    /// Routes, in declaration order within each method.
    pub routes: Vec<RouteDecl>,
}

impl Manifest {
    /// Parses a manifest from a JSON string.
    ///
    /// Unlike [`Manifest::from_value`], this sees the raw text and rejects an
    /// object that repeats a key, which a [`Value`] would collapse.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        serde_json::from_str::<UniqueKeys>(json)
            .map_err(|e| RouteOrderError::InvalidManifest(e.to_string()))?;
        Self::from_value(&value)
    }

    /// Parses a manifest from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(doc) = value.as_object() else {
            return Err(RouteOrderError::InvalidManifest(
                "manifest must be a JSON object".to_string(),
            ));
        };

        let mut manifest = Self::default();
        for (key, section) in doc {
            match key.as_str() {
                "options" => manifest.options = Some(BuildOptions::from_value(section)?),
                "use" => {
                    for entry in entries(key, section)? {
                        manifest.middleware.push(parse_use(entry)?);
                    }
                }
                "param" => {
                    for entry in entries(key, section)? {
                        manifest.params.push(parse_param(entry)?);
                    }
                }
                "routes" => manifest.routes = parse_routes(section)?,
                other => {
                    return Err(RouteOrderError::InvalidManifest(format!(
                        "unknown key '{other}'"
                    )));
                }
            }
        }
        Ok(manifest)
    }

    /// Declares everything into `table`, resolving names through `bindings`.
    ///
    /// All names are resolved before anything is declared, so on error the
    /// table is unchanged.
    pub fn declare<D: Dispatcher>(
        &self,
        table: &mut RouteTable<D>,
        bindings: &Bindings<D>,
    ) -> Result<()> {
        let middleware = self
            .middleware
            .iter()
            .map(|name| bindings.resolve_middleware(name))
            .collect::<Result<Vec<_>>>()?;
        let params = self
            .params
            .iter()
            .map(|p| -> Result<_> {
                Ok((p.name.as_str(), bindings.resolve_param(&p.handler)?))
            })
            .collect::<Result<Vec<_>>>()?;
        let routes = self
            .routes
            .iter()
            .map(|r| -> Result<_> { Ok((r, bindings.resolve_handler(&r.handler)?)) })
            .collect::<Result<Vec<_>>>()?;

        for mw in middleware {
            table.use_middleware(mw);
        }
        for (name, handler) in params {
            table.param(name, handler);
        }
        for (decl, handler) in routes {
            table.route(decl.method, decl.path.as_str(), handler, decl.priority);
        }
        Ok(())
    }

    /// Declares everything into a table whose handlers are the names
    /// themselves. Used to inspect the order without real handlers.
    pub fn plan_table(&self) -> RouteTable<Plan<String>> {
        let mut table = RouteTable::new();
        for name in &self.middleware {
            table.use_middleware(name.clone());
        }
        for p in &self.params {
            table.param(p.name.as_str(), p.handler.clone());
        }
        for r in &self.routes {
            table.route(r.method, r.path.as_str(), r.handler.clone(), r.priority);
        }
        table
    }
}

/// Name → handler tables used to resolve a [`Manifest`].
pub struct Bindings<D: Dispatcher> {
    handlers: HashMap<String, D::Handler>,
    middleware: HashMap<String, D::Middleware>,
    params: HashMap<String, D::ParamHandler>,
}

impl<D: Dispatcher> Default for Bindings<D> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            middleware: HashMap::new(),
            params: HashMap::new(),
        }
    }
}

impl<D: Dispatcher> Bindings<D> {
    /// Creates empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a route handler name.
    #[must_use]
    pub fn handler(mut self, name: impl Into<String>, handler: D::Handler) -> Self {
        self.handlers.insert(name.into(), handler);
        self
    }

    /// Binds a middleware name.
    #[must_use]
    pub fn middleware(mut self, name: impl Into<String>, middleware: D::Middleware) -> Self {
        self.middleware.insert(name.into(), middleware);
        self
    }

    /// Binds a param hook name.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, handler: D::ParamHandler) -> Self {
        self.params.insert(name.into(), handler);
        self
    }

    fn resolve_handler(&self, name: &str) -> Result<D::Handler> {
        lookup(&self.handlers, "handler", name)
    }

    fn resolve_middleware(&self, name: &str) -> Result<D::Middleware> {
        lookup(&self.middleware, "middleware", name)
    }

    fn resolve_param(&self, name: &str) -> Result<D::ParamHandler> {
        lookup(&self.params, "param hook", name)
    }
}

fn lookup<T: Clone>(table: &HashMap<String, T>, kind: &'static str, name: &str) -> Result<T> {
    table
        .get(name)
        .cloned()
        .ok_or_else(|| RouteOrderError::UnboundHandler {
            kind,
            name: name.to_string(),
        })
}

fn entries<'a>(key: &str, section: &'a Value) -> Result<&'a [Value]> {
    section.as_array().map(Vec::as_slice).ok_or_else(|| {
        RouteOrderError::InvalidManifest(format!("'{key}' must be an array of declarations"))
    })
}

/// A declaration's arguments. A bare value is a one-argument call.
fn args(entry: &Value) -> &[Value] {
    match entry {
        Value::Array(items) => items,
        other => slice::from_ref(other),
    }
}

fn parse_use(entry: &Value) -> Result<String> {
    let args = args(entry);
    if args.len() != 1 {
        return Err(RouteOrderError::Arity {
            operation: "use".to_string(),
            expected: "1",
            found: args.len(),
        });
    }
    handler_name("use", &args[0])
}

fn parse_param(entry: &Value) -> Result<ParamDecl> {
    let args = args(entry);
    let [name, handler] = args else {
        return Err(RouteOrderError::Arity {
            operation: "param".to_string(),
            expected: "2",
            found: args.len(),
        });
    };
    let name = name.as_str().ok_or(RouteOrderError::ParamNameType)?;
    Ok(ParamDecl {
        name: name.to_string(),
        handler: handler_name("param", handler)?,
    })
}

fn parse_routes(section: &Value) -> Result<Vec<RouteDecl>> {
    let Some(groups) = section.as_object() else {
        return Err(RouteOrderError::InvalidManifest(
            "'routes' must be an object keyed by method".to_string(),
        ));
    };

    let mut seen = BTreeSet::new();
    let mut routes = Vec::new();
    for (key, decls) in groups {
        let method: Method = key
            .parse()
            .map_err(|_| RouteOrderError::InvalidManifest(format!("unknown method '{key}'")))?;
        if !seen.insert(method) {
            return Err(RouteOrderError::InvalidManifest(format!(
                "method {method} is declared by more than one key"
            )));
        }
        for entry in entries(key, decls)? {
            routes.push(parse_route(method, entry)?);
        }
    }
    Ok(routes)
}

fn parse_route(method: Method, entry: &Value) -> Result<RouteDecl> {
    let operation = method.as_str().to_ascii_lowercase();
    let args = args(entry);
    if !(2..=3).contains(&args.len()) {
        return Err(RouteOrderError::Arity {
            operation,
            expected: "2 or 3",
            found: args.len(),
        });
    }

    let Some(path) = args[0].as_str() else {
        return Err(RouteOrderError::PathType { operation });
    };
    let handler = handler_name(&operation, &args[1])?;
    let priority = match args.get(2) {
        None | Some(Value::Null) => None,
        Some(value) => Some(priority(&operation, value)?),
    };

    Ok(RouteDecl {
        method,
        path: path.to_string(),
        handler,
        priority,
    })
}

fn handler_name(operation: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| RouteOrderError::HandlerType {
            operation: operation.to_string(),
        })
}

fn priority(operation: &str, value: &Value) -> Result<i32> {
    value
        .as_i64()
        .and_then(|p| i32::try_from(p).ok())
        .ok_or_else(|| RouteOrderError::PriorityType {
            operation: operation.to_string(),
            value: value.to_string(),
        })
}

/// Walks a JSON document and fails on any object with a repeated key.
struct UniqueKeys;

impl<'de> Deserialize<'de> for UniqueKeys {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(UniqueKeysVisitor)
    }
}

struct UniqueKeysVisitor;

impl<'de> Visitor<'de> for UniqueKeysVisitor {
    type Value = UniqueKeys;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E>(self, _: bool) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_i64<E>(self, _: i64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_u64<E>(self, _: u64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_f64<E>(self, _: f64) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_str<E>(self, _: &str) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_unit<E>(self) -> std::result::Result<UniqueKeys, E> {
        Ok(UniqueKeys)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<UniqueKeys, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<UniqueKeys>()?.is_some() {}
        Ok(UniqueKeys)
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<UniqueKeys, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            map.next_value::<UniqueKeys>()?;
            if seen.contains(&key) {
                return Err(de::Error::custom(format!("duplicate key '{key}'")));
            }
            seen.insert(key);
        }
        Ok(UniqueKeys)
    }
}
