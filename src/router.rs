//! Radix-tree request router with named routes.
//!
//! One matchit tree per HTTP method. Routes registered with
//! [`Router::named`] are also recorded in a registry of
//! `(endpoint, pattern)` pairs; that registry is what the `url_for` script
//! and [`Router::url_for`] are built from.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::Full;
use matchit::Router as MatchitRouter;
use tracing::trace;

use crate::handler::{Handler, Route};
use crate::params::Params;
use crate::request::Request;
use crate::response::Response;
use crate::rule::Rule;
use crate::url_map::UrlMap;

/// Shared, append-only list of named routes.
///
/// The router appends while it is being built; script requests only take
/// snapshots.
#[derive(Clone, Default)]
pub(crate) struct Registry(Arc<RwLock<Vec<(String, String)>>>);

impl Registry {
    fn record(&self, endpoint: &str, pattern: &str) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((endpoint.to_owned(), pattern.to_owned()));
    }

    pub(crate) fn snapshot(&self) -> UrlMap {
        let rules = self.0.read().unwrap_or_else(PoisonError::into_inner);
        UrlMap::from_rules(rules.iter().map(|(e, p)| (e.as_str(), p.as_str())))
    }

    fn contains(&self, endpoint: &str) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|(e, _)| e == endpoint)
    }
}

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Registration methods return `self` so calls chain.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<Route>>,
    registry: Registry,
    pub(crate) script_endpoint: Option<String>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), registry: Registry::default(), script_endpoint: None }
    }

    /// Registers an unnamed route. It is served but cannot be built with
    /// `url_for`.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is invalid or conflicts with a route already
    /// registered for `method`.
    pub fn on(mut self, method: Method, pattern: &str, handler: impl Handler) -> Self {
        if let Err(e) = self.insert(&method, pattern, None, handler) {
            panic!("invalid route `{pattern}`: {e}");
        }
        self
    }

    /// Registers a route under an endpoint name.
    ///
    /// Patterns use `<name>` / `<converter:name>` placeholders, and
    /// `req.param("name")` retrieves them. One endpoint may own several
    /// patterns; `url_for` tries them in registration order.
    ///
    /// ```rust,no_run
    /// # use urlmap::{Method, Request, Response, Router};
    /// # async fn user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .named(Method::GET, "/users/<int:id>/<tab>", "user", user)
    ///     .named(Method::GET, "/users/<int:id>",       "user", user);
    /// ```
    ///
    /// # Panics
    ///
    /// Same conditions as [`Router::on`].
    pub fn named(
        mut self,
        method: Method,
        pattern: &str,
        endpoint: &str,
        handler: impl Handler,
    ) -> Self {
        if let Err(e) = self.try_named(method, pattern, endpoint, handler) {
            panic!("invalid route `{pattern}`: {e}");
        }
        self
    }

    pub(crate) fn try_named(
        &mut self,
        method: Method,
        pattern: &str,
        endpoint: &str,
        handler: impl Handler,
    ) -> Result<(), matchit::InsertError> {
        self.insert(&method, pattern, Some(endpoint), handler)?;
        self.registry.record(endpoint, pattern);
        Ok(())
    }

    fn insert(
        &mut self,
        method: &Method,
        pattern: &str,
        endpoint: Option<&str>,
        handler: impl Handler,
    ) -> Result<(), matchit::InsertError> {
        let path = Rule::new(pattern).to_matchit();
        self.routes
            .entry(method.clone())
            .or_default()
            .insert(path, Route::new(endpoint, handler))
    }

    /// Whether any route is registered under `endpoint`.
    pub fn has_endpoint(&self, endpoint: &str) -> bool {
        self.registry.contains(endpoint)
    }

    /// Snapshot of every named route.
    pub fn url_map(&self) -> UrlMap {
        self.registry.snapshot()
    }

    /// Server-side `url_for`: builds a URL for `endpoint` from the current
    /// routes. Returns an empty string when nothing matches.
    pub fn url_for(&self, endpoint: &str, params: &Params) -> String {
        self.url_map().build(endpoint, params)
    }

    pub(crate) fn registry(&self) -> Registry {
        self.registry.clone()
    }

    fn lookup(&self, method: &Method, path: &str) -> Option<(Route, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let route = matched.value.clone();
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((route, params))
    }

    /// Routes one request in-process. Unmatched requests get `404`.
    pub async fn handle(&self, req: http::Request<Bytes>) -> http::Response<Full<Bytes>> {
        let response = match self.lookup(req.method(), req.uri().path()) {
            Some((route, params)) => {
                trace!(endpoint = route.endpoint(), path = req.uri().path(), "route matched");
                route.call(Request::new(req, params)).await
            }
            None => Response::status(StatusCode::NOT_FOUND),
        };
        response.into_inner()
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("methods", &self.routes.keys().collect::<Vec<_>>())
            .field("url_map", &self.url_map())
            .field("script_endpoint", &self.script_endpoint)
            .finish_non_exhaustive()
    }
}
