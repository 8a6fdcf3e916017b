//! Installs the `url_for` script route onto a [`Router`].
//!
//! ```rust,no_run
//! use urlmap::{Config, Method, Request, Response, Router, Server, UrlForJs};
//!
//! # async fn user(_: Request) -> Response { Response::text("") }
//! # async fn run() -> urlmap::Result<()> {
//! let router = Router::new().named(Method::GET, "/users/<int:id>", "user", user);
//!
//! let mut fujs = UrlForJs::new(Config::default());
//! let router = fujs.init_app(router)?;
//! assert_eq!(fujs.path().as_deref(), Some("/flask_util.js"));
//!
//! Server::bind("0.0.0.0:3000").serve(router).await
//! # }
//! ```
//!
//! The script is rendered on every request from the router's registry at
//! that moment, so routes added after `init_app` are included.

use http::Method;
use http::header::{CACHE_CONTROL, HeaderValue};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::params::Params;
use crate::request::Request;
use crate::response::{ContentType, Response};
use crate::router::{Registry, Router};
use crate::script;

/// The `url_for` script extension.
///
/// One instance serves one router; a second [`init_app`](Self::init_app)
/// is an error.
pub struct UrlForJs {
    config: Config,
    registry: Option<Registry>,
}

/// Values exposed to server-side templates, keyed the way templates refer
/// to them (`fujs.path`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateContext {
    pub fujs: ScriptPath,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScriptPath {
    pub path: String,
}

impl UrlForJs {
    pub fn new(config: Config) -> Self {
        Self { config, registry: None }
    }

    /// Registers `GET <config.path>` on `router` under the configured
    /// endpoint name and returns the router.
    ///
    /// Fails with [`Error::AlreadyInstalled`] if this extension was already
    /// installed, or if `router` already carries a script route.
    pub fn init_app(&mut self, mut router: Router) -> Result<Router> {
        let endpoint = self.config.endpoint_name().to_owned();

        if self.registry.is_some() {
            return Err(Error::AlreadyInstalled { endpoint });
        }
        if let Some(existing) = &router.script_endpoint {
            return Err(Error::AlreadyInstalled { endpoint: existing.clone() });
        }
        self.config.validate()?;

        let registry = router.registry();
        let handle = registry.clone();
        let handler = move |_req: Request| {
            let registry = handle.clone();
            async move { script_response(&registry) }
        };
        router.try_named(Method::GET, &self.config.path, &endpoint, handler)?;

        info!(path = %self.config.path, endpoint = %endpoint, "url_for script installed");

        router.script_endpoint = Some(endpoint);
        self.registry = Some(registry);
        Ok(router)
    }

    /// The endpoint name the script route is registered under.
    pub fn endpoint(&self) -> &str {
        self.config.endpoint_name()
    }

    /// URL of the script, reverse-routed through the router it was
    /// installed on. `None` before [`init_app`](Self::init_app).
    pub fn path(&self) -> Option<String> {
        let registry = self.registry.as_ref()?;
        Some(registry.snapshot().build(self.endpoint(), &Params::new()))
    }

    /// Template values for pages that include the script. `None` before
    /// [`init_app`](Self::init_app).
    pub fn context(&self) -> Option<TemplateContext> {
        let path = self.path()?;
        Some(TemplateContext { fujs: ScriptPath { path } })
    }
}

impl Default for UrlForJs {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

fn script_response(registry: &Registry) -> Response {
    let map = registry.snapshot();
    match script::render(&map) {
        Ok(js) => {
            debug!(endpoints = map.len(), bytes = js.len(), "rendered url_for script");
            Response::builder()
                .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
                .bytes(ContentType::JavaScript, js.into_bytes())
        }
        Err(e) => {
            error!("failed to render url_for script: {e}");
            Response::status(http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn page(_req: Request) -> Response {
        Response::text("page")
    }

    #[test]
    fn path_before_install_is_none() {
        let fujs = UrlForJs::default();
        assert_eq!(fujs.endpoint(), "flask_util_js");
        assert!(fujs.path().is_none());
        assert!(fujs.context().is_none());
    }

    #[test]
    fn installs_under_configured_names() {
        let config = Config { path: "/js/routes.js".into(), endpoint: Some("routes_js".into()) };
        let mut fujs = UrlForJs::new(config);
        let router = fujs.init_app(Router::new()).unwrap();

        assert!(router.has_endpoint("routes_js"));
        assert_eq!(fujs.endpoint(), "routes_js");
        assert_eq!(fujs.path().as_deref(), Some("/js/routes.js"));
    }

    #[test]
    fn double_init_on_same_extension_fails() {
        let mut fujs = UrlForJs::default();
        let _router = fujs.init_app(Router::new()).unwrap();
        let err = fujs.init_app(Router::new()).unwrap_err();
        assert!(matches!(err, Error::AlreadyInstalled { .. }));
    }

    #[test]
    fn second_extension_on_same_router_fails() {
        let router = UrlForJs::default().init_app(Router::new()).unwrap();
        let config = Config { path: "/other.js".into(), endpoint: Some("other".into()) };
        let err = UrlForJs::new(config).init_app(router).unwrap_err();
        assert!(matches!(err, Error::AlreadyInstalled { ref endpoint } if endpoint == "flask_util_js"));
    }

    #[test]
    fn conflicting_path_is_reported() {
        let router = Router::new().on(Method::GET, "/flask_util.js", page);
        let err = UrlForJs::default().init_app(router).unwrap_err();
        assert!(matches!(err, Error::Route(_)));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = Config { path: "no-slash.js".into(), endpoint: None };
        let err = UrlForJs::new(config).init_app(Router::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn context_exposes_path() {
        let mut fujs = UrlForJs::default();
        let _router = fujs.init_app(Router::new()).unwrap();
        let ctx = serde_json::to_value(fujs.context().unwrap()).unwrap();
        assert_eq!(ctx, serde_json::json!({"fujs": {"path": "/flask_util.js"}}));
    }
}
