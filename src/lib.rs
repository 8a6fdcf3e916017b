//! # urlmap
//!
//! Named routes for a small hyper-based HTTP framework, exported to the
//! browser so client code can build URLs by name instead of hardcoding
//! paths.
//!
//! ## How it fits together
//!
//! - [`Router::named`] registers a route under an endpoint name. Patterns
//!   use `<name>` / `<converter:name>` placeholders.
//! - [`UrlForJs`] mounts a script (default `/flask_util.js`) holding a
//!   snapshot of every named route and a `flask_util.url_for` function.
//! - [`UrlMap::build`] is the same algorithm on the server side.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use urlmap::{Config, Method, Request, Response, Router, Server, UrlForJs};
//!
//! #[tokio::main]
//! async fn main() -> urlmap::Result<()> {
//!     let app = Router::new()
//!         .named(Method::GET, "/users/<int:id>/<tab>", "user", get_user)
//!         .named(Method::GET, "/users/<int:id>",       "user", get_user);
//!
//!     let app = UrlForJs::new(Config::from_env()?).init_app(app)?;
//!     Server::bind("0.0.0.0:3000").serve(app).await
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//! ```
//!
//! In the browser:
//!
//! ```text
//! <script src="/flask_util.js"></script>
//! flask_util.url_for('user', {id: 42});                // "/users/42"
//! flask_util.url_for('user', {id: 42, tab: 'posts'});  // "/users/42/posts"
//! flask_util.url_for('user', {id: 42, q: 'a b'});      // "/users/42?q=a+b"
//! ```

mod encode;
mod error;
mod extension;
mod handler;
mod params;
mod request;
mod response;
mod router;
mod rule;
mod server;
mod url_map;

pub mod config;
pub mod script;

pub use config::Config;
pub use encode::{decode, encode};
pub use error::{Error, Result};
pub use extension::{ScriptPath, TemplateContext, UrlForJs};
pub use handler::Handler;
pub use params::Params;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use rule::{Rule, Segment, Substitution};
pub use server::Server;
pub use url_map::{EndpointRules, UrlMap};

pub use http;
pub use http::{Method, StatusCode};
