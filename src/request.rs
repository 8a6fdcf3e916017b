//! Incoming HTTP request type.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, Method};

use crate::encode::decode;

/// An incoming HTTP request with its body fully read.
pub struct Request {
    pub(crate) parts: http::request::Parts,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    pub(crate) endpoint: Option<Arc<str>>,
}

impl Request {
    pub(crate) fn new(req: http::Request<Bytes>, params: HashMap<String, String>) -> Self {
        let (parts, body) = req.into_parts();
        Self { parts, body, params, endpoint: None }
    }

    pub fn method(&self) -> &Method { &self.parts.method }
    pub fn path(&self) -> &str { self.parts.uri.path() }
    pub fn query(&self) -> Option<&str> { self.parts.uri.query() }
    pub fn headers(&self) -> &HeaderMap { &self.parts.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Endpoint name of the route that matched, `None` for routes
    /// registered with [`Router::on`](crate::Router::on).
    pub fn endpoint(&self) -> Option<&str> { self.endpoint.as_deref() }

    /// Header lookup. Names are case-insensitive; non-UTF-8 values are
    /// skipped.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a path parameter exactly as it appeared in the URL.
    ///
    /// For a route `/users/<int:id>`, `req.param("id")` on `/users/42`
    /// returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns a path parameter with the `url_for` encoding undone, so
    /// `/search/a+b%2Fc` yields `"a b/c"`.
    pub fn param_decoded(&self, key: &str) -> Option<String> {
        self.param(key).map(decode)
    }
}
