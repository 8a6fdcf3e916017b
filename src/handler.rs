//! Route handlers.
//!
//! Anything `Fn(Request) -> impl Future` whose output converts
//! [`IntoResponse`] is a [`Handler`]. When a route is registered the handler
//! is wrapped into a [`Route`] together with the endpoint name it answers
//! for, so the request it receives can tell which named route matched:
//!
//! ```text
//! router.named(GET, "/users/<id>", "user", user)
//!        ↓
//! Route { endpoint: Some("user"), call: user → Response }   ← in the matchit tree
//!        ↓ lookup
//! route.call(req)   → req.endpoint() == Some("user")
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

pub(crate) type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

type ErasedFn = dyn Fn(Request) -> HandlerFuture + Send + Sync + 'static;

/// A request handler.
///
/// Implemented for every async function or closure taking a [`Request`]:
///
/// ```rust
/// use urlmap::{Request, Response, StatusCode};
///
/// async fn user(req: Request) -> Response {
///     Response::text(req.param("id").unwrap_or("?").to_owned())
/// }
///
/// async fn gone(_: Request) -> StatusCode {
///     StatusCode::GONE
/// }
/// ```
pub trait Handler: Send + Sync + 'static {
    type Output: IntoResponse + Send;
    type Future: Future<Output = Self::Output> + Send + 'static;

    fn invoke(&self, req: Request) -> Self::Future;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future + Send + 'static,
    Fut::Output: IntoResponse + Send,
{
    type Output = Fut::Output;
    type Future = Fut;

    fn invoke(&self, req: Request) -> Fut {
        self(req)
    }
}

/// One entry of the routing tree: the endpoint name, if any, and the
/// type-erased handler.
#[derive(Clone)]
pub(crate) struct Route {
    endpoint: Option<Arc<str>>,
    call: Arc<ErasedFn>,
}

impl Route {
    pub(crate) fn new<H: Handler>(endpoint: Option<&str>, handler: H) -> Self {
        let call = move |req: Request| -> HandlerFuture {
            let fut = handler.invoke(req);
            Box::pin(async move { fut.await.into_response() })
        };
        Self { endpoint: endpoint.map(Arc::from), call: Arc::new(call) }
    }

    pub(crate) fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Runs the handler, tagging `req` with this route's endpoint first.
    pub(crate) fn call(&self, mut req: Request) -> HandlerFuture {
        req.endpoint = self.endpoint.clone();
        (self.call)(req)
    }
}
