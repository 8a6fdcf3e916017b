//! Minimal urlmap example: a few named routes and the url_for script.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/flask_util.js
//!   curl http://localhost:3000/users/42
//!   curl http://localhost:3000/users/42/posts
//!   curl http://localhost:3000/

use urlmap::{Config, Method, Params, Request, Response, Router, Server, UrlForJs};

#[tokio::main]
async fn main() -> urlmap::Result<()> {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .named(Method::GET, "/",                     "index", index)
        .named(Method::GET, "/users/<int:id>/<tab>", "user",  get_user)
        .named(Method::GET, "/users/<int:id>",       "user",  get_user)
        .named(Method::GET, "/search/<term>",        "search", search);

    let mut fujs = UrlForJs::new(Config::from_env()?);
    let app = fujs.init_app(app)?;

    tracing::info!(
        script = ?fujs.path(),
        example = %app.url_for("user", &Params::new().with("id", 42).with("q", "a b")),
        "routes ready"
    );

    Server::bind("0.0.0.0:3000").serve(app).await
}

async fn index(_req: Request) -> Response {
    Response::builder().bytes(
        urlmap::ContentType::Html,
        br#"<!doctype html>
<script src="/flask_util.js"></script>
<script>
  document.write(flask_util.url_for('user', {id: 42, tab: 'posts'}));
</script>
"#
        .to_vec(),
    )
}

async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    let tab = req.param("tab").unwrap_or("profile");
    Response::json(format!(r#"{{"id":"{id}","tab":"{tab}"}}"#).into_bytes())
}

// url_for encodes "a b/c" as "a+b%2Fc"; param_decoded undoes it.
async fn search(req: Request) -> Response {
    let term = req.param_decoded("term").unwrap_or_default();
    Response::text(format!("searching for {term:?}"))
}
