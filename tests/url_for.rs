//! `url_for` behaviour through the public API.

use bytes::Bytes;
use http_body_util::BodyExt;
use urlmap::{Method, Params, Request, Response, Router, UrlMap, decode};

fn table() -> UrlMap {
    UrlMap::from_rules([
        ("index", "/"),
        ("item", "/item/<id>/<sub>"),
        ("item", "/item/<id>"),
        ("x", "/x/<v>"),
        ("e", "/x/<id>"),
    ])
}

#[test]
fn unknown_endpoint_builds_nothing() {
    let t = table();
    for params in [Params::new(), Params::new().with("id", 1)] {
        assert_eq!(t.build("missing", &params), "");
    }
}

#[test]
fn literal_pattern_returns_itself() {
    let t = table();
    assert_eq!(t.build("index", &Params::new()), "/");
    assert_eq!(t.build("index", &Params::new().with("a", 1).with("b", 2)), "/?a=1&b=2");
}

#[test]
fn placeholder_substitution() {
    assert_eq!(table().build("item", &Params::new().with("id", "42").with("sub", "s")), "/item/42/s");
}

#[test]
fn falls_back_to_next_pattern() {
    assert_eq!(table().build("item", &Params::new().with("id", "7")), "/item/7");
}

#[test]
fn encodes_values() {
    assert_eq!(table().build("x", &Params::new().with("v", "a b/c")), "/x/a+b%2Fc");
}

#[test]
fn non_ascii_values_use_character_codes() {
    let t = table();
    assert_eq!(t.build("x", &Params::new().with("v", "é")), "/x/%E9");
    assert_eq!(t.build("x", &Params::new().with("v", "中")), "/x/%4E2D");
}

#[test]
fn leftover_params_become_query() {
    let params = Params::new().with("id", "1").with("q", "a b");
    assert_eq!(table().build("e", &params), "/x/1?q=a+b");
}

#[test]
fn repeated_builds_agree() {
    let t = table();
    let params = Params::new().with("id", "7").with("q", "ü");
    let first = t.build("item", &params);
    assert_eq!(first, "/item/7?q=%FC");
    assert_eq!(t.build("item", &params), first);
}

#[test]
fn path_segments_decode_back_to_values() {
    let t = UrlMap::from_rules([("pair", "/pair/<left>/<right>")]);
    let values = ["a b/c", "100%", "x&y=z", "café", "plain-1.0_x"];

    for left in values {
        for right in values {
            let url = t.build("pair", &Params::new().with("left", left).with("right", right));
            let segments: Vec<_> = url.trim_start_matches("/pair/").split('/').collect();
            assert_eq!(segments.len(), 2, "{url}");
            assert_eq!(decode(segments[0]), left);
            assert_eq!(decode(segments[1]), right);
        }
    }
}

async fn echo(req: Request) -> Response {
    Response::text(req.param_decoded("term").unwrap_or_default())
}

#[tokio::test]
async fn built_urls_route_back_to_their_endpoint() {
    let router = Router::new().named(Method::GET, "/search/<term>", "search", echo);

    let url = router.url_for("search", &Params::new().with("term", "rust & tokio"));
    assert_eq!(url, "/search/rust+%26+tokio");

    let req = http::Request::get(url.as_str()).body(Bytes::new()).unwrap();
    let res = router.handle(req).await;
    assert_eq!(res.status(), http::StatusCode::OK);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"rust & tokio");
}
