#![allow(dead_code)]

// Shared helpers for integration tests.
//
// Cookies are handled the way a browser does: the `Set-Cookie` value is stored verbatim and
// sent back verbatim in `Cookie`, with no extra percent-encoding on either side.
use std::convert::Infallible;

use axum::body::Body;
use http::{HeaderMap, Request, Response, header};
use http_body_util::BodyExt as _;
use tower_cookie_flash::{Flash, FlashData, FlashPayload, codec};
use tower_cookies::Cookie;

pub async fn body_string(body: Body) -> String {
    // Collect an Axum body into a UTF-8 string for assertions.
    let bytes = body
        .collect()
        .await
        .expect("body collects successfully")
        .to_bytes();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub async fn body_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_string(body).await).expect("body is valid json")
}

fn flash(req: &Request<Body>) -> Flash {
    req.extensions()
        .get::<Flash>()
        .cloned()
        .expect("request includes Flash extension")
}

pub async fn handler(req: Request<Body>) -> Result<Response<Body>, Infallible> {
    // Basic handler used by many tests: write a single success message.
    flash(&req)
        .with_success(FlashPayload::new().with("message", "saved"))
        .expect("flash write succeeds");

    Ok(Response::new(Body::empty()))
}

pub async fn read_handler(req: Request<Body>) -> Result<Response<Body>, Infallible> {
    // Handler that consumes the flash and echoes it as `key=value` lines.
    let data = flash(&req).get();
    let body = data
        .iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect::<String>();

    Ok(Response::new(Body::from(body)))
}

pub async fn noop_handler(_: Request<Body>) -> Result<Response<Body>, Infallible> {
    // Handler that does not touch the flash at all.
    Ok(Response::new(Body::empty()))
}

pub fn get_flash_cookie(res: &Response<Body>) -> Cookie<'static> {
    // Convenience: parse the flash cookie from a response.
    get_flash_cookie_from_headers(res.headers())
}

pub fn get_flash_cookie_from_headers(headers: &HeaderMap) -> Cookie<'static> {
    // Parse the `Set-Cookie` header into a `Cookie` structure, keeping the raw value.
    let set_cookie = headers
        .get(header::SET_COOKIE)
        .expect("response includes set-cookie header");
    let set_cookie = set_cookie
        .to_str()
        .expect("set-cookie header is valid utf-8");
    Cookie::parse(set_cookie)
        .expect("set-cookie parses successfully")
        .into_owned()
}

pub fn cookie_header_value(cookie: &Cookie<'_>) -> String {
    // The `name=value` pair for a `Cookie` request header.
    format!("{}={}", cookie.name(), cookie.value())
}

pub fn decode_cookie(cookie: &Cookie<'_>) -> FlashData {
    // Decode the flash payload carried by a raw `Set-Cookie` value.
    codec::decode(cookie.value())
}

pub fn assert_removal(cookie: &Cookie<'_>) {
    // A removal cookie is empty and already expired.
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
}
