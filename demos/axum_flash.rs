use std::net::SocketAddr;

use axum::{Json, Router, routing::get};
use tower_cookie_flash::{
    Error, Flash, FlashConfig, FlashData, FlashLayer, FlashPayload, FlashSession, Redirect,
    RouteTable, SameSite,
};

async fn show(flash: Flash) -> Json<FlashData> {
    Json(flash.get())
}

async fn error(flash: Flash) -> Result<Redirect, Error> {
    let payload = FlashPayload::new().with("message", "I'm receiving error with inline error data");
    flash.with_error(payload)?.and_redirect("/show", None)
}

async fn success(flash: Flash) -> Result<Redirect, Error> {
    let payload =
        FlashPayload::new().with("message", "I'm receiving success with inline success data");
    flash.with_success(payload)?.and_redirect("/show", None)
}

async fn data(flash: Flash) -> Result<Redirect, Error> {
    flash.redirect_to_route(
        "show",
        &[],
        FlashPayload::new().with("text", "Received arbitrary data"),
        None,
    )
}

#[tokio::main]
async fn main() {
    let config = FlashConfig::default()
        // Default: "flash"
        .with_name("demo-flash")
        // Default: SameSite::Lax
        .with_same_site(SameSite::Lax)
        // Default: false (enable when serving over HTTPS)
        .with_secure(false);
    let routes = RouteTable::new().with_route("show", "/show");
    let flash_layer = FlashLayer::new(FlashSession::with_routes(config, routes));

    let app = Router::new()
        .route("/show", get(show))
        .route("/error", get(error))
        .route("/success", get(success))
        .route("/data", get(data))
        .layer(flash_layer);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("tcp listener binds successfully");
    let local_addr = listener.local_addr().expect("local address is available");
    println!("listening at http://{local_addr}");

    axum::serve(listener, app)
        .await
        .expect("server runs successfully");
}
