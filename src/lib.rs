//! Single-read flash messages for `tower` and `axum`, carried in one cookie.
//!
//! A handler writes a small key/value payload into a cookie right before redirecting, and
//! the handler behind the redirect reads it back. Reading always expires the cookie, so
//! each write is observed at most once.
//!
//! ```no_run
//! use axum::{Json, Router, routing::get};
//! use tower_cookie_flash::{Error, Flash, FlashData, FlashLayer, FlashPayload, Redirect};
//!
//! async fn save(flash: Flash) -> Result<Redirect, Error> {
//!     flash
//!         .with_success(FlashPayload::new().with("message", "saved"))?
//!         .and_redirect("/done", None)
//! }
//!
//! async fn done(flash: Flash) -> Json<FlashData> {
//!     Json(flash.get())
//! }
//!
//! let app: Router = Router::new()
//!     .route("/save", get(save))
//!     .route("/done", get(done))
//!     .layer(FlashLayer::default());
//! ```
//!
//! # Security
//! The payload is neither signed nor encrypted. Anything a flash cookie says can be forged
//! by the client, so only put display data in it.

pub mod codec;
mod config;
mod error;
mod flash;
pub mod layer;
mod redirect;
mod routes;
mod session;
mod value;

pub use tower_cookies::cookie::SameSite;

pub use crate::config::{DEFAULT_COOKIE_NAME, Expiry, FlashConfig};
pub use crate::error::{Error, Result};
pub use crate::flash::Flash;
pub use crate::layer::FlashLayer;
pub use crate::redirect::Redirect;
pub use crate::routes::RouteTable;
pub use crate::session::FlashSession;
pub use crate::value::{FlashData, FlashKind, FlashPayload, FlashValue};
