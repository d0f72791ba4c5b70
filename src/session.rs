use std::sync::Arc;

use http::StatusCode;
use tower_cookies::Cookies;

use crate::{
    FlashData, FlashKind, FlashPayload, codec,
    config::FlashConfig,
    error::{Error, Result},
    redirect::Redirect,
    routes::RouteTable,
};

/// One flash cookie identity: its configuration plus the routes it can redirect to.
///
/// A `FlashSession` carries no per-request state. Every operation takes the request's
/// [`Cookies`], so a single session can be built at startup and shared by all handlers.
/// Sessions with different cookie names can be used side by side.
///
/// Reads are single-shot: [`FlashSession::get`] always schedules removal of the cookie,
/// so the next request sees nothing unless something was written in between. Two
/// simultaneous requests from the same client race at the HTTP layer, and whichever
/// `Set-Cookie` the browser applies last wins.
#[derive(Debug, Clone, Default)]
pub struct FlashSession {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    config: FlashConfig,
    routes: RouteTable,
}

impl FlashSession {
    pub fn new(config: FlashConfig) -> Self {
        Self::with_routes(config, RouteTable::default())
    }

    pub fn with_routes(config: FlashConfig, routes: RouteTable) -> Self {
        Self {
            inner: Arc::new(Inner { config, routes }),
        }
    }

    pub fn config(&self) -> &FlashConfig {
        &self.inner.config
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    /// Read and consume the inbound flash data.
    ///
    /// The jar has already percent-decoded the value, so only the records are scanned here.
    /// A removal cookie is added whether or not the request carried flash data. Calling
    /// this twice in one request returns nothing the second time; use [`crate::Flash`] to
    /// read more than once per request.
    pub fn get(&self, cookies: &Cookies) -> FlashData {
        let config = &self.inner.config;
        let data = cookies
            .get(&config.name)
            .map(|cookie| codec::decode_unescaped(cookie.value()))
            .unwrap_or_default();

        cookies.add(config.removal_cookie());
        tracing::debug!(cookie = %config.name, entries = data.len(), "flash cookie consumed");

        data
    }

    /// Encode `payload`, tagged for `kind`, into an outgoing flash cookie.
    pub fn write(&self, cookies: &Cookies, kind: FlashKind, payload: FlashPayload) -> Result<()> {
        let config = &self.inner.config;
        let payload = payload.tagged(kind);
        let value = codec::encode(&payload);
        if value.len() > config.max_cookie_bytes {
            tracing::warn!(
                cookie = %config.name,
                size = value.len(),
                max = config.max_cookie_bytes,
                "flash cookie too large"
            );
            return Err(Error::CookieTooLarge {
                size: value.len(),
                max: config.max_cookie_bytes,
            });
        }

        cookies.add(config.build_cookie(value));
        tracing::debug!(cookie = %config.name, entries = payload.len(), ?kind, "flash cookie written");

        Ok(())
    }

    pub fn with_error(&self, cookies: &Cookies, payload: FlashPayload) -> Result<()> {
        self.write(cookies, FlashKind::Error, payload)
    }

    pub fn with_success(&self, cookies: &Cookies, payload: FlashPayload) -> Result<()> {
        self.write(cookies, FlashKind::Success, payload)
    }

    pub fn with_warn(&self, cookies: &Cookies, payload: FlashPayload) -> Result<()> {
        self.write(cookies, FlashKind::Warn, payload)
    }

    pub fn with_info(&self, cookies: &Cookies, payload: FlashPayload) -> Result<()> {
        self.write(cookies, FlashKind::Info, payload)
    }

    pub fn with_data(&self, cookies: &Cookies, payload: FlashPayload) -> Result<()> {
        self.write(cookies, FlashKind::Data, payload)
    }

    /// Write `payload` untagged and redirect to `location`.
    pub fn redirect(
        &self,
        cookies: &Cookies,
        location: &str,
        payload: FlashPayload,
        status: Option<StatusCode>,
    ) -> Result<Redirect> {
        let redirect = Redirect::to(location, status)?;
        self.with_data(cookies, payload)?;
        Ok(redirect)
    }

    /// Write `payload` untagged and redirect to the named route.
    pub fn redirect_to_route(
        &self,
        cookies: &Cookies,
        name: &str,
        params: &[(&str, &str)],
        payload: FlashPayload,
        status: Option<StatusCode>,
    ) -> Result<Redirect> {
        let location = self.inner.routes.url_for(name, params)?;
        self.redirect(cookies, &location, payload, status)
    }

    /// Write `payload` untagged and redirect to `referer`, or to `fallback` without one.
    pub fn redirect_back(
        &self,
        cookies: &Cookies,
        referer: Option<&str>,
        fallback: &str,
        payload: FlashPayload,
        status: Option<StatusCode>,
    ) -> Result<Redirect> {
        self.redirect(cookies, referer.unwrap_or(fallback), payload, status)
    }
}

