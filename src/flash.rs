use std::sync::{Arc, Mutex, PoisonError};

use http::StatusCode;
use tower_cookies::Cookies;

use crate::{
    FlashData, FlashKind, FlashPayload, error::Result, redirect::Redirect, session::FlashSession,
};

/// Request-scoped flash handle, inserted into request extensions by
/// [`FlashLayer`](crate::FlashLayer).
///
/// Unlike [`FlashSession::get`], [`Flash::get`] remembers what it read, so a handler (or
/// several extractors in one request) can read the same data more than once. The cookie
/// is still scheduled for removal on the first read.
#[derive(Debug, Clone)]
pub struct Flash {
    session: FlashSession,
    cookies: Cookies,
    referer: Option<Arc<str>>,
    consumed: Arc<Mutex<Option<FlashData>>>,
}

impl Flash {
    pub(crate) fn new(session: FlashSession, cookies: Cookies, referer: Option<Arc<str>>) -> Self {
        Self {
            session,
            cookies,
            referer,
            consumed: Arc::default(),
        }
    }

    pub fn session(&self) -> &FlashSession {
        &self.session
    }

    pub fn get(&self) -> FlashData {
        let mut consumed = self
            .consumed
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        consumed
            .get_or_insert_with(|| self.session.get(&self.cookies))
            .clone()
    }

    pub fn write(&self, kind: FlashKind, payload: FlashPayload) -> Result<&Self> {
        self.session.write(&self.cookies, kind, payload)?;
        Ok(self)
    }

    pub fn with_error(&self, payload: FlashPayload) -> Result<&Self> {
        self.write(FlashKind::Error, payload)
    }

    pub fn with_success(&self, payload: FlashPayload) -> Result<&Self> {
        self.write(FlashKind::Success, payload)
    }

    pub fn with_warn(&self, payload: FlashPayload) -> Result<&Self> {
        self.write(FlashKind::Warn, payload)
    }

    pub fn with_info(&self, payload: FlashPayload) -> Result<&Self> {
        self.write(FlashKind::Info, payload)
    }

    pub fn with_data(&self, payload: FlashPayload) -> Result<&Self> {
        self.write(FlashKind::Data, payload)
    }

    /// Finish a `with_*` chain: `flash.with_error(payload)?.and_redirect("/login", None)`.
    pub fn and_redirect(&self, location: &str, status: Option<StatusCode>) -> Result<Redirect> {
        Redirect::to(location, status)
    }

    pub fn redirect(
        &self,
        location: &str,
        payload: FlashPayload,
        status: Option<StatusCode>,
    ) -> Result<Redirect> {
        self.session
            .redirect(&self.cookies, location, payload, status)
    }

    pub fn redirect_to_route(
        &self,
        name: &str,
        params: &[(&str, &str)],
        payload: FlashPayload,
        status: Option<StatusCode>,
    ) -> Result<Redirect> {
        self.session
            .redirect_to_route(&self.cookies, name, params, payload, status)
    }

    /// Redirect to the request's `Referer`, or to `fallback` when it had none.
    pub fn redirect_back(
        &self,
        fallback: &str,
        payload: FlashPayload,
        status: Option<StatusCode>,
    ) -> Result<Redirect> {
        self.session.redirect_back(
            &self.cookies,
            self.referer.as_deref(),
            fallback,
            payload,
            status,
        )
    }
}

#[cfg(feature = "axum-core")]
impl<S> axum_core::extract::FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = crate::Error;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Flash>()
            .cloned()
            .ok_or(crate::Error::MissingLayer)
    }
}
