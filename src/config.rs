use std::borrow::Cow;

use time::{Duration, OffsetDateTime};
use tower_cookies::Cookie;

use crate::SameSite;

/// Name of the flash cookie unless configured otherwise.
pub const DEFAULT_COOKIE_NAME: &str = "flash";

/// How long an unread flash cookie stays in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// No `Max-Age`; the browser drops the cookie when it ends its session.
    OnSessionEnd,
    MaxAge(Duration),
    /// `Max-Age` is computed from this instant when the cookie is written.
    AtDateTime(OffsetDateTime),
}

/// Cookie identity and attributes for one flash session.
#[derive(Debug, Clone)]
pub struct FlashConfig {
    pub(crate) name: Cow<'static, str>,
    pub(crate) http_only: bool,
    pub(crate) same_site: SameSite,
    pub(crate) expiry: Option<Expiry>,
    pub(crate) secure: bool,
    pub(crate) path: Cow<'static, str>,
    pub(crate) domain: Option<Cow<'static, str>>,
    pub(crate) max_cookie_bytes: usize,
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COOKIE_NAME.into(),
            http_only: true,
            same_site: SameSite::Lax,
            expiry: None,
            secure: false,
            path: "/".into(),
            domain: None,
            max_cookie_bytes: 4096,
        }
    }
}

impl FlashConfig {
    #[must_use]
    pub fn with_name<N: Into<Cow<'static, str>>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    #[must_use]
    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = Some(expiry);
        self
    }

    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_path<P: Into<Cow<'static, str>>>(mut self, path: P) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_domain<D: Into<Cow<'static, str>>>(mut self, domain: D) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn without_domain(mut self) -> Self {
        self.domain = None;
        self
    }

    /// Writes whose encoded value is longer than this fail instead of setting a cookie
    /// the browser would silently drop.
    #[must_use]
    pub fn with_max_cookie_bytes(mut self, max_cookie_bytes: usize) -> Self {
        self.max_cookie_bytes = max_cookie_bytes;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn build_cookie(&self, value: String) -> Cookie<'static> {
        let mut cookie_builder = Cookie::build((self.name.clone(), value))
            .http_only(self.http_only)
            .same_site(self.same_site)
            .secure(self.secure)
            .path(self.path.clone());

        match self.expiry {
            Some(Expiry::MaxAge(max_age)) => {
                cookie_builder = cookie_builder.max_age(std::cmp::max(max_age, Duration::ZERO));
            }
            Some(Expiry::AtDateTime(at)) => {
                let max_age = std::cmp::max(at - OffsetDateTime::now_utc(), Duration::ZERO);
                cookie_builder = cookie_builder.max_age(max_age);
            }
            Some(Expiry::OnSessionEnd) | None => {}
        }

        if let Some(domain) = self.domain.clone() {
            cookie_builder = cookie_builder.domain(domain);
        }

        cookie_builder.build()
    }

    pub(crate) fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.build_cookie(String::new());
        cookie.make_removal();
        cookie
    }
}
