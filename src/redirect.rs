use http::{HeaderValue, Response, StatusCode, header::LOCATION};

use crate::error::{Error, Result};

/// A redirect response, usually returned right after a flash write.
#[derive(Debug, Clone)]
pub struct Redirect {
    status: StatusCode,
    location: HeaderValue,
}

impl Redirect {
    /// Redirect to `location` with `status`, or `302 Found` when `status` is `None`.
    pub fn to(location: &str, status: Option<StatusCode>) -> Result<Self> {
        let status = status.unwrap_or(StatusCode::FOUND);
        if !status.is_redirection() {
            return Err(Error::InvalidStatus(status));
        }

        Ok(Self {
            status,
            location: HeaderValue::try_from(location)?,
        })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn location(&self) -> &HeaderValue {
        &self.location
    }

    pub fn into_http_response<B: Default>(self) -> Response<B> {
        let mut res = Response::default();
        *res.status_mut() = self.status;
        res.headers_mut().insert(LOCATION, self.location);
        res
    }
}

#[cfg(feature = "axum-core")]
impl axum_core::response::IntoResponse for Redirect {
    fn into_response(self) -> axum_core::response::Response {
        self.into_http_response()
    }
}
