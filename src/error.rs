use http::{StatusCode, header::InvalidHeaderValue};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("flash cookie value exceeds max_cookie_bytes ({size} > {max})")]
    CookieTooLarge { size: usize, max: usize },

    #[error("invalid redirect location: {0}")]
    InvalidLocation(#[from] InvalidHeaderValue),

    #[error("{0} is not a redirection status")]
    InvalidStatus(StatusCode),

    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` requires parameter `{param}`")]
    MissingRouteParam { route: String, param: String },

    #[error("request has no flash handle; is `FlashLayer` installed?")]
    MissingLayer,
}

#[cfg(feature = "axum-core")]
impl axum_core::response::IntoResponse for Error {
    fn into_response(self) -> axum_core::response::Response {
        tracing::error!(err = %self, "flash operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
