use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use http::{Request, Response, header::REFERER};
use tower_cookies::{CookieManager, Cookies};
use tower_layer::Layer;
use tower_service::Service;

use crate::{config::FlashConfig, flash::Flash, session::FlashSession};

/// Layer that gives every request a [`Flash`] handle bound to one [`FlashSession`].
///
/// The layer brings its own `tower-cookies` manager, so flash writes and removals show up
/// as `Set-Cookie` headers on the response.
#[derive(Debug, Clone, Default)]
pub struct FlashLayer {
    session: FlashSession,
}

impl FlashLayer {
    #[must_use]
    pub fn new(session: FlashSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn with_config(self, config: FlashConfig) -> Self {
        Self::new(FlashSession::with_routes(config, self.session.routes().clone()))
    }
}

#[derive(Debug, Clone)]
pub struct FlashManager<S> {
    inner: S,
    session: FlashSession,
}

impl<S> Layer<S> for FlashLayer {
    type Service = CookieManager<FlashManager<S>>;

    fn layer(&self, inner: S) -> Self::Service {
        CookieManager::new(FlashManager {
            inner,
            session: self.session.clone(),
        })
    }
}

impl<ReqBody, ResBody, S> Service<Request<ReqBody>> for FlashManager<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Default + Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let session = self.session.clone();

        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let cookies = match req.extensions().get::<Cookies>().cloned() {
                Some(cookies) => cookies,
                None => {
                    tracing::error!("request has no cookie jar; flash layer cannot run");
                    let mut res = Response::default();
                    *res.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
                    return Ok(res);
                }
            };

            let referer = req
                .headers()
                .get(REFERER)
                .and_then(|value| value.to_str().ok())
                .map(Arc::from);

            req.extensions_mut()
                .insert(Flash::new(session, cookies, referer));

            inner.call(req).await
        })
    }
}
