use std::{
    convert::Infallible,
    sync::Arc,
    task::{Context, Poll},
};

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use tower::{Layer, Service};

use casting_core::services::AuthService;

use crate::error::ApiError;

/// Wraps a handler so it only runs for bearer tokens holding `permission`.
///
/// On success the verified [`Claims`](casting_core::models::Claims) are
/// inserted into the request extensions.
#[derive(Clone)]
pub struct RequirePermissionLayer {
    auth: Arc<AuthService>,
    permission: &'static str,
}

impl RequirePermissionLayer {
    pub fn new(auth: Arc<AuthService>, permission: &'static str) -> Self {
        Self { auth, permission }
    }
}

impl<S> Layer<S> for RequirePermissionLayer {
    type Service = RequirePermission<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequirePermission {
            inner,
            auth: self.auth.clone(),
            permission: self.permission,
        }
    }
}

#[derive(Clone)]
pub struct RequirePermission<S> {
    inner: S,
    auth: Arc<AuthService>,
    permission: &'static str,
}

impl<S> Service<Request> for RequirePermission<S>
where
    S: Service<Request, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request) -> Self::Future {
        // Keep the service that was polled ready for this request
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let auth = self.auth.clone();
        let permission = self.permission;

        Box::pin(async move {
            // Non-ASCII header values fall through as malformed, not missing
            let header = request
                .headers()
                .get(AUTHORIZATION)
                .map(|value| value.to_str().unwrap_or_default().to_owned());

            match auth.authorize(header.as_deref(), permission).await {
                Ok(claims) => {
                    request.extensions_mut().insert(claims);
                    inner.call(request).await
                }
                Err(e) => Ok(ApiError::from(e).into_response()),
            }
        })
    }
}
