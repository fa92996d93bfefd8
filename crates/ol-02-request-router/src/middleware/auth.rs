//! Shared-secret bearer authentication.
//!
//! Every request except `/health` must carry `Authorization: Bearer <token>`
//! matching the configured secret exactly.

use crate::domain::config::AuthConfig;
use crate::domain::error::{ApiError, ConfigError};
use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Paths served without a token
const PUBLIC_PATHS: &[&str] = &["/health"];

/// Authentication layer
#[derive(Clone)]
pub struct AuthLayer {
    token: Arc<str>,
}

impl AuthLayer {
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            token: Arc::from(config.token()?),
        })
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            token: Arc::clone(&self.token),
        }
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService<S> {
    inner: S,
    token: Arc<str>,
}

impl<S> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let token = Arc::clone(&self.token);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.uri().path()) {
                return inner.call(req).await;
            }

            let presented = bearer_token(&req);
            let token_present = presented.is_some();
            let authorized = presented.is_some_and(|p| constant_time_compare(p, &token));

            if !authorized {
                warn!(
                    method = %req.method(),
                    path = %req.uri().path(),
                    token_present,
                    "Rejected unauthorized request"
                );
                return Ok(unauthorized_response());
            }

            debug!(path = %req.uri().path(), "Request authorized");
            inner.call(req).await
        })
    }
}

/// Token from an `Authorization: Bearer <token>` header
fn bearer_token<B>(req: &Request<B>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Constant-time string comparison.
///
/// Runs in time independent of where the inputs first differ. Inputs of
/// different lengths are padded with distinct bytes so they never match.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let len = a.len().max(b.len());
    let mut left = vec![0x00u8; len];
    let mut right = vec![0xFFu8; len];
    left[..a.len()].copy_from_slice(a.as_bytes());
    right[..b.len()].copy_from_slice(b.as_bytes());

    let same_len = a.len().ct_eq(&b.len());
    let same_bytes = left.ct_eq(&right);
    (same_len & same_bytes).into()
}

fn unauthorized_response() -> Response {
    let mut response = ApiError::Unauthorized.into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
    response
}
