//! CORS headers and preflight handling.
//!
//! Unlike `tower_http::cors`, this layer stamps the full header set on every
//! response, errors included, and answers every `OPTIONS` request itself with
//! 204 before authentication runs.

use crate::domain::config::CorsConfig;
use crate::domain::error::ConfigError;
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    response::Response,
};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// `Access-Control-Allow-Methods` value
pub const ALLOWED_METHODS: &str = "GET,HEAD,POST,OPTIONS";

/// `Access-Control-Allow-Headers` value
pub const ALLOWED_HEADERS: &str = "Content-Type,Authorization";

/// Precomputed CORS header values
#[derive(Debug, Clone)]
struct CorsHeaders {
    allow_origin: HeaderValue,
    max_age: HeaderValue,
}

impl CorsHeaders {
    fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            self.allow_origin.clone(),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        headers.insert(header::ACCESS_CONTROL_MAX_AGE, self.max_age.clone());
    }
}

/// CORS layer
#[derive(Clone)]
pub struct CorsLayer {
    headers: Arc<CorsHeaders>,
}

impl CorsLayer {
    pub fn new(config: &CorsConfig) -> Result<Self, ConfigError> {
        let allow_origin = HeaderValue::from_str(&config.allowed_origin)
            .map_err(|_| ConfigError::InvalidOrigin(config.allowed_origin.clone()))?;
        let max_age = HeaderValue::from(config.max_age.as_secs());

        Ok(Self {
            headers: Arc::new(CorsHeaders {
                allow_origin,
                max_age,
            }),
        })
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = CorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsService {
            inner,
            headers: Arc::clone(&self.headers),
        }
    }
}

/// CORS service
#[derive(Clone)]
pub struct CorsService<S> {
    inner: S,
    headers: Arc<CorsHeaders>,
}

impl<S> Service<Request<Body>> for CorsService<S>
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
        let headers = Arc::clone(&self.headers);

        if req.method() == Method::OPTIONS {
            return Box::pin(async move {
                let mut response = Response::new(Body::empty());
                *response.status_mut() = StatusCode::NO_CONTENT;
                headers.apply(response.headers_mut());
                Ok(response)
            });
        }

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let mut response = inner.call(req).await?;
            headers.apply(response.headers_mut());
            Ok(response)
        })
    }
}
