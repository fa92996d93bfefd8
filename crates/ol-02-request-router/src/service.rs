//! Router assembly and the HTTP server loop.

use crate::domain::config::RouterConfig;
use crate::domain::error::{ConfigError, RouterError};
use crate::middleware::{AuthLayer, CorsLayer, TracingLayer};
use crate::routes::{health::health, offers::offers, requests::requests};
use axum::{
    http::StatusCode,
    routing::{any, get},
    Router,
};
use ol_01_domain_ledger::LedgerRegistry;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LedgerRegistry>,
}

/// Build the HTTP router with its full middleware stack.
///
/// Layer order (outermost first): Tracing → Cors → Auth → BodyLimit.
pub fn build_router(
    config: &RouterConfig,
    registry: Arc<LedgerRegistry>,
) -> Result<Router, ConfigError> {
    let state = AppState { registry };

    let middleware = ServiceBuilder::new()
        .layer(TracingLayer::new())
        .layer(CorsLayer::new(&config.cors)?)
        .layer(AuthLayer::new(&config.auth)?);

    Ok(Router::new()
        .route("/", any(offers))
        .route("/requests", any(requests))
        .route("/health", get(health))
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
        .layer(middleware)
        .with_state(state))
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Request router service
pub struct RequestRouterService {
    config: RouterConfig,
    router: Router,
}

impl RequestRouterService {
    /// Validate `config` and assemble the router.
    pub fn new(config: RouterConfig, registry: Arc<LedgerRegistry>) -> Result<Self, RouterError> {
        config.validate()?;
        let router = build_router(&config, registry)?;
        Ok(Self { config, router })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The assembled router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Bind the configured address and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), RouterError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| RouterError::Bind { addr, source })?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), RouterError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: Option<SocketAddr> = listener.local_addr().ok();
        info!(addr = ?addr, "[ol-02] Request router listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(RouterError::Serve)?;

        info!("[ol-02] Request router stopped");
        Ok(())
    }
}
