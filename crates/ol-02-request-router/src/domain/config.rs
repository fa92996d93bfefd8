//! Router configuration with validation.

use crate::domain::error::ConfigError;
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main router configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Shared-secret authentication
    pub auth: AuthConfig,
    /// CORS response headers
    pub cors: CorsConfig,
    /// Request limits
    pub limits: LimitsConfig,
}

impl RouterConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.token()?;

        if HeaderValue::from_str(&self.cors.allowed_origin).is_err()
            || self.cors.allowed_origin.is_empty()
        {
            return Err(ConfigError::InvalidOrigin(self.cors.allowed_origin.clone()));
        }

        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.limits.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 8787)
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 8787,
        }
    }
}

/// Authentication configuration
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Bearer token every request must present. Required.
    pub api_token: Option<String>,
}

impl AuthConfig {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            api_token: Some(token.into()),
        }
    }

    /// The configured token, rejecting absent and empty values.
    pub fn token(&self) -> Result<&str, ConfigError> {
        match self.api_token.as_deref() {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(ConfigError::MissingApiToken),
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Value of `Access-Control-Allow-Origin`
    pub allowed_origin: String,
    /// Value of `Access-Control-Max-Age`
    #[serde(with = "humantime_serde")]
    pub max_age: Duration,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "*".to_string(),
            max_age: Duration::from_secs(86_400),
        }
    }
}

/// Request limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
        }
    }
}
