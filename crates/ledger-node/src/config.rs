//! # Node Configuration
//!
//! Router and storage settings, read from an optional JSON file named by
//! `OL_CONFIG` and then overridden field by field from `OL_*` variables.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `OL_HTTP_HOST` | `router.http.host` |
//! | `OL_HTTP_PORT` | `router.http.port` |
//! | `OL_API_TOKEN` | `router.auth.api_token` |
//! | `OL_ALLOWED_ORIGIN` | `router.cors.allowed_origin` |
//! | `OL_CORS_MAX_AGE` | `router.cors.max_age` (humantime, e.g. `24h`) |
//! | `OL_STORAGE_BACKEND` | `storage.backend` (`memory` / `file`) |
//! | `OL_DATA_PATH` | `storage.data_path` |
//! | `OL_KEY_LAYOUT` | `storage.key_layout` (`separate` / `shared`) |
//!
//! Unparseable values are logged and ignored.

use ol_01_domain_ledger::KeyLayout;
use ol_02_request_router::RouterConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Variable naming the JSON config file
pub const CONFIG_FILE_VAR: &str = "OL_CONFIG";

/// Complete node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP router configuration.
    pub router: RouterConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Which key-value store adapter backs the ledgers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local; lost on restart.
    #[default]
    Memory,
    /// Single file rewritten on every mutation.
    File,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            other => Err(format!("unknown storage backend: {}", other)),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Store adapter.
    pub backend: StorageBackend,
    /// Data file for the `file` backend.
    pub data_path: PathBuf,
    /// Where request counters live relative to offer logs.
    pub key_layout: KeyLayout,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_path: PathBuf::from("./data/ledger.bin"),
            key_layout: KeyLayout::Separate,
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum NodeConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<NodeConfig, NodeConfigError> {
    load_config_from(|name| std::env::var(name).ok())
}

/// Load configuration using `env` to look up variables.
pub fn load_config_from<F>(env: F) -> Result<NodeConfig, NodeConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match env(CONFIG_FILE_VAR) {
        Some(path) => {
            let path = PathBuf::from(path);
            let raw = std::fs::read_to_string(&path).map_err(|source| NodeConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let config = serde_json::from_str(&raw).map_err(|source| NodeConfigError::Parse {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "Loaded config file");
            config
        }
        None => NodeConfig::default(),
    };

    apply_env_overrides(&mut config, &env);
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut NodeConfig, env: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = parsed(env, "OL_HTTP_HOST") {
        config.router.http.host = host;
    }
    if let Some(port) = parsed(env, "OL_HTTP_PORT") {
        config.router.http.port = port;
    }
    if let Some(token) = env("OL_API_TOKEN") {
        config.router.auth.api_token = Some(token);
    }
    if let Some(origin) = env("OL_ALLOWED_ORIGIN") {
        config.router.cors.allowed_origin = origin;
    }
    if let Some(raw) = env("OL_CORS_MAX_AGE") {
        match humantime_serde::re::humantime::parse_duration(&raw) {
            Ok(max_age) => config.router.cors.max_age = max_age,
            Err(e) => warn!(var = "OL_CORS_MAX_AGE", value = %raw, error = %e, "Ignoring invalid value"),
        }
    }
    if let Some(backend) = parsed(env, "OL_STORAGE_BACKEND") {
        config.storage.backend = backend;
    }
    if let Some(path) = env("OL_DATA_PATH") {
        config.storage.data_path = PathBuf::from(path);
    }
    if let Some(layout) = parsed(env, "OL_KEY_LAYOUT") {
        config.storage.key_layout = layout;
    }
}

fn parsed<T, F>(env: &F, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let raw = env(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(var = name, value = %raw, error = %e, "Ignoring invalid value");
            None
        }
    }
}
