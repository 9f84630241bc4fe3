//! Configuration loading
//!
//! Resolution priority for every setting:
//! 1. Environment variable (highest)
//! 2. TOML config file (`~/.config/marketpulse/config.toml`)
//! 3. Compiled default
//!
//! The model API key has no compiled default and must come from one of the
//! first two tiers.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default HTTP bind address
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5740";
/// Default OpenAI-compatible completion endpoint base
const DEFAULT_MODEL_BASE_URL: &str = "https://api.openai.com/v1";
/// Default completion model
const DEFAULT_MODEL_NAME: &str = "gpt-4o";
/// Default upstream model-call timeout
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 30;

/// Service configuration resolved at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub model: ModelConfig,
}

/// Upstream model endpoint configuration
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// On-disk TOML form of the configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    pub bind_addr: Option<String>,
    pub database_url: Option<String>,
    pub model_base_url: Option<String>,
    pub model_api_key: Option<String>,
    pub model_name: Option<String>,
    pub model_timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Load `~/.config/marketpulse/config.toml` if present
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load a specific TOML file; a missing or unparseable file yields defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    info!("Loaded config file: {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Ignoring malformed config file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

impl ServiceConfig {
    /// Resolve the full service configuration from env + TOML + defaults
    pub fn load() -> Result<Self> {
        let toml_config = TomlConfig::load();
        Self::resolve(&toml_config)
    }

    /// Resolve against an already-loaded TOML tier (separated for tests)
    pub fn resolve(toml_config: &TomlConfig) -> Result<Self> {
        let bind_addr = resolve_value(
            std::env::var("MARKETPULSE_BIND_ADDR").ok(),
            toml_config.bind_addr.clone(),
            || DEFAULT_BIND_ADDR.to_string(),
        );

        let database_url = resolve_value(
            std::env::var("MARKETPULSE_DATABASE_URL").ok(),
            toml_config.database_url.clone(),
            default_database_url,
        );

        let api_key = std::env::var("MARKETPULSE_MODEL_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                toml_config
                    .model_api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            })
            .ok_or_else(|| {
                Error::Config(
                    "Model API key not configured. Set MARKETPULSE_MODEL_API_KEY or \
                     model_api_key in ~/.config/marketpulse/config.toml"
                        .to_string(),
                )
            })?;

        let model = ModelConfig {
            base_url: resolve_value(
                std::env::var("MARKETPULSE_MODEL_BASE_URL").ok(),
                toml_config.model_base_url.clone(),
                || DEFAULT_MODEL_BASE_URL.to_string(),
            ),
            api_key,
            model: resolve_value(
                std::env::var("MARKETPULSE_MODEL_NAME").ok(),
                toml_config.model_name.clone(),
                || DEFAULT_MODEL_NAME.to_string(),
            ),
            timeout_secs: std::env::var("MARKETPULSE_MODEL_TIMEOUT_SECS")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .or(toml_config.model_timeout_secs)
                .unwrap_or(DEFAULT_MODEL_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr,
            database_url,
            model,
        })
    }
}

fn resolve_value(
    env: Option<String>,
    toml: Option<String>,
    default: impl FnOnce() -> String,
) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| toml.filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(default)
}

/// Platform config file location
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("marketpulse").join("config.toml"))
}

/// Default on-disk database location, as a sqlx connection URL
fn default_database_url() -> String {
    let db_path = dirs::data_local_dir()
        .map(|d| d.join("marketpulse"))
        .unwrap_or_else(|| PathBuf::from("./marketpulse_data"))
        .join("marketpulse.db");
    format!("sqlite://{}?mode=rwc", db_path.display())
}
