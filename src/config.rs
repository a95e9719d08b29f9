//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub inference: InferenceSection,

    #[serde(default)]
    pub datasets: DatasetsConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Remote inference service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceSection {
    #[serde(default = "default_inference_url")]
    pub base_url: String,

    #[serde(default = "default_inference_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_inference_enabled")]
    pub enabled: bool,
}

fn default_inference_url() -> String {
    "https://mal-nutrition-fastapi.onrender.com".to_string()
}

fn default_inference_timeout() -> u64 {
    10_000
}

fn default_inference_enabled() -> bool {
    true
}

impl Default for InferenceSection {
    fn default() -> Self {
        Self {
            base_url: default_inference_url(),
            request_timeout_ms: default_inference_timeout(),
            enabled: default_inference_enabled(),
        }
    }
}

/// Read-only dataset directory configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("nutriwatch").join("data").to_string_lossy().to_string())
        .unwrap_or_else(|| "./data".to_string())
}

impl Default for DatasetsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Durable state configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_state_dir")]
    pub state_dir: String,
}

fn default_state_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("nutriwatch").join("state").to_string_lossy().to_string())
        .unwrap_or_else(|| "./state".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("nutriwatch").join("config.toml")),
            Some(PathBuf::from("/etc/nutriwatch/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("NUTRIWATCH_DATA_DIR") {
            self.datasets.data_dir = data_dir;
        }
        if let Ok(state_dir) = std::env::var("NUTRIWATCH_STATE_DIR") {
            self.store.state_dir = state_dir;
        }

        if let Ok(host) = std::env::var("NUTRIWATCH_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("NUTRIWATCH_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        if let Ok(url) = std::env::var("NUTRIWATCH_INFERENCE_URL") {
            self.inference.base_url = url;
        }

        if let Ok(level) = std::env::var("NUTRIWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NUTRIWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            inference: InferenceSection::default(),
            datasets: DatasetsConfig::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# NutriWatch Configuration
#
# Environment variables override these settings:
# - NUTRIWATCH_DATA_DIR
# - NUTRIWATCH_STATE_DIR
# - NUTRIWATCH_API_HOST
# - NUTRIWATCH_API_PORT
# - NUTRIWATCH_INFERENCE_URL
# - NUTRIWATCH_LOG_LEVEL
# - NUTRIWATCH_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins (empty = allow any)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[inference]
# Hosted prediction model base URL
base_url = "https://mal-nutrition-fastapi.onrender.com"

# Outbound request timeout (ms)
request_timeout_ms = 10000

# Call the remote model at all; the heuristic fallback
# still answers when this is off
enabled = true

[datasets]
# Directory holding the read-only JSON artifacts
data_dir = "~/.local/share/nutriwatch/data"

[store]
# Directory for durable prediction history
state_dir = "~/.local/share/nutriwatch/state"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 8090);
        assert_eq!(
            config.inference.base_url,
            "https://mal-nutrition-fastapi.onrender.com"
        );
        assert!(config.inference.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        let toml = r#"
            [api]
            port = 9000

            [inference]
            enabled = false
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert!(!config.inference.enabled);
        assert_eq!(config.inference.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_generated_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 8090);
    }
}
