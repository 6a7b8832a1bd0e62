// src/config/types.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Vitrine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitrineConfig {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (e.g., "0.0.0.0", "127.0.0.1")
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Request timeout in seconds
    pub request_timeout: u64,
}

/// Asset serving configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding the servable model files.
    ///
    /// Defaults to a `models` directory next to the server executable, so a
    /// deployment can drop model files alongside the binary without any
    /// configuration.
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
        }
    }
}

/// The `models` subdirectory of the directory the executable lives in.
pub fn default_models_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("models")
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format
    pub format: LogFormat,
}

/// Log output formats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    Pretty,

    /// Compact format
    Compact,

    /// JSON format for structured logging
    Json,
}

impl VitrineConfig {
    /// Get log level as tracing filter
    pub fn log_filter(&self) -> String {
        format!("vitrine={},tower_http=info", self.logging.level)
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Server port cannot be 0".to_string());
        }

        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.level.as_str()) {
            return Err(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.level,
                valid_levels.join(", ")
            ));
        }

        Ok(())
    }
}
