// src/config/mod.rs

use anyhow::{Context, Result};
use std::path::PathBuf;

mod types;

pub use types::*;

impl VitrineConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Command line arguments (highest priority, applied by the caller)
    /// 2. Environment variables
    /// 3. Configuration file
    /// 4. Default values (lowest priority)
    pub fn load() -> Result<Self> {
        let mut settings = config::Config::builder();

        // Start with defaults
        settings = settings.add_source(config::Config::try_from(&Self::default())?);

        // Load from config file if it exists
        let config_file =
            std::env::var("VITRINE_CONFIG").unwrap_or_else(|_| "vitrine.toml".to_string());

        if std::path::Path::new(&config_file).exists() {
            settings = settings.add_source(config::File::with_name(&config_file));
        }

        // Override with environment variables (prefix: VITRINE_)
        settings = settings.add_source(
            config::Environment::with_prefix("VITRINE")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server.validate().map_err(anyhow::Error::msg)?;
        self.logging.validate().map_err(anyhow::Error::msg)?;
        Ok(())
    }

    /// Create a development configuration with sensible defaults
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                request_timeout: 30,
            },
            assets: AssetsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }

    /// Create a production configuration template
    pub fn production() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                request_timeout: 60,
            },
            assets: AssetsConfig::default(),
            logging: LoggingConfig {
                level: "warn".to_string(),
                format: LogFormat::Json,
            },
        }
    }

    /// Export configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse TOML configuration")
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &PathBuf) -> Result<()> {
        let toml_content = self.to_toml()?;
        std::fs::write(path, toml_content)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        Self::from_toml(&content)
    }
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self::development()
    }
}

/// Helper function to load configuration with better error reporting
pub fn load_config() -> Result<VitrineConfig> {
    let config = VitrineConfig::load().context("Failed to load Vitrine configuration")?;

    config
        .validate()
        .context("Configuration validation failed")?;

    // Log configuration source information
    if let Ok(custom) = std::env::var("VITRINE_CONFIG") {
        tracing::info!("Configuration loaded from custom file: {}", custom);
    } else if std::path::Path::new("vitrine.toml").exists() {
        tracing::info!("Configuration loaded from: vitrine.toml");
    } else {
        tracing::info!("Using default configuration (no config file found)");
    }

    tracing::info!("Models directory: {}", config.assets.models_dir.display());

    Ok(config)
}

/// Generate a sample configuration file
pub fn generate_sample_config(production: bool) -> Result<()> {
    let config = if production {
        VitrineConfig::production()
    } else {
        VitrineConfig::development()
    };

    let filename = if production {
        "vitrine.production.toml"
    } else {
        "vitrine.sample.toml"
    };

    config.save_to_file(&PathBuf::from(filename))?;

    println!("Generated sample configuration: {}", filename);
    println!("\nTo use this configuration:");
    println!("1. Copy to vitrine.toml: cp {} vitrine.toml", filename);
    println!("2. Edit the configuration as needed");
    println!("3. Set environment variable: export VITRINE_CONFIG=vitrine.toml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = VitrineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn test_production_config() {
        let config = VitrineConfig::production();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_config_serialization() {
        let config = VitrineConfig::development();
        let toml_str = config.to_toml().unwrap();
        let deserialized = VitrineConfig::from_toml(&toml_str).unwrap();

        assert_eq!(config.server.port, deserialized.server.port);
        assert_eq!(config.assets.models_dir, deserialized.assets.models_dir);
    }

    #[test]
    fn test_config_file_operations() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("test_config.toml");

        let config = VitrineConfig::development();
        config.save_to_file(&config_path).unwrap();

        let loaded_config = VitrineConfig::load_from_file(&config_path).unwrap();
        assert_eq!(config.server.port, loaded_config.server.port);
    }

    #[test]
    fn test_config_validation() {
        let mut config = VitrineConfig::development();

        // Valid config should pass
        assert!(config.validate().is_ok());

        // Invalid port should fail
        config.server.port = 0;
        assert!(config.validate().is_err());

        // Reset port and test invalid log level
        config.server.port = 5000;
        config.logging.level = "shouting".to_string();
        assert!(config.validate().is_err());
    }
}
