// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod store;
mod web;

use config::{generate_sample_config, load_config};
use store::ModelStore;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Static asset server for browser-side 3D model viewers")]
#[command(long_about = r#"
Vitrine serves MMD model files, their textures, and a single viewer page
over HTTP, with permissive CORS headers on every response so a Three.js
client can fetch model files cross-origin.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Vitrine server
    Serve {
        /// Port to bind to
        #[arg(short, long, env = "VITRINE_PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "VITRINE_HOST")]
        host: Option<String>,

        /// Directory holding the servable model files
        #[arg(short, long, env = "VITRINE_MODELS_DIR")]
        models_dir: Option<PathBuf>,

        /// Enable development mode (more verbose logging)
        #[arg(long)]
        dev: bool,

        /// Configuration file path
        #[arg(short, long, env = "VITRINE_CONFIG")]
        config: Option<String>,
    },
    /// Generate sample configuration files
    Config {
        /// Generate production configuration
        #[arg(long)]
        production: bool,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            models_dir,
            dev,
            config,
        } => {
            // Set config file path if provided
            if let Some(config_path) = config {
                std::env::set_var("VITRINE_CONFIG", config_path);
            }

            // Load configuration
            let mut app_config = load_config()?;

            // Override with CLI arguments
            if let Some(port) = port {
                app_config.server.port = port;
            }
            if let Some(host) = host {
                app_config.server.host = host;
            }
            if let Some(models_dir) = models_dir {
                app_config.assets.models_dir = models_dir;
            }

            // Initialize logging based on config
            init_logging(&app_config, dev)?;

            info!("Starting Vitrine");
            info!("Version: {}", env!("CARGO_PKG_VERSION"));
            info!(
                "Binding to {}:{}",
                app_config.server.host, app_config.server.port
            );

            if dev {
                warn!("Development mode enabled - not for production use");
            }

            // Resolve the models root once; it is fixed for the process
            // lifetime and handed to the request pipeline explicitly.
            let store = Arc::new(ModelStore::open(&app_config.assets.models_dir)?);
            info!("Models root resolved to {}", store.root().display());

            // Start the web server
            web::start_server(&app_config, dev, store).await?;
        }

        Commands::Config { production } => {
            init_minimal_logging()?;
            generate_sample_config(production)?;
        }

        Commands::Version => {
            println!("vitrine {}", env!("CARGO_PKG_VERSION"));
            println!("{}", env!("CARGO_PKG_DESCRIPTION"));
        }
    }

    Ok(())
}

/// Initialize logging based on configuration and development mode
fn init_logging(config: &config::VitrineConfig, dev_mode: bool) -> Result<()> {
    let filter = if dev_mode {
        "vitrine=debug,tower_http=debug,axum=debug,info".to_string()
    } else {
        config.log_filter()
    };

    let subscriber = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
    );

    match config.logging.format {
        config::LogFormat::Json => {
            subscriber
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        config::LogFormat::Compact => {
            subscriber
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
        config::LogFormat::Pretty => {
            subscriber
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Initialize minimal logging for CLI commands
fn init_minimal_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        // Test basic serve command
        let cli = Cli::try_parse_from(["vitrine", "serve"]).unwrap();
        match cli.command {
            Commands::Serve {
                port,
                host,
                models_dir,
                dev,
                config,
            } => {
                assert_eq!(port, None);
                assert_eq!(host, None);
                assert_eq!(models_dir, None);
                assert!(!dev);
                assert_eq!(config, None);
            }
            _ => panic!("Expected serve command"),
        }
    }

    #[test]
    fn test_cli_with_options() {
        // Test serve with custom options
        let cli = Cli::try_parse_from([
            "vitrine",
            "serve",
            "--port",
            "3000",
            "--host",
            "192.168.1.100",
            "--models-dir",
            "/srv/models",
            "--dev",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        match cli.command {
            Commands::Serve {
                port,
                host,
                models_dir,
                dev,
                config,
            } => {
                assert_eq!(port, Some(3000));
                assert_eq!(host, Some("192.168.1.100".to_string()));
                assert_eq!(models_dir, Some(PathBuf::from("/srv/models")));
                assert!(dev);
                assert_eq!(config, Some("custom.toml".to_string()));
            }
            _ => panic!("Expected serve command"),
        }
    }

    #[test]
    fn test_config_command() {
        let cli = Cli::try_parse_from(["vitrine", "config", "--production"]).unwrap();
        match cli.command {
            Commands::Config { production } => {
                assert!(production);
            }
            _ => panic!("Expected config command"),
        }
    }
}
