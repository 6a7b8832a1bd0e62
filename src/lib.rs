// src/lib.rs

//! # Vitrine - static asset server for browser-side 3D model viewers
//!
//! Vitrine serves MMD model files, their textures, and a single viewer page
//! over HTTP, attaching permissive CORS headers to every response so that a
//! Three.js client can fetch model files cross-origin.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vitrine::config::VitrineConfig;
//! use vitrine::store::ModelStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = VitrineConfig::development();
//!     let store = Arc::new(ModelStore::open(&config.assets.models_dir)?);
//!     vitrine::web::start_server(&config, true, store).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod store;
pub mod web;

// Re-export commonly used types for convenience
pub use error::VitrineError;
pub use store::ModelStore;

/// Result type alias for Vitrine operations
pub type Result<T> = std::result::Result<T, VitrineError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize logging for library usage
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("vitrine=info"))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
