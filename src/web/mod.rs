// src/web/mod.rs

use anyhow::Result;
use axum::{serve, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

pub mod cors;
mod handlers;
mod static_assets;
mod templates;

use crate::config::VitrineConfig;
use crate::error::request_logging;
use crate::store::ModelStore;

/// Start the Axum web server over the given model store
pub async fn start_server(
    config: &VitrineConfig,
    dev_mode: bool,
    models: Arc<ModelStore>,
) -> Result<()> {
    let app = create_app(config, dev_mode, models.clone())?;

    let listener = TcpListener::bind(config.server.bind_address()).await?;
    info!(
        "Server started - listening on http://{}",
        config.server.bind_address()
    );
    info!("Serving models from {}", models.root().display());

    if dev_mode {
        info!("Development mode: enhanced logging enabled");
        info!("Available endpoints:");
        info!("   GET  /                 - Viewer page");
        info!("   GET  /models/*         - Model files");
        info!("   GET  /static/*         - Viewer assets");
        info!("   GET  /health           - Health check");
    }

    info!("Press Ctrl+C to stop");

    // Start server with graceful shutdown
    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the Axum application with all routes and middleware
fn create_app(config: &VitrineConfig, dev_mode: bool, models: Arc<ModelStore>) -> Result<Router> {
    let mut app = Router::new().merge(handlers::create_routes(models)?);

    // Apply middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(axum::middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout,
        )));

    if dev_mode {
        app = app.layer(middleware_stack);
    } else {
        app = app.layer(middleware_stack.layer(CompressionLayer::new()));
    }

    // CORS header injection wraps everything, including the 404 fallback, so
    // that error responses reach the browser-side fetch handlers intact.
    app = app.layer(axum::middleware::from_fn(cors::apply_cors_headers));

    Ok(app)
}

/// Build the application for integration tests (dev mode, default timeouts)
pub fn create_test_app(models: Arc<ModelStore>) -> Result<Router> {
    create_app(&VitrineConfig::development(), true, models)
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_store() -> (TempDir, Arc<ModelStore>) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("cube.pmx"), b"cube").unwrap();
        let store = Arc::new(ModelStore::open(dir.path()).unwrap());
        (dir, store)
    }

    #[tokio::test]
    async fn test_app_creation() {
        let (_dir, store) = test_store();
        assert!(create_app(&VitrineConfig::development(), false, store).is_ok());
    }

    #[tokio::test]
    async fn test_dev_mode_app_creation() {
        let (_dir, store) = test_store();
        assert!(create_app(&VitrineConfig::development(), true, store).is_ok());
    }

    #[tokio::test]
    async fn test_index_endpoint() {
        let (_dir, store) = test_store();
        let app = create_test_app(store).unwrap();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_dir, store) = test_store();
        let app = create_test_app(store).unwrap();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_model_endpoint() {
        let (_dir, store) = test_store();
        let app = create_test_app(store).unwrap();

        let request = Request::builder()
            .method(Method::GET)
            .uri("/models/cube.pmx")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
