use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::static_assets::StaticAssets;
use super::templates::Templates;
use crate::error::VitrineError;
use crate::store::ModelStore;

/// Shared state threaded through the request pipeline. The model store is
/// resolved once at startup; handlers never consult ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub templates: Templates,
    pub models: Arc<ModelStore>,
}

/// Create all application routes
pub fn create_routes(models: Arc<ModelStore>) -> Result<Router> {
    let templates = Templates::new()?;
    let state = AppState { templates, models };

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/models/*path", get(model_handler))
        .route("/static/*path", get(static_handler))
        .with_state(state))
}

/// Handle requests to the root path - serve the viewer page from template
async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, VitrineError> {
    // The viewer page is fixed; no dynamic template variables.
    let html = state.templates.render("index.html", &json!({}))?;
    Ok(Html(html))
}

/// Health check endpoint with JSON response
async fn health_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "vitrine",
        "version": env!("CARGO_PKG_VERSION"),
        "models_root": state.models.root().display().to_string(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Serve model files (.pmx, textures, etc.) from the models directory.
///
/// The wildcard captures arbitrary-depth sub-paths, so textures referenced
/// relative to a model file resolve naturally.
async fn model_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, VitrineError> {
    state.models.serve(&path).await
}

/// Serve embedded viewer assets using rust-embed
async fn static_handler(Path(path): Path<String>) -> impl IntoResponse {
    match StaticAssets::get(&path) {
        Some(content) => {
            let mime_type = mime_guess::from_path(&path).first_or_octet_stream();

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, mime_type.as_ref())
                .header(header::CACHE_CONTROL, "public, max-age=31536000")
                .body(axum::body::Body::from(content.data))
                .unwrap()
        }
        None => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(axum::body::Body::from("File not found"))
            .unwrap(),
    }
}
