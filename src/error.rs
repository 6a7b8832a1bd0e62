// src/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the Vitrine asset server
#[derive(Error, Debug)]
pub enum VitrineError {
    #[error("Model asset not found: {path}")]
    ModelNotFound { path: String },

    #[error("Requested path escapes the models root: {path}")]
    PathEscape { path: String },

    #[error("Template rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl VitrineError {
    /// Create a configuration error with a custom message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error with a custom message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            VitrineError::ModelNotFound { .. } => StatusCode::NOT_FOUND,
            VitrineError::PathEscape { .. } => StatusCode::FORBIDDEN,
            VitrineError::Template(_)
            | VitrineError::Config { .. }
            | VitrineError::Io(_)
            | VitrineError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            VitrineError::ModelNotFound { .. } => "MODEL_NOT_FOUND",
            VitrineError::PathEscape { .. } => "PATH_ESCAPE",
            VitrineError::Template(_) => "TEMPLATE_ERROR",
            VitrineError::Config { .. } => "CONFIG_ERROR",
            VitrineError::Io(_) => "IO_ERROR",
            VitrineError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Check if this error should be logged as a warning vs error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            VitrineError::ModelNotFound { .. } | VitrineError::PathEscape { .. }
        )
    }
}

impl IntoResponse for VitrineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        // Log the error appropriately
        if self.is_client_error() {
            tracing::warn!("Client error: {} ({})", message, error_code);
        } else {
            tracing::error!("Server error: {} ({})", message, error_code);
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "status": status.as_u16()
            },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));

        (status, body).into_response()
    }
}

// Request logging middleware

use axum::{extract::Request, middleware::Next};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Request logging middleware
pub async fn request_logging(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4();

    let user_agent = request
        .headers()
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    // Add request ID to request extensions for use in handlers
    let mut request = request;
    request.extensions_mut().insert(request_id);

    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            user_agent = %user_agent,
            "Request completed"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            duration_ms = duration.as_millis() as u64,
            "Request completed"
        );
    }

    response
}
