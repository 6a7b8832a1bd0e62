// src/web/cors.rs

//! CORS header injection for the browser-side model viewer.
//!
//! Three.js loaders fetch model files with `fetch()`, so every response the
//! server produces must carry the permissive CORS headers, including error
//! responses: a 404 that the browser refuses to show the page is
//! indistinguishable from a network failure. tower-http's `CorsLayer` only
//! emits the allow-methods/allow-headers pair on preflight responses, so the
//! rule is expressed as a plain response middleware instead.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "GET, POST, OPTIONS";

/// Attach the fixed CORS headers to every outgoing response.
///
/// Runs as the outermost layer of the router so no route, error path, or
/// fallback can bypass it. Existing values for the same names are
/// overwritten.
pub async fn apply_cors_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn test_app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/conflicting",
                get(|| async {
                    (
                        [("Access-Control-Allow-Origin", "https://example.com")],
                        "ok",
                    )
                }),
            )
            .layer(axum::middleware::from_fn(apply_cors_headers))
    }

    fn assert_cors_headers(response: &axum::response::Response) {
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Content-Type"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_headers_on_success() {
        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/ok")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors_headers(&response);
    }

    #[tokio::test]
    async fn test_headers_on_fallback_404() {
        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/no-such-route")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors_headers(&response);
    }

    #[tokio::test]
    async fn test_headers_overwrite_handler_values() {
        let request = HttpRequest::builder()
            .method(Method::GET)
            .uri("/conflicting")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();
        assert_cors_headers(&response);
        assert_eq!(
            response
                .headers()
                .get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .iter()
                .count(),
            1
        );
    }
}
