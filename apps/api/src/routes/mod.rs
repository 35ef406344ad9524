pub mod health;

use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, CorsLayer};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Result<Router> {
    let cors = cors_layer(&state.config.cors_allowed_origin)?;
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Ok(Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/analyze",
            post(handlers::handle_analyze).layer(body_limit),
        )
        .layer(cors)
        .with_state(state))
}

/// `*` mirrors whatever origin calls (development). Anything else is the one
/// deployed front-end origin allowed to call with credentials.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    if allowed_origin == "*" {
        return Ok(CorsLayer::very_permissive());
    }

    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("CORS_ALLOWED_ORIGIN '{allowed_origin}' is not a valid origin"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::nlp::pipeline::WhitespacePipeline;

    fn state_with_origin(origin: &str) -> AppState {
        AppState {
            config: Config {
                cors_allowed_origin: origin.to_string(),
                ..Config::default()
            },
            pipeline: Arc::new(WhitespacePipeline),
        }
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let app = build_router(state_with_origin("*")).unwrap();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["service"], "resume-match-api");
        assert_eq!(value["model"], "whitespace");
    }

    #[tokio::test]
    async fn test_configured_origin_is_allowed() {
        let app = build_router(state_with_origin("https://app.example.com")).unwrap();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/analyze")
            .header(header::ORIGIN, "https://app.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://app.example.com"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[tokio::test]
    async fn test_wildcard_mirrors_any_origin() {
        let app = build_router(state_with_origin("*")).unwrap();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/analyze")
            .header(header::ORIGIN, "http://localhost:3000")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        assert!(cors_layer("bad\norigin").is_err());
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let mut state = state_with_origin("*");
        state.config.max_upload_bytes = 64;
        let app = build_router(state).unwrap();

        let boundary = "limit-boundary";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"big.pdf\"\r\n\r\n{}\r\n--{boundary}--\r\n",
            "x".repeat(1024)
        );
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
