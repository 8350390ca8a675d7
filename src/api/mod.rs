use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, Uri},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::ApiError;

pub mod messages;
pub mod response;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

/// Build the service router for the given configuration
pub fn app(config: AppConfig) -> Router {
    let enable_request_logging = config.api.enable_request_logging;
    let cors = config.security.enable_cors.then(|| cors_layer(&config.security.cors_origins));
    let state = AppState { config: Arc::new(config) };

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(message_routes())
        .fallback(not_found)
        .with_state(state);

    // Global middleware
    if let Some(cors) = cors {
        router = router.layer(cors);
    }
    if enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/api/messages/from", post(messages::from_label))
        .route("/api/messages/display", post(messages::display))
        .route("/api/messages/display/batch", post(messages::display_batch))
}

/// CORS restricted to the configured origins. Unparseable origins are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::AUTHORIZATION])
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Baboo Support API",
            "version": version,
            "description": "Sender identity labels for support conversations",
            "endpoints": {
                "health": "/health (public)",
                "from": "POST /api/messages/from",
                "display": "POST /api/messages/display",
                "display_batch": "POST /api/messages/display/batch",
            }
        }
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route {} not found", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let mut config = AppConfig::development();
        config.identity.legacy_admin_email = Some("ops@baboo.example".to_string());
        app(config)
    }

    async fn post_json(router: Router, path: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_from_label_for_external_traveler() {
        let (status, body) = post_json(
            test_app(),
            "/api/messages/from",
            json!({ "kind": "external", "traveler_name": "Tom", "expert_name": "Ana" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["from"], "Tom - Traveler");
        assert_eq!(body["data"]["attributes"], r#"{"from":"Tom - Traveler"}"#);
    }

    #[tokio::test]
    async fn test_display_legacy_admin() {
        let (status, body) = post_json(
            test_app(),
            "/api/messages/display",
            json!({ "message": { "author": "ops@baboo.example", "body": "hi" } }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["display_name"], "Baboo Team");
        assert_eq!(body["data"]["category"], "admin");
        assert_eq!(body["data"]["is_viewer"], false);
    }

    #[tokio::test]
    async fn test_batch_limit() {
        let mut config = AppConfig::development();
        config.api.max_batch_messages = 1;
        let (status, body) = post_json(
            app(config),
            "/api/messages/display/batch",
            json!({ "messages": [{ "author": "a" }, { "author": "b" }] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_kind_is_invalid_json() {
        let (status, body) = post_json(test_app(), "/api/messages/from", json!({ "from": "x" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let request = Request::builder().uri("/nope").body(Body::empty()).unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
