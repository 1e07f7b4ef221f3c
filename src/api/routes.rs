//! API Routes
//!
//! Configures the Axum router with all session endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_session_handler, health_handler, refresh_handler, stats_handler, whoami_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /auth/sessions` - Issue a token pair for a user
/// - `PUT /auth/refresh` - Trade a refresh token for a new pair
/// - `GET /auth/me` - Identity behind a bearer access token
/// - `GET /stats` - Session cache statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/sessions", post(create_session_handler))
        .route("/auth/refresh", put(refresh_handler))
        .route("/auth/me", get(whoami_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tokio_util::sync::CancellationToken;
    use tower::util::ServiceExt;

    fn create_test_app(cancel: &CancellationToken) -> Router {
        create_router(AppState::from_config(&Config::default(), cancel.clone()))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let cancel = CancellationToken::new();
        let response = create_test_app(&cancel)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        cancel.cancel();
    }

    #[tokio::test]
    async fn test_create_session_endpoint() {
        let cancel = CancellationToken::new();
        let response = create_test_app(&cancel)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/sessions")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"user_id":"67e55044-10b1-426f-9247-bb680e5fe0c8"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        cancel.cancel();
    }

    #[tokio::test]
    async fn test_refresh_unknown_token() {
        let cancel = CancellationToken::new();
        let body = format!(r#"{{"refresh_token":"{}"}}"#, "0".repeat(64));
        let response = create_test_app(&cancel)
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/auth/refresh")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        cancel.cancel();
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let cancel = CancellationToken::new();
        let response = create_test_app(&cancel)
            .oneshot(Request::builder().uri("/auth/me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        cancel.cancel();
    }
}
