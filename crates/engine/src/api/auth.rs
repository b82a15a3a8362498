//! Authenticated-user extraction for HTTP routes
//!
//! Token verification happens upstream; the engine trusts the `X-User-Id`
//! header it forwards.
//!
//! ```rust,ignore
//! async fn handler(CurrentUser(user_id): CurrentUser) -> impl IntoResponse {
//!     format!("Hello, {}", user_id)
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use herobook_domain::UserId;

pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the acting user. A missing or malformed header is a 401.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        raw.parse::<UserId>().map(CurrentUser).map_err(|e| {
            tracing::debug!(error = %e, "Rejecting malformed X-User-Id");
            StatusCode::UNAUTHORIZED
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest, routing::get, Router};
    use tower::ServiceExt;

    async fn protected_handler(CurrentUser(user_id): CurrentUser) -> String {
        format!("user:{}", user_id)
    }

    fn app() -> Router {
        Router::new().route("/", get(protected_handler))
    }

    #[tokio::test]
    async fn extracts_user_from_header() {
        let user_id = UserId::new();
        let request = HttpRequest::builder()
            .uri("/")
            .header("X-User-Id", user_id.to_string())
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], format!("user:{}", user_id).as_bytes());
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let request = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_is_unauthorized() {
        let request = HttpRequest::builder()
            .uri("/")
            .header("X-User-Id", "test-user-123")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
