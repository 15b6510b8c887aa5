//! Per-request access log with correlation ids.

use axum::{
    extract::Request,
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Correlation id of the current request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

/// Log method, path, status and duration of every request.
///
/// The incoming `x-correlation-id` is reused when present, otherwise a v4
/// UUID is generated; either way it is echoed on the response. `200`
/// responses log at info, everything else at warn.
pub async fn request_logger(mut request: Request, next: Next) -> Response {
    let correlation_id = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().clone();
    let url = request.uri().clone();
    request
        .extensions_mut()
        .insert(CorrelationId(correlation_id.clone()));

    let start = Instant::now();
    let mut response = next.run(request).await;
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }

    let status = response.status();
    if status == StatusCode::OK {
        info!(
            %method,
            %url,
            status = status.as_u16(),
            duration_ms,
            correlation_id = %correlation_id,
            "request completed"
        );
    } else {
        warn!(
            %method,
            %url,
            status = status.as_u16(),
            duration_ms,
            correlation_id = %correlation_id,
            "request completed"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Extension, Router, body::Body, http::Request as HttpRequest, middleware, routing::get};
    use tower::ServiceExt;

    async fn echo_id(Extension(id): Extension<CorrelationId>) -> String {
        id.0
    }

    fn app() -> Router {
        Router::new()
            .route("/", get(echo_id))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(middleware::from_fn(request_logger))
    }

    #[tokio::test]
    async fn test_reuses_incoming_correlation_id() {
        let response = app()
            .oneshot(
                HttpRequest::get("/")
                    .header(CORRELATION_ID_HEADER, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[CORRELATION_ID_HEADER], "req-42");
    }

    #[tokio::test]
    async fn test_generates_correlation_id_when_absent() {
        let response = app()
            .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers()[CORRELATION_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_header_set_on_error_responses() {
        let response = app()
            .oneshot(HttpRequest::get("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
    }
}
