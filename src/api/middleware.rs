//! API middleware layers.
//!
//! Assigns every request a [`TraceId`], makes it available to handlers as a
//! request extension, and echoes it in the `x-request-id` response header.

use axum::http::header::HeaderName;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::types::TraceId;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied request id that is reused as-is
const MAX_FORWARDED_ID_LEN: usize = 64;

fn forwarded_id(request: &axum::extract::Request) -> Option<TraceId> {
    let raw = request.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let valid = !raw.is_empty()
        && raw.len() <= MAX_FORWARDED_ID_LEN
        && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| TraceId::from(raw))
}

/// Axum middleware that attaches a trace id to the request and response.
///
/// A well-formed incoming `x-request-id` is reused; otherwise a fresh id
/// is generated.
pub async fn assign_trace_id(mut request: axum::extract::Request, next: Next) -> Response {
    let trace = forwarded_id(&request).unwrap_or_else(TraceId::generate);
    request.extensions_mut().insert(trace.clone());

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(trace.as_str()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware;
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/test",
                get(|Extension(trace): Extension<TraceId>| async move { trace.to_string() }),
            )
            .layer(middleware::from_fn(assign_trace_id))
    }

    #[tokio::test]
    async fn test_request_id_generated() {
        let resp = app()
            .oneshot(Request::get("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let header = resp.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap().to_string();
        assert_eq!(header.len(), 8);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, header.as_bytes());
    }

    #[tokio::test]
    async fn test_forwarded_request_id_reused() {
        let resp = app()
            .oneshot(
                Request::get("/test")
                    .header(REQUEST_ID_HEADER, "client-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "client-42");
    }

    #[tokio::test]
    async fn test_malformed_request_id_replaced() {
        let resp = app()
            .oneshot(
                Request::get("/test")
                    .header(REQUEST_ID_HEADER, "has spaces and ; junk")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_ne!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "has spaces and ; junk");
    }
}
