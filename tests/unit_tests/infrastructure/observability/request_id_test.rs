use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::Request;
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use cardsmith::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, request_id_middleware,
};

fn echo_router() -> Router {
    Router::new()
        .route(
            "/",
            get(|Extension(request_id): Extension<RequestId>| async move { request_id.0 }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[tokio::test]
async fn given_request_id_header_when_handling_then_handler_sees_same_id() {
    let request = Request::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "req-99")
        .body(Body::empty())
        .unwrap();

    let response = echo_router().oneshot(request).await.unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "req-99");
    assert_eq!(body_text(response).await, "req-99");
}

#[tokio::test]
async fn given_empty_request_id_header_when_handling_then_generates_uuid() {
    let request = Request::builder()
        .uri("/")
        .header(REQUEST_ID_HEADER, "")
        .body(Body::empty())
        .unwrap();

    let response = echo_router().oneshot(request).await.unwrap();

    let echoed = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let seen = body_text(response).await;
    assert_eq!(echoed, seen);
    assert!(uuid::Uuid::parse_str(&seen).is_ok());
}
