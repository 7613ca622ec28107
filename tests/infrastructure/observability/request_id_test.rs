use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use atapro::infrastructure::observability::{REQUEST_ID_HEADER, RequestId, request_id_middleware};

fn create_router() -> Router {
    Router::new()
        .route(
            "/echo",
            get(|Extension(id): Extension<RequestId>| async move { id.to_string() }),
        )
        .layer(middleware::from_fn(request_id_middleware))
}

fn echo_request(request_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/echo");
    if let Some(id) = request_id {
        builder = builder.header(REQUEST_ID_HEADER, id);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn given_caller_request_id_when_handling_then_it_is_propagated_and_echoed() {
    let response = create_router()
        .oneshot(echo_request(Some("req-42")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[REQUEST_ID_HEADER], "req-42");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"req-42");
}

#[tokio::test]
async fn given_no_request_id_when_handling_then_uuid_is_minted() {
    let response = create_router().oneshot(echo_request(None)).await.unwrap();

    let minted = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(minted).is_ok());
}

#[tokio::test]
async fn given_overlong_request_id_when_handling_then_it_is_replaced() {
    let overlong = "a".repeat(65);

    let response = create_router()
        .oneshot(echo_request(Some(&overlong)))
        .await
        .unwrap();

    let echoed = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
    assert_ne!(echoed, overlong);
    assert!(uuid::Uuid::parse_str(echoed).is_ok());
}

#[test]
fn given_ids_with_unsafe_characters_when_parsing_then_they_are_rejected() {
    assert!(RequestId::parse("").is_none());
    assert!(RequestId::parse("abc def").is_none());
    assert!(RequestId::parse("abc\"}{").is_none());
    assert!(RequestId::parse("ação").is_none());
    assert_eq!(
        RequestId::parse("trace_01.A-b").map(|id| id.as_str().to_string()),
        Some("trace_01.A-b".to_string())
    );
}

#[test]
fn given_non_utf8_header_when_reading_then_a_fresh_id_is_minted() {
    let mut headers = HeaderMap::new();
    headers.insert(
        REQUEST_ID_HEADER,
        HeaderValue::from_bytes(&[0xC3, 0xA7]).unwrap(),
    );

    let id = RequestId::from_headers(&headers);

    assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
}
