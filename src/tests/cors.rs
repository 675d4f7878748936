use axum::body::Body;
use axum::http::header::ACCESS_CONTROL_ALLOW_ORIGIN;
use axum::http::header::ACCESS_CONTROL_REQUEST_METHOD;
use axum::http::header::ORIGIN;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use tower::Service;

use crate::tests::helper;

#[tokio::test]
async fn test_cors_preflight() {
    let mut app = helper::setup_test_app().await;

    // the default allow-list
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/friendships")
        .header(ORIGIN, "http://localhost:5173")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(
        Some("http://localhost:5173"),
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|header| header.to_str().ok())
    );
}

#[tokio::test]
async fn test_cors_unknown_origin() {
    let mut app = helper::setup_test_app().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/friendships")
        .header(ORIGIN, "http://evil.example.com")
        .header(ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();

    // not on the allow-list, no allow-origin header comes back
    assert!(response
        .headers()
        .get(ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
