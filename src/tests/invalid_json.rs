use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_invalid_json() {
    let mut app = helper::setup_test_app().await;

    // wrong field type
    let body = r#"{"message": 42}"#;
    let (status_code, _, error) =
        helper::maybe_create_friendship_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!("Data error".to_string(), error.error);
    assert!(error.description.is_some());

    // syntax error
    let body = r#"{"}"#;
    let (status_code, _, error) =
        helper::maybe_create_friendship_with_raw_body(&mut app, body, true).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!("JSON syntax error".to_string(), error.error);
    assert!(error.description.is_some());

    // missing content type
    let body = r"{}";
    let (status_code, _, error) =
        helper::maybe_create_friendship_with_raw_body(&mut app, body, false).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(error.is_some());
    let error = error.unwrap();
    assert_eq!(
        "Missing `application/json` content type".to_string(),
        error.error
    );
}
