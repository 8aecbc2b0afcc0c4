// HTTP API tests
// Author: kelexine (https://github.com/kelexine)

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mockito::{Matcher, Server, ServerGuard};
use roomedit::config::AppConfig;
use roomedit::server::create_router;
use roomedit::ImageEditor;
use serde_json::{json, Value};
use tower::ServiceExt;

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";
const BOUNDARY: &str = "roomedit-test-boundary";

fn test_config(server: &ServerGuard) -> AppConfig {
    let mut config = AppConfig::default();
    config.gemini.api_key = Some("test-key".to_string());
    config.gemini.api_base_url = format!("{}/v1beta", server.url());
    config
}

fn router_with(config: AppConfig) -> Router {
    let editor = ImageEditor::from_config(&config.gemini).unwrap();
    create_router(config, editor)
}

fn app_for(server: &ServerGuard) -> Router {
    router_with(test_config(server))
}

/// (name, file name, content type, data)
type FormPart<'a> = (&'a str, Option<&'a str>, Option<&'a str>, &'a [u8]);

fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content_type, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", name).as_bytes(),
            ),
        }
        if let Some(content_type) = content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn edit_request(parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/edits")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn edit_request_with_length(parts: &[FormPart<'_>]) -> Request<Body> {
    let body = multipart_body(parts);
    Request::builder()
        .method("POST")
        .uri("/v1/edits")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header("content-length", body.len())
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_edit_endpoint_returns_result() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_body(Matcher::Regex(r#""mimeType":"image/png""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": {"parts": [
                        {"inlineData": {"mimeType": "image/png", "data": "Zm9v"}},
                        {"text": "Added a reading chair."}
                    ]},
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let response = app_for(&server)
        .oneshot(edit_request(&[
            ("prompt", None, None, b"Add a reading chair"),
            ("image", Some("room.png"), Some("image/png"), b"foo"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let body = json_body(response).await;
    assert_eq!(body["imageUrl"], "data:image/png;base64,Zm9v");
    assert_eq!(body["text"], "Added a reading chair.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_edit_endpoint_infers_type_from_file_name() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_body(Matcher::Regex(r#""mimeType":"image/webp""#.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"promptFeedback": {"blockReason": "OTHER"}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let response = app_for(&server)
        .oneshot(edit_request(&[
            ("image", Some("suite.webp"), None, b"foo"),
            ("prompt", None, None, b"Remove the TV"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["imageUrl"].is_null());
    assert!(body["text"].as_str().unwrap().contains("OTHER"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_edit_endpoint_requires_prompt() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let response = app_for(&server)
        .oneshot(edit_request(&[(
            "image",
            Some("room.png"),
            Some("image/png"),
            b"foo",
        )]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["type"], "error");
    assert_eq!(body["error"]["type"], "invalid_request_error");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_edit_endpoint_rejects_unsupported_type() {
    let server = Server::new_async().await;

    let response = app_for(&server)
        .oneshot(edit_request(&[
            ("image", Some("room.gif"), Some("image/gif"), b"GIF89a"),
            ("prompt", None, None, b"Add a lamp"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversize_upload_is_json_invalid_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = test_config(&server);
    config.server.max_upload_bytes = 1024;
    let image = vec![0u8; 4096];

    let requests = [
        edit_request_with_length(&[
            ("prompt", None, None, b"Add a lamp"),
            ("image", Some("room.png"), Some("image/png"), &image),
        ]),
        edit_request(&[
            ("prompt", None, None, b"Add a lamp"),
            ("image", Some("room.png"), Some("image/png"), &image),
        ]),
    ];

    for request in requests {
        let response = router_with(config.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["type"], "error");
        assert_eq!(body["error"]["type"], "invalid_request_error");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_edit_endpoint_maps_upstream_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(500)
        .with_body(json!({"error": {"message": "Internal error encountered."}}).to_string())
        .expect(1)
        .create_async()
        .await;

    let response = app_for(&server)
        .oneshot(edit_request(&[
            ("image", Some("room.jpg"), Some("image/jpeg"), b"foo"),
            ("prompt", None, None, b"Add a lamp"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "api_error");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate image: "));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_edit_endpoint_maps_protocol_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"candidates": []}).to_string())
        .expect(1)
        .create_async()
        .await;

    let response = app_for(&server)
        .oneshot(edit_request(&[
            ("image", Some("room.jpg"), Some("image/jpeg"), b"foo"),
            ("prompt", None, None, b"Add a lamp"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"]["type"], "protocol_error");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = Server::new_async().await;

    let response = app_for(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["credential"]["status"], "ok");
    assert!(body["checks"]["configuration"]["message"]
        .as_str()
        .unwrap()
        .contains("gemini-2.5-flash-image"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let server = Server::new_async().await;

    let response = app_for(&server)
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
}
