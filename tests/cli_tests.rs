// One-shot edit command tests
// Author: kelexine (https://github.com/kelexine)

use mockito::Server;
use roomedit::cli::{run_edit, save_image, EditArgs};
use roomedit::config::GeminiConfig;
use roomedit::{EditedImageResult, ImageEditor};
use serde_json::json;

#[tokio::test]
async fn test_run_edit_saves_decoded_image() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.5-flash-image:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": {"parts": [
                        {"inlineData": {"mimeType": "image/jpeg", "data": "YmFy"}},
                        {"text": "Replaced the carpet."}
                    ]},
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let config = GeminiConfig {
        api_key: Some("test-key".to_string()),
        api_base_url: format!("{}/v1beta", server.url()),
        ..GeminiConfig::default()
    };
    let editor = ImageEditor::from_config(&config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("room.png");
    std::fs::write(&input, b"\x89PNG\r\n\x1a\nfake").unwrap();
    let output = dir.path().join("after.jpg");

    let args = EditArgs {
        image: input,
        prompt: "Replace the carpet with oak flooring".to_string(),
        output: Some(output.clone()),
        json: false,
    };
    let summary = run_edit(&editor, &args).await.unwrap();

    assert_eq!(summary.saved_to.as_deref(), Some(output.as_path()));
    assert_eq!(std::fs::read(&output).unwrap(), b"bar");
    assert_eq!(summary.result.text.as_deref(), Some("Replaced the carpet."));
    mock.assert_async().await;
}

#[test]
fn test_save_image_without_image_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("after.png");
    let result = EditedImageResult::blocked("SAFETY");

    let saved = save_image(&result, Some(&output)).unwrap();
    assert!(saved.is_none());
    assert!(!output.exists());
}
