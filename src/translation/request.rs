// Request translation (edit request → Gemini)
// Author: kelexine (https://github.com/kelexine)

use crate::models::gemini::{
    Content, GenerateContentRequest, GenerationConfig, InlineData, Modality, Part,
};
use crate::vision::EncodedImage;
use tracing::debug;

/// Build the single-turn `generateContent` body for an edit.
///
/// The image goes first and the instruction second; both image and text
/// output are requested.
pub fn build_edit_request(image: &EncodedImage, prompt: &str) -> GenerateContentRequest {
    debug!(
        "Building edit request: mime_type={}, payload_len={}, prompt_len={}",
        image.mime_type,
        image.data.len(),
        prompt.len()
    );

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: image.mime_type.clone(),
                        data: image.data.clone(),
                    },
                },
                Part::Text {
                    text: prompt.to_string(),
                },
            ],
        }],
        generation_config: Some(GenerationConfig {
            response_modalities: vec![Modality::Image, Modality::Text],
        }),
    }
}
