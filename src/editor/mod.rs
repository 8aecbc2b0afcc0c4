//! The edit adapter: photo + instruction in, normalized result out.
//!
//! [`ImageEditor`] validates and encodes the caller's image, sends exactly one
//! `generateContent` request and normalizes whatever comes back. It keeps no
//! state between calls, so one instance can serve any number of concurrent
//! callers.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::GeminiConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::models::edit::{EditRequest, EditedImageResult};
use crate::translation::{build_edit_request, normalize_response};
use crate::vision::encode_image;
use std::path::Path;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};

/// Edits photos through the Gemini image model.
pub struct ImageEditor {
    client: GeminiClient,
}

impl ImageEditor {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Build the editor straight from configuration.
    ///
    /// Fails with a configuration error when the credential is missing.
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        Ok(Self::new(GeminiClient::new(config)?))
    }

    /// Model used for edits
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Apply the requested change to the photo.
    ///
    /// A prompt blocked by content policy is returned as `Ok` with only
    /// `text` set. Every error is logged before it is returned.
    pub async fn edit(&self, request: &EditRequest) -> Result<EditedImageResult> {
        let edit_id = uuid::Uuid::new_v4().simple().to_string();
        let span = info_span!("edit", id = %edit_id, model = %self.client.model());

        async {
            let start = Instant::now();
            let result = self.edit_inner(request).await;
            let elapsed = start.elapsed().as_secs_f64();

            match &result {
                Ok(edited) => {
                    let outcome = edited.outcome();
                    info!("Edit finished: outcome={}, took {:.2}s", outcome.as_str(), elapsed);
                    crate::metrics::record_edit(outcome.as_str(), elapsed);
                }
                Err(e) => {
                    error!("Error calling Gemini API: {}", e);
                    crate::metrics::record_edit("error", elapsed);
                }
            }

            result
        }
        .instrument(span)
        .await
    }

    /// Convenience for callers holding a file path rather than bytes.
    pub async fn edit_file(
        &self,
        path: impl AsRef<Path>,
        prompt: impl Into<String>,
    ) -> Result<EditedImageResult> {
        let request = EditRequest::from_file(path, prompt)?;
        self.edit(&request).await
    }

    async fn edit_inner(&self, request: &EditRequest) -> Result<EditedImageResult> {
        let format = request.validate()?;

        // 1. Encode the photo
        let encoded = encode_image(&request.image_bytes, format.mime_type())?;

        // 2. One generateContent call
        let gemini_request = build_edit_request(&encoded, &request.prompt);
        let response = self.client.generate_content(&gemini_request).await?;

        // 3. Normalize the response shape
        normalize_response(response)
    }
}
