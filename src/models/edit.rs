// Edit request and result types
// Author: kelexine (https://github.com/kelexine)

use crate::error::{EditError, Result};
use crate::vision::{parse_data_url, validate_image_size, EncodedImage, ImageFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One photo plus the change the user wants to see in it.
#[derive(Clone)]
pub struct EditRequest {
    /// Raw image bytes as uploaded.
    pub image_bytes: Vec<u8>,
    /// Declared content type of the image.
    pub mime_type: String,
    /// Free-text instruction, e.g. "make the bedding navy blue".
    pub prompt: String,
}

impl EditRequest {
    pub fn new(
        image_bytes: impl Into<Vec<u8>>,
        mime_type: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            image_bytes: image_bytes.into(),
            mime_type: mime_type.into(),
            prompt: prompt.into(),
        }
    }

    /// Read an image from disk.
    ///
    /// The content type comes from the file extension, falling back to the
    /// file's magic bytes.
    pub fn from_file(path: impl AsRef<Path>, prompt: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let image_bytes = std::fs::read(path).map_err(|e| {
            EditError::Encoding(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageFormat::from_extension)
            .or_else(|| ImageFormat::from_magic_bytes(&image_bytes))
            .ok_or_else(|| {
                EditError::InvalidRequest(format!(
                    "Unsupported image format: {} (expected PNG, JPEG or WEBP)",
                    path.display()
                ))
            })?;

        Ok(Self::new(image_bytes, format.mime_type(), prompt))
    }

    /// Check the request before anything is encoded or sent.
    ///
    /// Returns the image format; its canonical MIME type is what goes
    /// upstream, whatever spelling the caller declared.
    pub fn validate(&self) -> Result<ImageFormat> {
        if self.prompt.trim().is_empty() {
            return Err(EditError::InvalidRequest(
                "Please upload an image and provide a description of the changes.".to_string(),
            ));
        }
        let format = ImageFormat::from_mime_type(&self.mime_type).ok_or_else(|| {
            EditError::InvalidRequest(format!(
                "Unsupported image format: {} (expected image/png, image/jpeg or image/webp)",
                self.mime_type
            ))
        })?;
        validate_image_size(self.image_bytes.len()).map_err(EditError::InvalidRequest)?;
        Ok(format)
    }
}

// Image bytes are not useful in logs
impl std::fmt::Debug for EditRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditRequest")
            .field("image_bytes", &format_args!("{} bytes", self.image_bytes.len()))
            .field("mime_type", &self.mime_type)
            .field("prompt", &self.prompt)
            .finish()
    }
}

/// Normalized outcome of an edit.
///
/// At least one of the two fields is set whenever this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditedImageResult {
    /// `data:<mime>;base64,<payload>` URI of the edited photo.
    pub image_url: Option<String>,
    /// Explanation or commentary from the model.
    pub text: Option<String>,
    /// Set only when the prompt itself was refused.
    #[serde(skip)]
    blocked: bool,
}

/// Coarse classification of a result, used for metrics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Image,
    ImageWithText,
    Text,
    Blocked,
}

impl EditOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOutcome::Image => "image",
            EditOutcome::ImageWithText => "image_and_text",
            EditOutcome::Text => "text",
            EditOutcome::Blocked => "blocked",
        }
    }
}

impl EditedImageResult {
    pub fn new(image_url: Option<String>, text: Option<String>) -> Self {
        Self {
            image_url,
            text,
            blocked: false,
        }
    }

    /// Result for a prompt refused by content-safety policy.
    pub fn blocked(reason: &str) -> Self {
        Self {
            image_url: None,
            text: Some(format!(
                "Your request was blocked. Reason: {}. Please modify your image or prompt and try again.",
                reason
            )),
            blocked: true,
        }
    }

    /// Whether the prompt was refused before any generation.
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    pub fn outcome(&self) -> EditOutcome {
        if self.blocked {
            return EditOutcome::Blocked;
        }
        match (&self.image_url, &self.text) {
            (Some(_), Some(_)) => EditOutcome::ImageWithText,
            (Some(_), None) => EditOutcome::Image,
            (None, _) => EditOutcome::Text,
        }
    }

    /// The edited image, if one was produced.
    pub fn image(&self) -> Result<Option<EncodedImage>> {
        self.image_url.as_deref().map(parse_data_url).transpose()
    }
}
