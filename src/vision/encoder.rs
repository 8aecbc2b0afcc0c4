// Image encoding for inline transport
// Author: kelexine (https://github.com/kelexine)

use crate::error::{EditError, Result};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Base64 image payload paired with its MIME type.
///
/// `data` never carries a `data:` prefix; use [`EncodedImage::to_data_url`]
/// when a URI is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    /// Decode the payload back into raw bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| EditError::Encoding(format!("Invalid base64 image data: {}", e)))
    }

    /// Render as `data:<mime>;base64,<data>`.
    pub fn to_data_url(&self) -> String {
        data_url(&self.mime_type, &self.data)
    }
}

/// Encode raw image bytes for transport.
///
/// The MIME type is taken verbatim from the declared content type.
pub fn encode_image(bytes: &[u8], mime_type: &str) -> Result<EncodedImage> {
    let mime_type = mime_type.trim();
    if mime_type.is_empty() {
        return Err(EditError::Encoding(
            "Image has no declared content type.".to_string(),
        ));
    }

    let data = base64::engine::general_purpose::STANDARD.encode(bytes);
    if data.is_empty() {
        return Err(EditError::Encoding(
            "Invalid file format for Base64 conversion.".to_string(),
        ));
    }

    Ok(EncodedImage {
        mime_type: mime_type.to_string(),
        data,
    })
}

/// Assemble a data URI from a MIME type and an already-encoded payload.
pub fn data_url(mime_type: &str, base64_data: &str) -> String {
    format!("data:{};base64,{}", mime_type, base64_data)
}

/// Split a `data:<mime>;base64,<data>` URI back into its parts.
pub fn parse_data_url(url: &str) -> Result<EncodedImage> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| EditError::Encoding("Not a data URL".to_string()))?;

    // The payload is everything after the first comma
    let (header, data) = rest
        .split_once(',')
        .ok_or_else(|| EditError::Encoding("Data URL has no payload".to_string()))?;

    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| EditError::Encoding("Data URL is not base64 encoded".to_string()))?;

    if data.is_empty() {
        return Err(EditError::Encoding(
            "Invalid file format for Base64 conversion.".to_string(),
        ));
    }

    Ok(EncodedImage {
        mime_type: mime_type.to_string(),
        data: data.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_keeps_declared_mime_type() {
        let encoded = encode_image(b"foo", "image/png").unwrap();
        assert_eq!(encoded.mime_type, "image/png");
        assert_eq!(encoded.data, "Zm9v");
        assert!(!encoded.data.starts_with("data:"));
    }

    #[test]
    fn test_encode_empty_input_fails() {
        let err = encode_image(&[], "image/png").unwrap_err();
        assert!(matches!(err, EditError::Encoding(_)));
    }

    #[test]
    fn test_encode_missing_mime_type_fails() {
        let err = encode_image(b"foo", "  ").unwrap_err();
        assert!(matches!(err, EditError::Encoding(_)));
    }

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", "Zm9v"), "data:image/png;base64,Zm9v");
        let encoded = encode_image(b"foo", "image/jpeg").unwrap();
        assert_eq!(encoded.to_data_url(), "data:image/jpeg;base64,Zm9v");
    }

    #[test]
    fn test_parse_data_url() {
        let parsed = parse_data_url("data:image/webp;base64,Zm9v").unwrap();
        assert_eq!(parsed.mime_type, "image/webp");
        assert_eq!(parsed.decode().unwrap(), b"foo");
    }

    #[test]
    fn test_parse_data_url_rejects_malformed() {
        assert!(parse_data_url("image/png;base64,Zm9v").is_err());
        assert!(parse_data_url("data:image/png;base64").is_err());
        assert!(parse_data_url("data:image/png,Zm9v").is_err());
        assert!(parse_data_url("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_decode_invalid_base64() {
        let image = EncodedImage {
            mime_type: "image/png".to_string(),
            data: "not-valid-base64!!!".to_string(),
        };
        assert!(matches!(image.decode(), Err(EditError::Encoding(_))));
    }
}
