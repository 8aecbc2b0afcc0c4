// Error types for roomedit
// Author: kelexine (https://github.com/kelexine)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Generic message used when the upstream fails without telling us why.
pub const UNKNOWN_ADAPTER_ERROR: &str =
    "An unknown error occurred while communicating with the Gemini API.";

#[derive(Error, Debug)]
pub enum EditError {
    /// Missing credential or unusable settings. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The input image could not be turned into a transport payload.
    #[error("Image encoding failed: {0}")]
    Encoding(String),

    /// The Gemini API answered with a shape we cannot read as success.
    #[error("Unexpected Gemini response: {0}")]
    Protocol(String),

    /// Transport or API failure; the original message is preserved.
    #[error("Failed to generate image: {0}")]
    Adapter(String),

    /// Caller input rejected before anything was sent upstream.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl EditError {
    /// Adapter error for upstream failures that carry no usable message.
    pub fn unknown_adapter() -> Self {
        EditError::Adapter(UNKNOWN_ADAPTER_ERROR.to_string())
    }

    /// Short machine-readable kind, used in API error bodies and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            EditError::Configuration(_) | EditError::ConfigParsing(_) => "configuration_error",
            EditError::Encoding(_) => "encoding_error",
            EditError::Protocol(_) => "protocol_error",
            EditError::Adapter(_) => "api_error",
            EditError::InvalidRequest(_) => "invalid_request_error",
            EditError::Io(_) | EditError::Json(_) => "internal_error",
        }
    }
}

// Convert EditError to HTTP responses for Axum
impl IntoResponse for EditError {
    fn into_response(self) -> Response {
        let status = match self {
            EditError::InvalidRequest(_) | EditError::Encoding(_) => StatusCode::BAD_REQUEST,
            EditError::Protocol(_) | EditError::Adapter(_) => StatusCode::BAD_GATEWAY,
            EditError::Configuration(_)
            | EditError::ConfigParsing(_)
            | EditError::Io(_)
            | EditError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({
            "type": "error",
            "error": {
                "type": self.kind(),
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, EditError>;
