// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use crate::error::EditError;
use crate::models::edit::{EditRequest, EditedImageResult};
use crate::vision::ImageFormat;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // The editor cannot exist without a key, but the config may still be inspected
    let credential_check = if state.config.gemini.api_key().is_some() {
        HealthCheck {
            status: "ok".to_string(),
            message: "API key configured".to_string(),
        }
    } else {
        overall_status = HealthStatus::Unhealthy;
        HealthCheck {
            status: "error".to_string(),
            message: "API key missing".to_string(),
        }
    };
    checks.insert("credential".to_string(), credential_check);

    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "Model: {}, API base: {}",
            state.editor.model(),
            state.config.gemini.api_base_url
        ),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Handler for /metrics (Prometheus text format)
pub async fn metrics_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        crate::metrics::gather_metrics(),
    )
}

/// Image file as received in the `image` form field
struct UploadedImage {
    data: Bytes,
    content_type: Option<String>,
    file_name: Option<String>,
}

/// Handler for /v1/edits
///
/// Expects `multipart/form-data` with an `image` file field and a `prompt`
/// text field; answers with the normalized edit result.
pub async fn edit_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EditedImageResult>, EditError> {
    let mut image: Option<UploadedImage> = None;
    let mut prompt: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| EditError::InvalidRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("image") => {
                let content_type = field.content_type().map(str::to_string);
                let file_name = field.file_name().map(str::to_string);
                let data = field.bytes().await.map_err(|e| {
                    EditError::InvalidRequest(format!("Failed to read image upload: {}", e))
                })?;
                image = Some(UploadedImage {
                    data,
                    content_type,
                    file_name,
                });
            }
            Some("prompt") => {
                let text = field.text().await.map_err(|e| {
                    EditError::InvalidRequest(format!("Failed to read prompt: {}", e))
                })?;
                prompt = Some(text);
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let (image, prompt) = match (image, prompt) {
        (Some(image), Some(prompt)) => (image, prompt),
        _ => {
            return Err(EditError::InvalidRequest(
                "Please upload an image and provide a description of the changes.".to_string(),
            ))
        }
    };

    let mime_type = resolve_mime_type(
        image.content_type.as_deref(),
        image.file_name.as_deref(),
        &image.data,
    )
    .ok_or_else(|| {
        EditError::InvalidRequest(
            "Could not determine the image type (expected PNG, JPEG or WEBP)".to_string(),
        )
    })?;

    info!(
        "Received edit request: mime_type={}, size={} bytes, file={:?}",
        mime_type,
        image.data.len(),
        image.file_name
    );

    let request = EditRequest::new(image.data.to_vec(), mime_type, prompt);
    let result = state.editor.edit(&request).await?;
    Ok(Json(result))
}

/// Declared content type wins; generic or missing types fall back to the
/// file name, then to the magic bytes.
fn resolve_mime_type(
    content_type: Option<&str>,
    file_name: Option<&str>,
    data: &[u8],
) -> Option<String> {
    let declared = content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream");
    if let Some(ct) = declared {
        return Some(ct.to_string());
    }

    file_name
        .and_then(|name| name.rsplit_once('.'))
        .and_then(|(_, ext)| ImageFormat::from_extension(ext))
        .or_else(|| ImageFormat::from_magic_bytes(data))
        .map(|format| format.mime_type().to_string())
}
