// Gemini API client
// Author: kelexine (https://github.com/kelexine)

use crate::config::GeminiConfig;
use crate::error::{EditError, Result};
use crate::models::gemini::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::logging::sanitize;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, error};
use zeroize::Zeroizing;

/// Client for the Google Gemini `generateContent` API.
///
/// Authenticates with a single API key supplied through [`GeminiConfig`].
/// Every call is one HTTP request; nothing is retried.
pub struct GeminiClient {
    http_client: Client,
    api_key: Zeroizing<String>,
    api_base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a new Gemini client.
    ///
    /// Fails with [`EditError::Configuration`] when no API key is configured,
    /// so a missing credential surfaces before any request can be made.
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            EditError::Configuration("API_KEY environment variable is not set.".to_string())
        })?;

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls();

        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let http_client = builder.build().map_err(|e| {
            EditError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        debug!("Created HTTP client for {}", config.api_base_url);

        Ok(Self {
            http_client,
            api_key: Zeroizing::new(api_key.to_string()),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Model used for every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.api_base_url
    }

    fn generate_content_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base_url, self.model)
    }

    /// Call Gemini `generateContent` API.
    ///
    /// Transport failures, non-2xx statuses and unreadable bodies all come
    /// back as [`EditError::Adapter`] with the upstream message preserved.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.generate_content_url();
        debug!("Calling generateContent API for model: {}", self.model);

        let start = Instant::now();
        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                crate::metrics::record_gemini_call(&self.model, 0, start.elapsed().as_secs_f64());
                EditError::Adapter(sanitize(&e.to_string()))
            })?;

        let status = response.status();
        crate::metrics::record_gemini_call(
            &self.model,
            status.as_u16(),
            start.elapsed().as_secs_f64(),
        );

        if !status.is_success() {
            let error_text = sanitize(&response.text().await.unwrap_or_default());
            error!(
                "Gemini API error: HTTP {} - Response body: {}",
                status, error_text
            );

            let message = Self::extract_error_message(&error_text).or_else(|| {
                let trimmed = error_text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });

            return Err(match message {
                Some(message) => EditError::Adapter(format!("HTTP {}: {}", status.as_u16(), message)),
                None => EditError::unknown_adapter(),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| EditError::Adapter(format!("Failed to read response body: {}", e)))?;

        debug!(
            "Raw Gemini response (first 500 chars): {}",
            response_text.chars().take(500).collect::<String>()
        );

        serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            EditError::Adapter(format!("Response parsing error: {}", e))
        })
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            status: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.status);
            }
        }
        None
    }
}
