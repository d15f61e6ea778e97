use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::ai::GenerativeService;
use crate::models::DEFAULT_BASE_URL;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Lightweight Gemini REST client.
///
/// The API key is supplied per call so that a missing credential is detected
/// when a solve runs rather than when the client is built.
pub struct GeminiHttpClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiHttpClient {
    pub fn new() -> Self {
        Self::new_with_client(Client::new())
    }

    pub fn new_with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Per-request timeout. Without one a hung transport blocks the caller.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Model IDs are used without the `models/` path prefix.
    fn bare_model(model: &str) -> &str {
        model.strip_prefix("models/").unwrap_or(model)
    }

    async fn post_to_url<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        url: String,
        api_key: &str,
        request: &Req,
    ) -> Result<Resp> {
        let mut builder = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!("Failed to send request to Gemini: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Gemini API error (status {}): {}", status, error_text);
            return Err(Error::AiProvider(format!(
                "Gemini API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse Gemini response: {}", e))
        })
    }
}

impl Default for GeminiHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeService for GeminiHttpClient {
    async fn generate_content(
        &self,
        api_key: &str,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String> {
        let model = Self::bare_model(model);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, model
        );
        tracing::debug!(
            "Sending generateContent request to Gemini (model: {}, parts: {})",
            model,
            request.contents.iter().map(|c| c.parts.len()).sum::<usize>()
        );

        let response: GenerateContentResponse = self.post_to_url(url, api_key, request).await?;

        if let Some(text) = response.text() {
            return Ok(text);
        }
        match (response.block_reason(), response.finish_reason()) {
            (Some(reason), _) => Err(Error::AiProvider(format!(
                "Gemini blocked the request: {}",
                reason
            ))),
            (None, Some(reason)) => Err(Error::AiProvider(format!(
                "No text in Gemini response (finish reason: {})",
                reason
            ))),
            (None, None) => Err(Error::AiProvider("No text in Gemini response".to_string())),
        }
    }
}
