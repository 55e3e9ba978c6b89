use std::time::Duration;
use async_trait::async_trait;
use serde::Deserialize;
use reqwest::Client;
use url::Url;
use log::error;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Client for a generic HTTP translation endpoint in the Google Cloud
/// Translation v2 shape: API key and text go in query parameters, the
/// translated text comes back under `data.translations`.
#[derive(Debug)]
pub struct GoogleTranslate {
    /// HTTP client for API requests
    client: Client,
    /// API key passed as the `key` query parameter
    api_key: String,
    /// Endpoint URL (optional, defaults to the public v2 endpoint)
    endpoint: String,
}

/// Top-level response wrapper
#[derive(Debug, Deserialize)]
pub struct GoogleResponse {
    /// Response payload
    pub data: GoogleData,
}

/// Response payload holding the translations
#[derive(Debug, Deserialize)]
pub struct GoogleData {
    /// One result per requested text
    pub translations: Vec<GoogleTranslation>,
}

/// Individual translation result
#[derive(Debug, Deserialize)]
pub struct GoogleTranslation {
    /// The translated text
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

impl GoogleTranslate {
    /// Create a new client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    // @returns: Request URL with key, text, and target language query parameters
    fn build_url(&self, text: &str, target_language: &str) -> Result<Url, ProviderError> {
        let base = if self.endpoint.is_empty() {
            "https://translation.googleapis.com/language/translate/v2"
        } else {
            self.endpoint.as_str()
        };

        Url::parse_with_params(
            base,
            &[
                ("key", self.api_key.as_str()),
                ("q", text),
                ("target", target_language),
            ],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint URL: {}", e)))
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        // The endpoint expects lower-case target codes
        let target = crate::language_utils::http_endpoint_code(target_language)
            .unwrap_or_else(|_| target_language.to_lowercase());
        let url = self.build_url(text, &target)?;

        let response = self.client.post(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Translation request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation endpoint error ({}): {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(error_text),
                429 => ProviderError::RateLimitExceeded(error_text),
                code => ProviderError::ApiError { status_code: code, message: error_text },
            });
        }

        let google_response = response.json::<GoogleResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("Translation response: {}", e)))?;

        google_response.data.translations.into_iter().next()
            .map(|t| t.translated_text)
            .ok_or_else(|| {
                ProviderError::ParseError("Translation endpoint returned no translations".to_string())
            })
    }
}
