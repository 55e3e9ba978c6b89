use std::time::Duration;
use async_trait::async_trait;
use serde::{Serialize, Deserialize};
use reqwest::Client;
use log::error;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// DeepL client for interacting with the DeepL translation API
#[derive(Debug)]
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the free-tier API)
    endpoint: String,
}

/// DeepL translation request
#[derive(Debug, Serialize)]
pub struct DeepLRequest {
    /// Texts to translate
    text: Vec<String>,

    /// Target language code, upper-case
    target_lang: String,
}

/// DeepL translation response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One result per requested text
    pub translations: Vec<DeepLTranslation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// The translated text
    pub text: String,

    /// Language DeepL detected for the source text
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

impl DeepL {
    /// Create a new DeepL client
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

    // @returns: Full translate endpoint URL
    fn api_url(&self) -> String {
        if self.endpoint.is_empty() {
            "https://api-free.deepl.com/v2/translate".to_string()
        } else {
            format!("{}/v2/translate", self.endpoint.trim_end_matches('/'))
        }
    }
}

#[async_trait]
impl TranslationProvider for DeepL {
    fn name(&self) -> &str {
        "deepl"
    }

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        // DeepL expects upper-case target codes
        let target_lang = crate::language_utils::deepl_code(target_language)
            .unwrap_or_else(|_| target_language.to_uppercase());
        let request = DeepLRequest {
            text: vec![text.to_string()],
            target_lang,
        };

        let response = self.client.post(self.api_url())
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("DeepL request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(match status.as_u16() {
                401 | 403 => ProviderError::AuthenticationError(error_text),
                429 | 456 => ProviderError::RateLimitExceeded(error_text),
                code => ProviderError::ApiError { status_code: code, message: error_text },
            });
        }

        let deepl_response = response.json::<DeepLResponse>().await
            .map_err(|e| ProviderError::ParseError(format!("DeepL response: {}", e)))?;

        deepl_response.translations.into_iter().next()
            .map(|t| t.text)
            .ok_or_else(|| ProviderError::ParseError("DeepL returned no translations".to_string()))
    }
}
