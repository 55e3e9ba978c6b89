/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported machine
 * translation backends:
 * - DeepL: DeepL REST API
 * - Google: generic HTTP translation endpoint in the Google Translate v2 shape
 * - Mock: configurable in-memory provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing the translation service to treat primary and secondary providers
/// interchangeably.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Short provider name for logging
    fn name(&self) -> &str;

    /// Translate a piece of text into the target language
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target_language` - Language code in the provider's expected form
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The translated text or an error
    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, ProviderError>;
}

pub mod deepl;
pub mod google;
pub mod mock;
