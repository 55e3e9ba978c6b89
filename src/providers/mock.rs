/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Always succeeds with marked-up text
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::failing_first(n)` - Fails the first n calls, then succeeds
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a marked-up translation
    Working,
    /// Always fails with an error
    Failing,
    /// Fails the first N calls, then succeeds
    FailingFirst {
        /// Number of leading calls that fail
        count: usize
    },
}

/// Mock provider for testing translation behavior
#[derive(Debug)]
pub struct MockProvider {
    /// Provider name reported to the service
    name: String,
    /// Behavior mode
    behavior: MockBehavior,
    /// Number of translate calls received
    call_count: Arc<AtomicUsize>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str) -> String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(name: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            name: name.into(),
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working(name: impl Into<String>) -> Self {
        Self::new(name, MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing(name: impl Into<String>) -> Self {
        Self::new(name, MockBehavior::Failing)
    }

    /// Create a mock that fails its first `count` calls, then succeeds
    pub fn failing_first(name: impl Into<String>, count: usize) -> Self {
        Self::new(name, MockBehavior::FailingFirst { count })
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Handle for reading the call count after the provider is boxed
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }

    // @returns: The successful response for a text
    fn respond(&self, text: &str) -> String {
        match self.custom_response {
            Some(generator) => generator(text),
            None => format!("[TRANSLATED]{}", text),
        }
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        text: &str,
        _target_language: &str,
    ) -> Result<String, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(text)),
            MockBehavior::Failing => Err(ProviderError::RequestFailed(format!(
                "{} is configured to fail",
                self.name
            ))),
            MockBehavior::FailingFirst { count } => {
                if call < count {
                    Err(ProviderError::RequestFailed(format!(
                        "{} failing call {} of {}",
                        self.name,
                        call + 1,
                        count
                    )))
                } else {
                    Ok(self.respond(text))
                }
            }
        }
    }
}
