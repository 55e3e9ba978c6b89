use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use log::{error, warn};

use crate::providers::TranslationProvider;
use crate::segmenter;

// @module: Chunked translation with provider fallback and retry

// @enum: Which provider handles the remaining attempts of one translate call
//
// The transition is one-way: once the primary provider fails, every later
// attempt of the same call, including later chunks, goes to the secondary.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ProviderState {
    UsingPrimary,
    UsingSecondary,
}

impl ProviderState {
    // @transitions: Primary to secondary, never back
    fn demote(&mut self) {
        *self = ProviderState::UsingSecondary;
    }
}

// @struct: Tunable service parameters
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    // @field: Target language code passed to providers
    pub target_language: String,

    // @field: Attempts per chunk before giving up
    pub max_retries: usize,

    // @field: Character limit per provider call
    pub max_chunk_chars: usize,

    // @field: Base backoff between attempts, multiplied by the attempt number
    pub retry_backoff_ms: u64,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            target_language: "zh".to_string(),
            max_retries: 5,
            max_chunk_chars: 999,
            retry_backoff_ms: 1000,
        }
    }
}

/// Translation service over a primary and a secondary provider.
///
/// Text is split into sentence-respecting chunks, each translated in order
/// and concatenated in order. A chunk whose attempts are all exhausted
/// becomes a visible inline error marker instead of silently disappearing.
/// The request counter is shared with the caller for end-of-run reporting.
pub struct TranslationService {
    // @field: Preferred provider
    primary: Box<dyn TranslationProvider>,

    // @field: Fallback provider after the primary fails
    secondary: Box<dyn TranslationProvider>,

    // @field: Service parameters
    options: TranslationOptions,

    // @field: Provider calls attempted, shared with the caller
    request_count: Arc<AtomicUsize>,
}

impl TranslationService {
    /// Create a new translation service
    ///
    /// The request counter is an explicit dependency so callers can report
    /// totals across services without hidden process-wide state.
    pub fn new(
        primary: Box<dyn TranslationProvider>,
        secondary: Box<dyn TranslationProvider>,
        options: TranslationOptions,
        request_count: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            primary,
            secondary,
            options,
            request_count,
        }
    }

    /// Provider calls attempted so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Translate text, chunking it to the provider length limit.
    ///
    /// Never fails at this level: untranslatable chunks come back as
    /// `[Error translating this part: ...]` markers so the degradation is
    /// visible in the output catalog.
    pub async fn translate(&self, text: &str) -> String {
        let chunks = segmenter::split(text, self.options.max_chunk_chars);

        // Demotion is sticky for the remainder of this call only
        let mut state = ProviderState::UsingPrimary;
        let mut translated_parts = Vec::with_capacity(chunks.len());

        for chunk in &chunks {
            translated_parts.push(self.translate_chunk(chunk, &mut state).await);
        }

        translated_parts.concat()
    }

    // @translates: One chunk with retry and fallback
    async fn translate_chunk(&self, chunk: &str, state: &mut ProviderState) -> String {
        for attempt in 1..=self.options.max_retries {
            let provider: &dyn TranslationProvider = match state {
                ProviderState::UsingPrimary => self.primary.as_ref(),
                ProviderState::UsingSecondary => self.secondary.as_ref(),
            };

            self.request_count.fetch_add(1, Ordering::SeqCst);
            match provider
                .translate(chunk, &self.options.target_language)
                .await
            {
                Ok(translated) => return translated,
                Err(e) => {
                    warn!(
                        "Translation failed on {} (attempt {}/{}): {}",
                        provider.name(),
                        attempt,
                        self.options.max_retries,
                        e
                    );

                    if *state == ProviderState::UsingPrimary {
                        warn!(
                            "Falling back to {} for the remaining attempts of this call",
                            self.secondary.name()
                        );
                        state.demote();
                    }

                    if attempt < self.options.max_retries && self.options.retry_backoff_ms > 0 {
                        let delay_ms = self.options.retry_backoff_ms * attempt as u64;
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    }
                }
            }
        }

        error!(
            "All {} translation attempts exhausted for chunk, emitting error marker",
            self.options.max_retries
        );
        format!("[Error translating this part: {}]", chunk)
    }
}
