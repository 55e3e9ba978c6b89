use crate::script::Script;

// @module: Per-entry decision whether text requires translation

/// Decides whether a catalog string needs a translation call.
///
/// The sentinel, exemption markers, and script predicates are all injected so
/// the rules stay testable in isolation and configurable per deployment.
#[derive(Debug, Clone)]
pub struct TranslationPolicy {
    // @field: Sentinel marking a deliberately empty string
    empty_marker: String,

    // @field: Substrings exempting identifier-like values from translation
    exemptions: Vec<String>,

    // @field: Script of text still awaiting conversion
    source_script: Script,

    // @field: Script of text already translated
    target_script: Script,
}

impl TranslationPolicy {
    pub fn new(
        empty_marker: impl Into<String>,
        exemptions: Vec<String>,
        source_script: Script,
        target_script: Script,
    ) -> Self {
        TranslationPolicy {
            empty_marker: empty_marker.into(),
            exemptions,
            source_script,
            target_script,
        }
    }

    /// Whether `text` should be sent to a translation provider.
    ///
    /// Skips the empty-marker sentinel, exempted identifier-like values, and
    /// anything already containing target-script characters, since
    /// re-translating good text would corrupt it. Only text containing
    /// source-script characters needs conversion; text in neither script
    /// (digits, punctuation) is left untouched.
    pub fn needs_translation(&self, text: &str) -> bool {
        if text == self.empty_marker {
            return false;
        }

        if self.exemptions.iter().any(|marker| text.contains(marker)) {
            return false;
        }

        if self.target_script.contains_any(text) {
            return false;
        }

        self.source_script.contains_any(text)
    }
}

impl Default for TranslationPolicy {
    fn default() -> Self {
        TranslationPolicy {
            empty_marker: "?empty?".to_string(),
            exemptions: vec!["Obj. ".to_string()],
            source_script: Script::Cyrillic,
            target_script: Script::Cjk,
        }
    }
}
