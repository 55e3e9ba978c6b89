use serde::{Deserialize, Serialize};

// @module: Unicode script range predicates for translation decisions

/// A writing script identified by Unicode code-point ranges.
///
/// The translation policy treats these as pluggable predicates: one script
/// marks text still awaiting conversion, another marks text that already
/// reached the target language.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    /// Cyrillic letters, the intermediate source script
    #[default]
    Cyrillic,
    /// CJK unified ideographs including extension A, the target script
    Cjk,
}

impl Script {
    // @checks: Whether a single char belongs to the script
    pub fn contains(&self, c: char) -> bool {
        match self {
            Script::Cyrillic => ('\u{0400}'..='\u{04FF}').contains(&c),
            Script::Cjk => {
                ('\u{4E00}'..='\u{9FFF}').contains(&c) || ('\u{3400}'..='\u{4DBF}').contains(&c)
            }
        }
    }

    // @checks: Whether any char of the text belongs to the script
    pub fn contains_any(&self, text: &str) -> bool {
        text.chars().any(|c| self.contains(c))
    }

    // @returns: Capitalized script name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Cyrillic => "Cyrillic",
            Self::Cjk => "CJK",
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
