use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module validates the configured language codes and converts them to
/// the forms the individual providers expect: DeepL wants upper-case
/// two-letter codes, the generic HTTP endpoint lower-case ones.
/// Normalize a language code to ISO 639-1 (2-letter) lower-case format
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    // If it's already a 2-letter code, validate it
    if normalized_code.len() == 2 {
        if Language::from_639_1(&normalized_code).is_some() {
            return Ok(normalized_code);
        }
    }
    // If it's a 3-letter code, try to find the corresponding 2-letter code
    else if normalized_code.len() == 3 {
        if let Some(lang) = Language::from_639_3(&normalized_code) {
            if let Some(code_639_1) = lang.to_639_1() {
                return Ok(code_639_1.to_string());
            }
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Language code in the form the DeepL API expects (upper-case 639-1)
pub fn deepl_code(code: &str) -> Result<String> {
    Ok(normalize_to_part1(code)?.to_uppercase())
}

/// Language code in the form the generic HTTP endpoint expects (lower-case 639-1)
pub fn http_endpoint_code(code: &str) -> Result<String> {
    normalize_to_part1(code)
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_to_part1(code)?;
    let lang = Language::from_639_1(&normalized)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", normalized))?;

    Ok(lang.to_name().to_string())
}
