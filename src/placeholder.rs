use once_cell::sync::Lazy;
use regex::Regex;

// @module: Placeholder protection across translation round-trips

// @const: Named-parameter format expression, e.g. %(name)
static EXPRESSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%\(\w+\)").unwrap()
});

/// Mapping from synthetic token to original format expression, in textual order.
///
/// The map lives for a single translation call only.
pub type PlaceholderMap = Vec<(String, String)>;

/// Replace each format expression with a unique synthetic token.
///
/// Occurrences are numbered in order of appearance, so repeated identical
/// expressions each get their own token. Returns the original text and `None`
/// when nothing matched, which distinguishes "nothing to restore" from a map
/// that was fully reinserted.
pub fn extract(text: &str) -> (String, Option<PlaceholderMap>) {
    let mut placeholders = PlaceholderMap::new();
    let protected = EXPRESSION_REGEX.replace_all(text, |caps: &regex::Captures| {
        let token = format!("{{PLACEHOLDER_{}}}", placeholders.len());
        placeholders.push((token.clone(), caps[0].to_string()));
        token
    });

    if placeholders.is_empty() {
        (text.to_string(), None)
    } else {
        (protected.into_owned(), Some(placeholders))
    }
}

/// Put the original expressions back into translated text.
///
/// An absent map returns the input unchanged. Tokens the translation dropped
/// or altered are left in place rather than treated as an error; the lenient
/// behavior keeps a mangled token visible in the output instead of failing
/// the whole entry.
pub fn restore(translated_text: &str, placeholders: Option<&PlaceholderMap>) -> String {
    let Some(placeholders) = placeholders else {
        return translated_text.to_string();
    };

    let mut text = translated_text.to_string();
    for (token, expression) in placeholders {
        text = text.replace(token, expression);
    }
    text
}
