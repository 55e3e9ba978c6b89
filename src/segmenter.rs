// @module: Sentence-respecting text segmentation for length-limited providers

// @const: Terminal punctuation that closes a sentence, half- and full-width
const SENTENCE_TERMINATORS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

/// Split text into chunks no longer than `max_chars` characters, respecting
/// sentence boundaries.
///
/// Sentences end at terminal punctuation, which stays attached to the
/// preceding sentence. Sentences accumulate greedily into the current chunk;
/// one that would push a non-empty chunk over the limit closes it and starts
/// the next. A single sentence longer than `max_chars` is kept intact as its
/// own oversized chunk rather than being split mid-sentence.
///
/// Concatenating the returned chunks in order reproduces the input exactly.
pub fn split(text: &str, max_chars: usize) -> Vec<String> {
    let sentences = split_sentences(text);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for sentence in sentences {
        let sentence_chars = sentence.chars().count();
        if current_chars + sentence_chars > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current.push_str(&sentence);
        current_chars += sentence_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

// @returns: Sentence units with their terminators attached, concatenating to the input
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for c in text.chars() {
        current.push(c);
        if SENTENCE_TERMINATORS.contains(&c) {
            sentences.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}
