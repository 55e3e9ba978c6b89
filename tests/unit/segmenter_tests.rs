/*!
 * Tests for sentence-respecting text segmentation
 */

use mergecat::segmenter::split;

#[test]
fn test_split_withVariedInputs_shouldAlwaysReconstructExactly() {
    let inputs = [
        "",
        "no terminal punctuation at all",
        "One. Two. Three.",
        "Mixed! Full-width。 And half？ tail",
        "Многоточие... и еще. Вопрос? Да!",
    ];

    for text in inputs {
        for max_chars in [1, 5, 10, 100] {
            let chunks = split(text, max_chars);
            assert_eq!(chunks.concat(), text, "input {:?} limit {}", text, max_chars);
        }
    }
}

#[test]
fn test_split_withGenerousLimit_shouldReturnSingleChunk() {
    let text = "First. Second. Third.";
    let chunks = split(text, 1000);
    assert_eq!(chunks, vec![text.to_string()]);
}

#[test]
fn test_split_withTightLimit_shouldBoundEveryNormalChunk() {
    let text = "One. Two. Three. Four. Five. Six. Seven.";
    let max_chars = 12;
    let chunks = split(text, max_chars);

    assert_eq!(chunks.concat(), text);
    for chunk in &chunks {
        // Every chunk respects the limit here, no sentence exceeds it alone
        assert!(chunk.chars().count() <= max_chars, "chunk too long: {:?}", chunk);
    }
}

#[test]
fn test_split_withOversizedSentence_shouldNotForceSplit() {
    let oversized = format!("{}.", "x".repeat(30));
    let text = format!("Ok. {}Done.", oversized);
    let chunks = split(&text, 10);

    assert_eq!(chunks.concat(), text);
    // Only the single oversized sentence may exceed the limit
    let over: Vec<&String> = chunks.iter().filter(|c| c.chars().count() > 10).collect();
    assert_eq!(over.len(), 1);
    assert!(over[0].contains(&oversized));
}

#[test]
fn test_split_withEmptyText_shouldReturnNoChunks() {
    assert!(split("", 10).is_empty());
}

#[test]
fn test_split_shouldKeepPunctuationAttachedToSentence() {
    let chunks = split("Да! Нет?", 3);
    assert_eq!(chunks, vec!["Да!", " Нет?"]);
}
