/*!
 * Tests for placeholder protection across translation round-trips
 */

use mergecat::placeholder::{extract, restore};

#[test]
fn test_extract_withNamedExpression_shouldProtectAndMap() {
    let (protected, map) = extract("%(name) добрый день");

    assert_eq!(protected, "{PLACEHOLDER_0} добрый день");
    let map = map.expect("expression should produce a map");
    assert_eq!(map.len(), 1);
    assert_eq!(map[0].0, "{PLACEHOLDER_0}");
    assert_eq!(map[0].1, "%(name)");
}

#[test]
fn test_restore_withMockedTranslation_shouldReinsertExpression() {
    let (_, map) = extract("%(name) добрый день");
    // A provider translated the protected text, leaving the token alone
    let translated = "{PLACEHOLDER_0} good day";
    assert_eq!(restore(translated, map.as_ref()), "%(name) good day");
}

#[test]
fn test_roundtrip_withIdentityTransform_shouldReturnOriginal() {
    let original = "%(user) sent %(count) files to %(user)";
    let (protected, map) = extract(original);
    assert_eq!(restore(&protected, map.as_ref()), original);
}

#[test]
fn test_extract_withMultipleExpressions_shouldNumberInTextualOrder() {
    let (protected, map) = extract("%(b) then %(a)");
    assert_eq!(protected, "{PLACEHOLDER_0} then {PLACEHOLDER_1}");
    let map = map.unwrap();
    assert_eq!(map[0].1, "%(b)");
    assert_eq!(map[1].1, "%(a)");
}

#[test]
fn test_extract_withoutExpressions_shouldReturnAbsentMap() {
    let (text, map) = extract("добрый день");
    assert_eq!(text, "добрый день");
    assert!(map.is_none());
}

#[test]
fn test_restore_withAbsentMap_shouldReturnInputUnchanged() {
    assert_eq!(restore("translated text", None), "translated text");
}
