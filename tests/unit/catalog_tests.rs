/*!
 * Tests for the catalog data model and merge semantics
 */

use std::path::PathBuf;

use mergecat::catalog::{Catalog, CatalogEntry};

use crate::common::catalog_from_pairs;

#[test]
fn test_merge_withExistingEntry_shouldKeepBaseTranslation() {
    let mut base = catalog_from_pairs(&[("Save", "保存")]);
    let incoming = catalog_from_pairs(&[("Save", "Сохранить"), ("Cancel", "Отмена")]);

    let appended = base.merge_missing_from(&incoming);

    assert_eq!(appended, 1);
    assert_eq!(base.get("Save").unwrap().msgstr, "保存");
    assert_eq!(base.get("Cancel").unwrap().msgstr, "Отмена");
    assert_eq!(base.len(), 2);
}

#[test]
fn test_merge_withSameIncomingTwice_shouldBeIdempotent() {
    let mut base = catalog_from_pairs(&[("Save", "保存")]);
    let incoming = catalog_from_pairs(&[("Save", "x"), ("Cancel", "y"), ("Open", "z")]);

    base.merge_missing_from(&incoming);
    let len_after_first = base.len();
    let appended_second = base.merge_missing_from(&incoming);

    assert_eq!(appended_second, 0);
    assert_eq!(base.len(), len_after_first);
}

#[test]
fn test_merge_withEmptyBase_shouldAppendAllInOrder() {
    let mut base = Catalog::new(PathBuf::from("empty.po"));
    let incoming = catalog_from_pairs(&[("a", "1"), ("b", "2"), ("c", "3")]);

    let appended = base.merge_missing_from(&incoming);

    assert_eq!(appended, 3);
    let msgids: Vec<&str> = base.entries().iter().map(|e| e.msgid.as_str()).collect();
    assert_eq!(msgids, vec!["a", "b", "c"]);
}

#[test]
fn test_merge_withPluralEntry_shouldCarryAllForms() {
    let mut base = Catalog::new(PathBuf::from("base.po"));
    let mut incoming = Catalog::new(PathBuf::from("incoming.po"));
    incoming.push(CatalogEntry::new_plural(
        "%d file",
        "%d files",
        vec!["%d файл".to_string(), "%d файла".to_string(), "%d файлов".to_string()],
    ));

    base.merge_missing_from(&incoming);

    let entry = base.get("%d file").unwrap();
    assert!(entry.is_plural());
    assert_eq!(entry.msgstr_plural.len(), 3);
}

#[test]
fn test_get_withDuplicateMsgid_shouldReturnFirstMatch() {
    let mut catalog = Catalog::new(PathBuf::from("dup.po"));
    catalog.push(CatalogEntry::new("key", "first"));
    catalog.push(CatalogEntry::new("key", "second"));

    // First match wins; the duplicate is kept only in entry order
    assert_eq!(catalog.get("key").unwrap().msgstr, "first");
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_is_metadata_withEmptyMsgid_shouldBeTrue() {
    let header = CatalogEntry::new("", "Content-Type: text/plain; charset=UTF-8\n");
    assert!(header.is_metadata());
    assert!(!CatalogEntry::new("Save", "").is_metadata());
}
