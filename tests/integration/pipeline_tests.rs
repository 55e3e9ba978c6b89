/*!
 * End-to-end pipeline tests over temporary directories with mock providers
 */

use std::path::Path;
use std::sync::atomic::Ordering;

use mergecat::app_config::Config;
use mergecat::app_controller::{Controller, FileOutcome};
use mergecat::catalog::CatalogEntry;
use mergecat::catalog::Catalog;
use mergecat::catalog_store::CatalogStore;
use mergecat::file_utils::FileManager;
use mergecat::providers::mock::MockProvider;

use crate::common::{service_with, test_options, write_mo_fixture};

fn test_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.source_dir = dir.join("source");
    config.previous_dir = dir.join("previous");
    config.output_dir = dir.join("output");
    config
}

fn setup_dirs(config: &Config) {
    FileManager::ensure_dir(&config.source_dir).unwrap();
    FileManager::ensure_dir(&config.previous_dir).unwrap();
    FileManager::ensure_dir(&config.output_dir).unwrap();
}

#[tokio::test]
async fn test_process_file_withPreviousTranslation_shouldMergeTranslateAndPersist() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    setup_dirs(&config);

    let source_mo = config.source_dir.join("app.mo");
    write_mo_fixture(
        &source_mo,
        &[("Save", "Сохранить"), ("Cancel", "Отмена"), ("Digits", "123")],
    );
    write_mo_fixture(&config.previous_dir.join("app.mo"), &[("Save", "保存")]);

    let controller = Controller::with_config(config.clone()).unwrap();
    let service = service_with(
        Box::new(MockProvider::working("primary")),
        Box::new(MockProvider::working("secondary")),
        test_options(),
    );

    let outcome = controller.process_file(&source_mo, &service).await.unwrap();
    assert_eq!(outcome, FileOutcome::Translated);

    let output = CatalogStore::load_mo(config.output_dir.join("app.mo")).unwrap();
    // The previously-approved translation survived the merge untouched
    assert_eq!(output.get("Save").unwrap().msgstr, "保存");
    // The new entry was machine translated
    assert_eq!(output.get("Cancel").unwrap().msgstr, "[TRANSLATED]Отмена");
    // Text in neither script was left alone
    assert_eq!(output.get("Digits").unwrap().msgstr, "123");

    // The run-scoped intermediate was cleaned up
    assert!(!config.output_dir.join("merged_app.po").exists());
}

#[tokio::test]
async fn test_process_file_withExistingOutput_shouldSkipWithoutProviderCalls() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    setup_dirs(&config);

    let source_mo = config.source_dir.join("app.mo");
    write_mo_fixture(&source_mo, &[("Save", "Сохранить")]);
    write_mo_fixture(&config.output_dir.join("app.mo"), &[("Save", "old output")]);

    let primary = MockProvider::working("primary");
    let primary_calls = primary.call_counter();
    let controller = Controller::with_config(config.clone()).unwrap();
    let service = service_with(
        Box::new(primary),
        Box::new(MockProvider::working("secondary")),
        test_options(),
    );

    let outcome = controller.process_file(&source_mo, &service).await.unwrap();

    assert_eq!(outcome, FileOutcome::Skipped);
    assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
    // The existing output was not rewritten
    let output = CatalogStore::load_mo(config.output_dir.join("app.mo")).unwrap();
    assert_eq!(output.get("Save").unwrap().msgstr, "old output");
}

#[tokio::test]
async fn test_process_file_withCorruptSource_shouldCopyRawBytesThrough() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    setup_dirs(&config);

    let source_mo = config.source_dir.join("broken.mo");
    std::fs::write(&source_mo, b"this is not a catalog").unwrap();

    let controller = Controller::with_config(config.clone()).unwrap();
    let service = service_with(
        Box::new(MockProvider::working("primary")),
        Box::new(MockProvider::working("secondary")),
        test_options(),
    );

    let outcome = controller.process_file(&source_mo, &service).await.unwrap();

    assert_eq!(outcome, FileOutcome::CopiedRaw);
    let copied = std::fs::read(config.output_dir.join("broken.mo")).unwrap();
    assert_eq!(copied, b"this is not a catalog");
}

#[tokio::test]
async fn test_process_file_withTargetScriptEntries_shouldNeverCallProvider() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    setup_dirs(&config);

    let source_mo = config.source_dir.join("done.mo");
    write_mo_fixture(&source_mo, &[("Save", "保存"), ("Open", "打开"), ("Empty", "?empty?")]);

    let primary = MockProvider::working("primary");
    let primary_calls = primary.call_counter();
    let secondary = MockProvider::working("secondary");
    let secondary_calls = secondary.call_counter();

    let controller = Controller::with_config(config.clone()).unwrap();
    let service = service_with(Box::new(primary), Box::new(secondary), test_options());

    controller.process_file(&source_mo, &service).await.unwrap();

    assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
    assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);

    let output = CatalogStore::load_mo(config.output_dir.join("done.mo")).unwrap();
    assert_eq!(output.get("Save").unwrap().msgstr, "保存");
    assert_eq!(output.get("Empty").unwrap().msgstr, "?empty?");
}

#[tokio::test]
async fn test_process_file_withPlaceholders_shouldProtectThemThroughTranslation() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    setup_dirs(&config);

    let source_mo = config.source_dir.join("fmt.mo");
    write_mo_fixture(&source_mo, &[("greeting", "%(name) добрый день")]);

    // The mock rewrites the text but leaves the synthetic token alone,
    // the way a well-behaved provider treats markup
    let primary = MockProvider::working("primary")
        .with_custom_response(|text| text.replace("добрый день", "good day"));

    let controller = Controller::with_config(config.clone()).unwrap();
    let service = service_with(
        Box::new(primary),
        Box::new(MockProvider::working("secondary")),
        test_options(),
    );

    controller.process_file(&source_mo, &service).await.unwrap();

    let output = CatalogStore::load_mo(config.output_dir.join("fmt.mo")).unwrap();
    assert_eq!(output.get("greeting").unwrap().msgstr, "%(name) good day");
}

#[tokio::test]
async fn test_process_file_withPluralEntry_shouldTranslateEachFormIndependently() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    setup_dirs(&config);

    let source_mo = config.source_dir.join("plural.mo");
    let mut catalog = Catalog::new(source_mo.clone());
    catalog.push(CatalogEntry::new_plural(
        "%d file",
        "%d files",
        vec!["%d файл".to_string(), "已译 %d".to_string()],
    ));
    CatalogStore::save_mo(&catalog, &source_mo).unwrap();

    let controller = Controller::with_config(config.clone()).unwrap();
    let service = service_with(
        Box::new(MockProvider::working("primary")),
        Box::new(MockProvider::working("secondary")),
        test_options(),
    );

    controller.process_file(&source_mo, &service).await.unwrap();

    let output = CatalogStore::load_mo(config.output_dir.join("plural.mo")).unwrap();
    let entry = output.get("%d file").unwrap();
    // The Cyrillic form was translated, the already-translated form kept
    assert_eq!(entry.msgstr_plural[0], "[TRANSLATED]%d файл");
    assert_eq!(entry.msgstr_plural[1], "已译 %d");
}

#[tokio::test]
async fn test_process_file_withFailingProviders_shouldEmbedErrorMarker() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    setup_dirs(&config);

    let source_mo = config.source_dir.join("err.mo");
    write_mo_fixture(&source_mo, &[("Save", "Сохранить.")]);

    let controller = Controller::with_config(config.clone()).unwrap();
    let mut options = test_options();
    options.max_retries = 2;
    let service = service_with(
        Box::new(MockProvider::failing("primary")),
        Box::new(MockProvider::failing("secondary")),
        options,
    );

    let outcome = controller.process_file(&source_mo, &service).await.unwrap();

    // The failure is visible in the output, the run itself kept going
    assert_eq!(outcome, FileOutcome::Translated);
    let output = CatalogStore::load_mo(config.output_dir.join("err.mo")).unwrap();
    assert_eq!(
        output.get("Save").unwrap().msgstr,
        "[Error translating this part: Сохранить.]"
    );
}
