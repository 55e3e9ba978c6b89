use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::catalog::Catalog;
use crate::catalog_store::CatalogStore;
use crate::file_utils::FileManager;
use crate::placeholder;
use crate::policy::TranslationPolicy;
use crate::providers::deepl::DeepL;
use crate::providers::google::GoogleTranslate;
use crate::translation_service::{TranslationOptions, TranslationService};

// @module: Pipeline orchestration over catalog directories

/// How one catalog file left the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileOutcome {
    /// Output already existed, nothing done
    Skipped,
    /// Source catalog failed to load, raw bytes copied through unchanged
    CopiedRaw,
    /// Merged, translated, and persisted
    Translated,
}

/// Main application controller for the catalog merge-and-translate pipeline.
///
/// Each catalog file moves through skip check, merge with any previous
/// translation, per-entry translation, and binary persist. Intermediate
/// textual catalogs are removed on success and failure paths alike. A bad
/// file degrades visibly and the run continues; only output IO aborts a file.
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Per-entry skip rules
    policy: TranslationPolicy,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let policy = TranslationPolicy::new(
            config.policy.empty_marker.clone(),
            config.policy.exemptions.clone(),
            config.policy.source_script,
            config.policy.target_script,
        );

        Ok(Self { config, policy })
    }

    /// Build the translation service from the configured providers
    fn build_service(&self, request_count: Arc<AtomicUsize>) -> Result<TranslationService> {
        let translation = &self.config.translation;
        let primary = DeepL::new(
            translation.deepl.api_key.clone(),
            translation.deepl.endpoint.clone(),
        );
        let secondary = GoogleTranslate::new(
            translation.fallback.api_key.clone(),
            translation.fallback.endpoint.clone(),
        );

        let options = TranslationOptions {
            target_language: crate::language_utils::normalize_to_part1(
                &self.config.target_language,
            )?,
            max_retries: translation.max_retries,
            max_chunk_chars: translation.max_chunk_chars,
            retry_backoff_ms: translation.retry_backoff_ms,
        };

        Ok(TranslationService::new(
            Box::new(primary),
            Box::new(secondary),
            options,
            request_count,
        ))
    }

    /// Run the pipeline over every catalog in the source directory
    pub async fn run(&self) -> Result<()> {
        let start_time = std::time::Instant::now();

        self.config.validate()?;
        if !FileManager::dir_exists(&self.config.source_dir) {
            return Err(anyhow!(
                "Source directory does not exist: {:?}",
                self.config.source_dir
            ));
        }
        FileManager::ensure_dir(&self.config.output_dir)?;

        let files = FileManager::find_files(&self.config.source_dir, "mo")
            .with_context(|| format!("Failed to scan {:?}", self.config.source_dir))?;
        if files.is_empty() {
            warn!("No catalog files found in {:?}", self.config.source_dir);
            return Ok(());
        }
        info!("Processing {} catalog files", files.len());

        let request_count = Arc::new(AtomicUsize::new(0));
        let service = self.build_service(Arc::clone(&request_count))?;

        let progress_bar = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} catalogs ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));

        for file in &files {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            progress_bar.set_message(name.clone());

            match self.process_file(file, &service).await {
                Ok(FileOutcome::Skipped) => debug!("{}: output exists, skipped", name),
                Ok(FileOutcome::CopiedRaw) => warn!("{}: copied through without translation", name),
                Ok(FileOutcome::Translated) => debug!("{}: translated", name),
                Err(e) => error!("{}: failed: {:#}", name, e),
            }
            progress_bar.inc(1);
        }
        progress_bar.finish_and_clear();

        info!(
            "Completed in {:.1}s with {} provider requests",
            start_time.elapsed().as_secs_f64(),
            request_count.load(Ordering::SeqCst)
        );

        Ok(())
    }

    /// Process a single catalog file.
    ///
    /// An existing output wins immediately, making re-runs idempotent. A
    /// source that fails to parse is copied through byte-for-byte rather
    /// than aborting the run. The merged intermediate `.po` is removed
    /// whether translation succeeds or fails.
    pub async fn process_file(
        &self,
        mo_path: &Path,
        service: &TranslationService,
    ) -> Result<FileOutcome> {
        let file_name = mo_path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("Catalog path has no file name: {:?}", mo_path))?;
        let output_mo = self.config.output_dir.join(&file_name);

        if FileManager::file_exists(&output_mo) {
            return Ok(FileOutcome::Skipped);
        }

        let source_catalog = match CatalogStore::load_mo(mo_path) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(
                    "Failed to load {:?}, copying source through unchanged: {}",
                    mo_path, e
                );
                FileManager::copy_file(mo_path, &output_mo)?;
                return Ok(FileOutcome::CopiedRaw);
            }
        };

        let stem = mo_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let merged_po = self.config.output_dir.join(format!("merged_{}.po", stem));

        let result = self
            .merge_and_translate(source_catalog, &file_name, &merged_po, &output_mo, service)
            .await;

        // Intermediates go away on success and failure alike
        FileManager::remove_files(&[&merged_po]);

        result
    }

    // @runs: Merge, translate, persist for one loaded catalog
    async fn merge_and_translate(
        &self,
        source_catalog: Catalog,
        file_name: &Path,
        merged_po: &Path,
        output_mo: &Path,
        service: &TranslationService,
    ) -> Result<FileOutcome> {
        // Previously-approved translations win; source-only entries are appended
        let previous_mo = self.config.previous_dir.join(file_name);
        let mut merged = if FileManager::file_exists(&previous_mo) {
            match CatalogStore::load_mo(&previous_mo) {
                Ok(mut base) => {
                    let appended = base.merge_missing_from(&source_catalog);
                    debug!(
                        "Merged {:?}: {} entries kept, {} appended from source",
                        file_name,
                        base.len() - appended,
                        appended
                    );
                    base
                }
                Err(e) => {
                    warn!(
                        "Failed to load previous translation {:?}, using source only: {}",
                        previous_mo, e
                    );
                    source_catalog
                }
            }
        } else {
            source_catalog
        };

        // Inspection artifact, removed by the caller
        CatalogStore::save_po(&merged, merged_po)?;

        let translated = self.translate_entries(&mut merged, service).await;
        if translated > 0 {
            debug!("Translated {} strings in {:?}", translated, file_name);
        }

        CatalogStore::save_mo(&merged, output_mo)
            .with_context(|| format!("Failed to persist output catalog {:?}", output_mo))?;

        Ok(FileOutcome::Translated)
    }

    /// Translate every entry of the catalog in place, each plural form
    /// independently. Returns the number of strings rewritten.
    async fn translate_entries(
        &self,
        catalog: &mut Catalog,
        service: &TranslationService,
    ) -> usize {
        let mut translated = 0;

        for entry in catalog.entries_mut() {
            if entry.is_plural() {
                for form in entry.msgstr_plural.iter_mut() {
                    if let Some(new_text) = self.translate_text(form, service).await {
                        *form = new_text;
                        translated += 1;
                    }
                }
            } else if let Some(new_text) = self.translate_text(&entry.msgstr, service).await {
                entry.msgstr = new_text;
                translated += 1;
            }
        }

        translated
    }

    // @translates: One string if the policy requires it, placeholders protected
    async fn translate_text(&self, text: &str, service: &TranslationService) -> Option<String> {
        if !self.policy.needs_translation(text) {
            return None;
        }

        let (protected, placeholders) = placeholder::extract(text);
        let translated = service.translate(&protected).await;
        Some(placeholder::restore(&translated, placeholders.as_ref()))
    }
}
