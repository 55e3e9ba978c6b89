use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use crate::catalog::{Catalog, CatalogEntry};
use crate::catalog_store::CatalogStore;
use crate::file_utils::FileManager;

// @module: Read-only audit pass over previously-produced catalogs

/// Scans produced catalogs for suspect characters or strings and copies
/// matches, plus their upstream source catalog, to a review folder.
///
/// The scanned folder and the source folder are never written to; all output
/// lands in the review directory as textual PO copies.
pub struct AuditScanner<'a> {
    // @field: Substrings that flag a translation for review
    suspect_strings: &'a [String],
}

impl<'a> AuditScanner<'a> {
    pub fn new(suspect_strings: &'a [String]) -> Self {
        Self { suspect_strings }
    }

    /// Scan every catalog in `folder`; for files with matches, write
    /// `matched_<stem>.po` plus the corresponding `source_dir` catalog as
    /// `<stem>.po` into `review_dir`. Returns the number of flagged files.
    pub fn scan(
        &self,
        folder: &Path,
        source_dir: &Path,
        review_dir: &Path,
    ) -> Result<usize> {
        if self.suspect_strings.is_empty() {
            warn!("No suspect strings configured, nothing to scan for");
            return Ok(0);
        }

        FileManager::ensure_dir(review_dir)?;

        let files = FileManager::find_files(folder, "mo")
            .with_context(|| format!("Failed to scan {:?}", folder))?;

        let mut flagged = 0;
        for file in &files {
            let catalog = match CatalogStore::load_mo(file) {
                Ok(catalog) => catalog,
                Err(e) => {
                    warn!("Skipping unreadable catalog {:?}: {}", file, e);
                    continue;
                }
            };

            if !self.report_matches(&catalog) {
                continue;
            }
            flagged += 1;

            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let matched_po = review_dir.join(format!("matched_{}.po", stem));
            CatalogStore::save_po(&catalog, &matched_po)?;

            // Pull the upstream source catalog alongside for comparison
            let source_mo = source_dir.join(format!("{}.mo", stem));
            if FileManager::file_exists(&source_mo) {
                match CatalogStore::load_mo(&source_mo) {
                    Ok(source_catalog) => {
                        let source_po = review_dir.join(format!("{}.po", stem));
                        CatalogStore::save_po(&source_catalog, &source_po)?;
                    }
                    Err(e) => warn!("Failed to load source catalog {:?}: {}", source_mo, e),
                }
            } else {
                warn!("No source catalog for {:?} in {:?}", file, source_dir);
            }
        }

        Ok(flagged)
    }

    // @reports: Each suspect match with file, line, and matched string
    fn report_matches(&self, catalog: &Catalog) -> bool {
        let mut found = false;
        for entry in catalog.entries() {
            for suspect in self.suspect_strings {
                if entry_contains(entry, suspect) {
                    info!(
                        "File: {:?}, line: {}, matched: {:?}",
                        catalog.source_file, entry.line_num, suspect
                    );
                    found = true;
                }
            }
        }
        found
    }
}

// @checks: Whether the entry's translation carries the suspect string
fn entry_contains(entry: &CatalogEntry, suspect: &str) -> bool {
    if entry.is_plural() {
        entry.msgstr_plural.iter().any(|form| form.contains(suspect))
    } else {
        entry.msgstr.contains(suspect)
    }
}
