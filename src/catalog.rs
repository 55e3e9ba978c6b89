use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

// @module: Message catalog data model and merging

// @struct: Single translatable catalog entry
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    // @field: Source-language message key
    pub msgid: String,

    // @field: Plural form of the key, present only for plural entries
    pub msgid_plural: Option<String>,

    // @field: Singular translated string
    pub msgstr: String,

    // @field: Plural translated strings by plural-form index, empty for singular entries
    pub msgstr_plural: Vec<String>,

    // @field: Line number in the source file, 0 when unknown
    pub line_num: usize,
}

impl CatalogEntry {
    /// Creates a new singular entry
    pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
        CatalogEntry {
            msgid: msgid.into(),
            msgid_plural: None,
            msgstr: msgstr.into(),
            msgstr_plural: Vec::new(),
            line_num: 0,
        }
    }

    /// Creates a new plural entry with translated forms in plural-form order
    pub fn new_plural(
        msgid: impl Into<String>,
        msgid_plural: impl Into<String>,
        forms: Vec<String>,
    ) -> Self {
        CatalogEntry {
            msgid: msgid.into(),
            msgid_plural: Some(msgid_plural.into()),
            msgstr: String::new(),
            msgstr_plural: forms,
            line_num: 0,
        }
    }

    /// Set the source line number
    pub fn with_line_num(mut self, line_num: usize) -> Self {
        self.line_num = line_num;
        self
    }

    // @returns: Whether the entry carries plural forms
    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some() || !self.msgstr_plural.is_empty()
    }

    // @returns: Whether this is the catalog metadata header entry
    pub fn is_metadata(&self) -> bool {
        self.msgid.is_empty()
    }
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_plural() {
            write!(f, "{:?} ({} plural forms)", self.msgid, self.msgstr_plural.len())
        } else {
            write!(f, "{:?} -> {:?}", self.msgid, self.msgstr)
        }
    }
}

/// Ordered collection of catalog entries keyed by msgid.
///
/// Entries keep their file order; lookups go through a msgid index.
/// When a duplicate msgid is pushed, the first entry wins for lookups
/// and later duplicates are kept only in entry order.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Source file the catalog was loaded from
    pub source_file: PathBuf,

    /// Entries in file order
    entries: Vec<CatalogEntry>,

    /// msgid -> index of the first entry with that msgid
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new(source_file: PathBuf) -> Self {
        Catalog {
            source_file,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a catalog from entries, keeping the first entry per msgid in the index
    pub fn from_entries(source_file: PathBuf, entries: Vec<CatalogEntry>) -> Self {
        let mut catalog = Catalog::new(source_file);
        for entry in entries {
            catalog.push(entry);
        }
        catalog
    }

    /// Append an entry, indexing its msgid if not already present
    pub fn push(&mut self, entry: CatalogEntry) {
        self.index
            .entry(entry.msgid.clone())
            .or_insert(self.entries.len());
        self.entries.push(entry);
    }

    /// Look up the first entry with the given msgid
    pub fn get(&self, msgid: &str) -> Option<&CatalogEntry> {
        self.index.get(msgid).map(|&i| &self.entries[i])
    }

    // @checks: Whether an entry with the msgid exists
    pub fn contains(&self, msgid: &str) -> bool {
        self.index.contains_key(msgid)
    }

    /// Entries in file order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Mutable access to entries, for the translation pass
    pub fn entries_mut(&mut self) -> &mut [CatalogEntry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge entries from `incoming` that this catalog does not have yet.
    ///
    /// For every incoming entry: if no entry with the same msgid exists here,
    /// the incoming entry is appended carrying its own (typically untranslated)
    /// strings. Entries already present keep their translation unchanged, so
    /// previously-approved translations survive catalog updates.
    ///
    /// Returns the number of appended entries.
    pub fn merge_missing_from(&mut self, incoming: &Catalog) -> usize {
        let mut appended = 0;
        for entry in incoming.entries() {
            if !self.contains(&entry.msgid) {
                self.push(entry.clone());
                appended += 1;
            }
        }
        appended
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Catalog")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
