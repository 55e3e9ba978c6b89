use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use bytes::{Buf, BufMut, BytesMut};
use log::warn;

use crate::catalog::{Catalog, CatalogEntry};
use crate::errors::CatalogError;

// @module: Catalog file codec for binary MO and textual PO formats

// @const: gettext MO magic number, as read from a little-endian file
const MO_MAGIC: u32 = 0x9504_12de;
// @const: Same magic read from a big-endian file with little-endian order
const MO_MAGIC_SWAPPED: u32 = 0xde12_0495;

// @const: MO header length in bytes (magic, revision, count, two table offsets, hash size/offset)
const MO_HEADER_LEN: usize = 28;

/// Codec for loading and saving message catalogs.
///
/// MO files are read in either byte order and always written little-endian
/// with the original-string table sorted by msgid, since the gettext runtime
/// binary-searches that table. PO files are the line-oriented textual form
/// used for run intermediates and review copies.
pub struct CatalogStore;

impl CatalogStore {
    /// Load a binary MO catalog from a file
    pub fn load_mo<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        Self::parse_mo_bytes(&data, path)
    }

    /// Parse MO catalog bytes
    pub fn parse_mo_bytes(data: &[u8], source: &Path) -> Result<Catalog, CatalogError> {
        if data.len() < MO_HEADER_LEN {
            return Err(CatalogError::Truncated(format!(
                "{} bytes is shorter than the {} byte header",
                data.len(),
                MO_HEADER_LEN
            )));
        }

        let magic = read_u32(data, 0, false)?;
        let big_endian = match magic {
            MO_MAGIC => false,
            MO_MAGIC_SWAPPED => true,
            other => return Err(CatalogError::BadMagic(other)),
        };

        let count = read_u32(data, 8, big_endian)? as usize;
        let orig_table = read_u32(data, 12, big_endian)? as usize;
        let trans_table = read_u32(data, 16, big_endian)? as usize;

        let mut entries = Vec::with_capacity(count);
        for i in 0..count {
            let orig = read_string(data, orig_table + 8 * i, big_endian, i)?;
            let trans = read_string(data, trans_table + 8 * i, big_endian, i)?;

            // A NUL inside the original string separates singular and plural msgids
            let mut orig_parts = orig.splitn(2, '\0');
            let msgid = orig_parts.next().unwrap_or_default().to_string();
            let msgid_plural = orig_parts.next().map(|s| s.to_string());

            let entry = if msgid_plural.is_some() {
                let forms = trans.split('\0').map(|s| s.to_string()).collect();
                CatalogEntry {
                    msgid,
                    msgid_plural,
                    msgstr: String::new(),
                    msgstr_plural: forms,
                    line_num: 0,
                }
            } else {
                CatalogEntry::new(msgid, trans)
            };
            entries.push(entry);
        }

        Ok(Catalog::from_entries(source.to_path_buf(), entries))
    }

    /// Serialize a catalog to MO bytes
    pub fn mo_to_bytes(catalog: &Catalog) -> Vec<u8> {
        // The runtime binary-searches the original table, so sort by msgid
        let mut sorted: Vec<&CatalogEntry> = catalog.entries().iter().collect();
        sorted.sort_by(|a, b| mo_key(a).cmp(&mo_key(b)));

        let count = sorted.len();
        let strings_start = MO_HEADER_LEN + 16 * count;

        let mut orig_blobs = Vec::with_capacity(count);
        let mut trans_blobs = Vec::with_capacity(count);
        for entry in &sorted {
            orig_blobs.push(mo_key(entry).into_bytes());
            let trans = if entry.is_plural() {
                entry.msgstr_plural.join("\0")
            } else {
                entry.msgstr.clone()
            };
            trans_blobs.push(trans.into_bytes());
        }

        let mut buf = BytesMut::new();
        buf.put_u32_le(MO_MAGIC);
        buf.put_u32_le(0); // format revision
        buf.put_u32_le(count as u32);
        buf.put_u32_le(MO_HEADER_LEN as u32);
        buf.put_u32_le((MO_HEADER_LEN + 8 * count) as u32);
        buf.put_u32_le(0); // hash table size: none
        buf.put_u32_le(strings_start as u32);

        // Offset tables: originals first, then translations, each NUL-terminated
        let mut offset = strings_start;
        for blob in &orig_blobs {
            buf.put_u32_le(blob.len() as u32);
            buf.put_u32_le(offset as u32);
            offset += blob.len() + 1;
        }
        for blob in &trans_blobs {
            buf.put_u32_le(blob.len() as u32);
            buf.put_u32_le(offset as u32);
            offset += blob.len() + 1;
        }

        for blob in orig_blobs.iter().chain(trans_blobs.iter()) {
            buf.put_slice(blob);
            buf.put_u8(0);
        }

        buf.to_vec()
    }

    /// Save a catalog as a binary MO file
    pub fn save_mo<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<(), CatalogError> {
        let bytes = Self::mo_to_bytes(catalog);
        fs::write(path.as_ref(), bytes)?;
        Ok(())
    }

    /// Load a textual PO catalog from a file
    pub fn load_po<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse_po_string(&content, path)
    }

    /// Parse PO file content into a catalog
    pub fn parse_po_string(content: &str, source: &Path) -> Result<Catalog, CatalogError> {
        let mut parser = PoParser::default();
        for (idx, line) in content.lines().enumerate() {
            parser.feed(line, idx + 1)?;
        }
        let entries = parser.finish()?;
        Ok(Catalog::from_entries(source.to_path_buf(), entries))
    }

    /// Serialize a catalog to PO text
    pub fn po_to_string(catalog: &Catalog) -> String {
        let mut out = String::new();
        for entry in catalog.entries() {
            out.push_str(&format!("msgid {}\n", quote(&entry.msgid)));
            if let Some(plural) = &entry.msgid_plural {
                out.push_str(&format!("msgid_plural {}\n", quote(plural)));
                for (i, form) in entry.msgstr_plural.iter().enumerate() {
                    out.push_str(&format!("msgstr[{}] {}\n", i, quote(form)));
                }
            } else {
                out.push_str(&format!("msgstr {}\n", quote(&entry.msgstr)));
            }
            out.push('\n');
        }
        out
    }

    /// Save a catalog as a textual PO file
    pub fn save_po<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<(), CatalogError> {
        fs::write(path.as_ref(), Self::po_to_string(catalog))?;
        Ok(())
    }
}

// @returns: The original-string blob for an entry (msgid, plus NUL and plural msgid)
fn mo_key(entry: &CatalogEntry) -> String {
    match &entry.msgid_plural {
        Some(plural) => format!("{}\0{}", entry.msgid, plural),
        None => entry.msgid.clone(),
    }
}

// @reads: One u32 at a byte offset with the file's endianness
fn read_u32(data: &[u8], pos: usize, big_endian: bool) -> Result<u32, CatalogError> {
    let end = pos
        .checked_add(4)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| CatalogError::Truncated(format!("need 4 bytes at offset {}", pos)))?;
    let mut slice = &data[pos..end];
    Ok(if big_endian {
        slice.get_u32()
    } else {
        slice.get_u32_le()
    })
}

// @reads: One string table entry (length and offset pair, then the bytes)
fn read_string(
    data: &[u8],
    table_pos: usize,
    big_endian: bool,
    index: usize,
) -> Result<String, CatalogError> {
    let len = read_u32(data, table_pos, big_endian)? as usize;
    let offset = read_u32(data, table_pos + 4, big_endian)? as usize;

    let end = offset
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or(CatalogError::BadOffset { index })?;

    String::from_utf8(data[offset..end].to_vec())
        .map_err(|_| CatalogError::InvalidUtf8 { index })
}

/// Field currently being accumulated by the PO parser
#[derive(Debug, Clone, Copy, PartialEq)]
enum PoField {
    None,
    MsgId,
    MsgIdPlural,
    MsgStr,
    MsgStrPlural(usize),
}

/// Line-oriented PO parser.
///
/// Entries are separated by blank lines; a bare `msgid` while an entry is in
/// progress also flushes, which tolerates files without trailing separators.
#[derive(Default)]
struct PoParser {
    entries: Vec<CatalogEntry>,
    field: Option<PoField>,
    msgid: Option<String>,
    msgid_plural: Option<String>,
    msgstr: String,
    msgstr_plural: BTreeMap<usize, String>,
    entry_line: usize,
}

impl PoParser {
    fn feed(&mut self, line: &str, line_num: usize) -> Result<(), CatalogError> {
        let trimmed = line.trim();

        if trimmed.starts_with('#') {
            return Ok(());
        }

        if trimmed.is_empty() {
            self.flush();
            return Ok(());
        }

        if let Some(rest) = trimmed.strip_prefix("msgid_plural ") {
            self.msgid_plural = Some(unquote(rest, line_num)?);
            self.field = Some(PoField::MsgIdPlural);
        } else if let Some(rest) = trimmed.strip_prefix("msgid ") {
            if self.msgid.is_some() {
                self.flush();
            }
            self.msgid = Some(unquote(rest, line_num)?);
            self.entry_line = line_num;
            self.field = Some(PoField::MsgId);
        } else if let Some(rest) = trimmed.strip_prefix("msgstr[") {
            let close = rest.find(']').ok_or_else(|| CatalogError::PoSyntax {
                line: line_num,
                message: "unterminated msgstr index".to_string(),
            })?;
            let idx: usize =
                rest[..close]
                    .parse()
                    .map_err(|_| CatalogError::PoSyntax {
                        line: line_num,
                        message: format!("invalid msgstr index '{}'", &rest[..close]),
                    })?;
            let value = unquote(rest[close + 1..].trim_start(), line_num)?;
            self.msgstr_plural.insert(idx, value);
            self.field = Some(PoField::MsgStrPlural(idx));
        } else if let Some(rest) = trimmed.strip_prefix("msgstr ") {
            self.msgstr = unquote(rest, line_num)?;
            self.field = Some(PoField::MsgStr);
        } else if trimmed.starts_with('"') {
            let continued = unquote(trimmed, line_num)?;
            match self.field {
                Some(PoField::MsgId) => {
                    if let Some(msgid) = &mut self.msgid {
                        msgid.push_str(&continued);
                    }
                }
                Some(PoField::MsgIdPlural) => {
                    if let Some(plural) = &mut self.msgid_plural {
                        plural.push_str(&continued);
                    }
                }
                Some(PoField::MsgStr) => self.msgstr.push_str(&continued),
                Some(PoField::MsgStrPlural(idx)) => {
                    self.msgstr_plural.entry(idx).or_default().push_str(&continued);
                }
                _ => {
                    return Err(CatalogError::PoSyntax {
                        line: line_num,
                        message: "continuation string outside an entry".to_string(),
                    });
                }
            }
        } else {
            return Err(CatalogError::PoSyntax {
                line: line_num,
                message: format!("unrecognized line: {}", trimmed),
            });
        }

        Ok(())
    }

    fn flush(&mut self) {
        let Some(msgid) = self.msgid.take() else {
            self.reset();
            return;
        };

        let line_num = self.entry_line;
        let entry = if let Some(msgid_plural) = self.msgid_plural.take() {
            if self.msgstr_plural.is_empty() {
                warn!("Plural entry {:?} at line {} has no msgstr forms", msgid, line_num);
            }
            let forms = std::mem::take(&mut self.msgstr_plural)
                .into_values()
                .collect();
            CatalogEntry::new_plural(msgid, msgid_plural, forms).with_line_num(line_num)
        } else {
            CatalogEntry::new(msgid, std::mem::take(&mut self.msgstr)).with_line_num(line_num)
        };
        self.entries.push(entry);
        self.reset();
    }

    fn reset(&mut self) {
        self.field = None;
        self.msgid = None;
        self.msgid_plural = None;
        self.msgstr = String::new();
        self.msgstr_plural.clear();
        self.entry_line = 0;
    }

    fn finish(mut self) -> Result<Vec<CatalogEntry>, CatalogError> {
        // The file may not end with a blank line
        self.flush();
        Ok(self.entries)
    }
}

// @unescapes: A quoted PO string segment in a single pass
fn unquote(segment: &str, line_num: usize) -> Result<String, CatalogError> {
    let segment = segment.trim();
    let inner = segment
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| CatalogError::PoSyntax {
            line: line_num,
            message: format!("expected quoted string, found: {}", segment),
        })?;

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('t') => result.push('\t'),
                Some('r') => result.push('\r'),
                Some('"') => result.push('"'),
                Some('\\') => result.push('\\'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    Ok(result)
}

// @escapes: A string for PO output, always quoted
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
