//! In-memory DOCX package: an ordered mapping of ZIP entry paths to bytes
//!
//! The package is treated as an opaque entry table rather than a parsed
//! document model. Only `word/document.xml` is ever rewritten; styles,
//! numbering, relationships, and media pass through byte-for-byte, which is
//! what keeps formatting intact across a fill.

use crate::error::{PackError, PackResult};
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Entry path of the main document body
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Entry path of the content-types manifest
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// A single entry in the package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub path: String,
    pub bytes: Vec<u8>,
}

/// An opened DOCX package
///
/// Entries keep the order they had in the source archive, so a package that
/// is opened and re-serialized without edits round-trips its entry set (and
/// order) unchanged.
#[derive(Debug, Clone)]
pub struct DocPackage {
    entries: Vec<PackageEntry>,
}

impl DocPackage {
    /// Open a package from raw `.docx` bytes
    ///
    /// Fails if the bytes are not a readable ZIP archive or if the package
    /// lacks `[Content_Types].xml` or `word/document.xml`.
    pub fn open(bytes: &[u8]) -> PackResult<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut bytes = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut bytes)?;
            entries.push(PackageEntry {
                path: file.name().to_string(),
                bytes,
            });
        }

        Self::from_entries(entries)
    }

    /// Build a package from an entry list, validating required parts
    pub fn from_entries(entries: Vec<PackageEntry>) -> PackResult<Self> {
        let package = Self { entries };
        for part in [CONTENT_TYPES_PART, DOCUMENT_PART] {
            if !package.has_entry(part) {
                return Err(PackError::MissingPart(part.to_string()));
            }
        }
        Ok(package)
    }

    /// Check if a package entry exists
    pub fn has_entry(&self, path: &str) -> bool {
        self.entries.iter().any(|e| e.path == path)
    }

    /// Get the raw bytes of an entry
    pub fn entry_bytes(&self, path: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.path == path)
            .map(|e| e.bytes.as_slice())
    }

    /// List all entry paths in archive order
    pub fn entry_paths(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.path.as_str()).collect()
    }

    /// Read the document body (`word/document.xml`) as UTF-8 text
    pub fn document_xml(&self) -> PackResult<&str> {
        let bytes = self
            .entry_bytes(DOCUMENT_PART)
            .ok_or_else(|| PackError::MissingPart(DOCUMENT_PART.to_string()))?;
        std::str::from_utf8(bytes).map_err(|_| PackError::PartEncoding(DOCUMENT_PART.to_string()))
    }

    /// Replace the document body with new XML text
    ///
    /// Only the `word/document.xml` entry is touched; every other entry
    /// keeps its exact bytes.
    pub fn set_document_xml(&mut self, xml: impl Into<String>) -> PackResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.path == DOCUMENT_PART)
            .ok_or_else(|| PackError::MissingPart(DOCUMENT_PART.to_string()))?;
        entry.bytes = xml.into().into_bytes();
        Ok(())
    }

    /// Re-pack all entries into `.docx` bytes
    ///
    /// XML parts are deflated, everything else (media and other binaries)
    /// is stored uncompressed, matching what Word itself produces.
    pub fn to_bytes(&self) -> PackResult<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let method = if is_xml_part(&entry.path) {
                zip::CompressionMethod::Deflated
            } else {
                zip::CompressionMethod::Stored
            };
            let options = SimpleFileOptions::default().compression_method(method);
            zip.start_file(entry.path.as_str(), options)?;
            zip.write_all(&entry.bytes)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

fn is_xml_part(path: &str) -> bool {
    path.ends_with(".xml") || path.ends_with(".rels")
}
