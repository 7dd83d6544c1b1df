//! DOCX container I/O
//!
//! Opens a `.docx` file as an ordered table of ZIP entries, exposes the
//! document body (`word/document.xml`) for reading and replacement, and
//! re-packs the table into bytes any OOXML consumer can open. The document
//! model itself is never parsed; keeping every non-body entry opaque is what
//! guarantees styles, numbering, and media survive a fill unchanged.

mod error;
mod package;

pub use error::{PackError, PackResult};
pub use package::{DocPackage, PackageEntry, CONTENT_TYPES_PART, DOCUMENT_PART};
