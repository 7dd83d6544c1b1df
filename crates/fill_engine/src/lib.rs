//! Placeholder scanning and template rendering
//!
//! This crate turns a DOCX template into a completed document. The scanner
//! derives the ordered field list from the raw body text; the renderer
//! substitutes a field→value mapping into every placeholder occurrence,
//! XML-escaping each value, and hands back a new package.
//!
//! Both halves are synchronous and stateless: each call is pure over the
//! buffers passed in, so concurrent renders of one template need no
//! coordination.
//!
//! # Example
//!
//! ```rust
//! use fill_engine::scan_placeholders;
//!
//! let fields = scan_placeholders("Hello {name}, invoice {invoice_id}.");
//! assert_eq!(fields, vec!["name", "invoice_id"]);
//! ```

mod error;
mod renderer;
mod scanner;

pub use error::{FillError, Result};
pub use renderer::{fill_document, render};
pub use scanner::scan_placeholders;
