//! Placeholder scanning over raw document XML

use regex_lite::Regex;
use std::sync::OnceLock;

/// Matches `{identifier}` where the identifier is `[A-Za-z0-9_]+`
pub(crate) fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"))
}

/// Extract the distinct placeholder identifiers from document body text
///
/// Identifiers are returned in first-occurrence order, duplicates collapsed,
/// so the same bytes always scan to the same field list. An empty result
/// means the body holds no fillable placeholders; whether that rejects an
/// upload is the ingestion path's call, not the scanner's.
///
/// Caveat: a placeholder is only detected when its braces and identifier sit
/// in one contiguous stretch of the serialized XML. Editors sometimes split
/// typed text across `<w:r>` runs (spell-check marks, formatting changes),
/// and a placeholder fragmented that way is invisible to text-level
/// scanning.
pub fn scan_placeholders(body: &str) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for caps in placeholder_regex().captures_iter(body) {
        let name = &caps[1];
        if !fields.iter().any(|f| f == name) {
            fields.push(name.to_string());
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_basic() {
        let fields = scan_placeholders("Hello {name}, invoice {invoice_id}.");
        assert_eq!(fields, vec!["name", "invoice_id"]);
    }

    #[test]
    fn test_scan_dedup_keeps_first_occurrence_order() {
        let fields = scan_placeholders("{b} {a} {b} {c} {a}");
        assert_eq!(fields, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_scan_empty_body() {
        assert!(scan_placeholders("").is_empty());
        assert!(scan_placeholders("no placeholders here").is_empty());
    }

    #[test]
    fn test_scan_rejects_invalid_identifiers() {
        // Hyphens, spaces, and empty braces are not placeholder syntax
        assert!(scan_placeholders("{first-name} {first name} {}").is_empty());
    }

    #[test]
    fn test_scan_inside_xml_markup() {
        let body = r#"<w:p><w:r><w:t>Dear {customer_name},</w:t></w:r></w:p>"#;
        assert_eq!(scan_placeholders(body), vec!["customer_name"]);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let body = "{z} {y} {x} {z}";
        let first = scan_placeholders(body);
        for _ in 0..10 {
            assert_eq!(scan_placeholders(body), first);
        }
    }
}
