//! Template rendering: placeholder substitution over the document body

use crate::error::Result;
use crate::scanner::placeholder_regex;
use doc_pack::DocPackage;
use quick_xml::escape::escape;
use regex_lite::Captures;
use std::collections::HashMap;

/// Substitute every placeholder occurrence in the package body
///
/// Fields absent from the mapping become empty strings; keys with no
/// matching placeholder are ignored. Partial data entry is common, so
/// neither case is an error. Every substituted value is XML-escaped before
/// insertion, otherwise a value holding `&` or `<` would corrupt the body
/// and produce a document Word refuses to open.
///
/// The input package is untouched; a new package with the rewritten body is
/// returned. Substitution runs in a single pass over the body, so a value
/// that itself contains `{brace}` text is inserted literally rather than
/// treated as a further placeholder.
pub fn render(package: &DocPackage, fields: &HashMap<String, String>) -> Result<DocPackage> {
    let body = package.document_xml()?;

    let filled = placeholder_regex().replace_all(body, |caps: &Captures| {
        let value = fields.get(&caps[1]).map(String::as_str).unwrap_or("");
        escape(value).into_owned()
    });

    let mut output = package.clone();
    output.set_document_xml(filled.into_owned())?;
    Ok(output)
}

/// Open raw template bytes, render, and re-serialize in one call
pub fn fill_document(template: &[u8], fields: &HashMap<String, String>) -> Result<Vec<u8>> {
    let package = DocPackage::open(template)?;
    let filled = render(&package, fields)?;
    Ok(filled.to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use doc_pack::{PackageEntry, CONTENT_TYPES_PART, DOCUMENT_PART};
    use proptest::prelude::*;

    fn package_with_body(body: &str) -> DocPackage {
        DocPackage::from_entries(vec![
            PackageEntry {
                path: CONTENT_TYPES_PART.to_string(),
                bytes: b"<?xml version=\"1.0\"?><Types/>".to_vec(),
            },
            PackageEntry {
                path: DOCUMENT_PART.to_string(),
                bytes: body.as_bytes().to_vec(),
            },
            PackageEntry {
                path: "word/styles.xml".to_string(),
                bytes: b"<w:styles/>".to_vec(),
            },
        ])
        .unwrap()
    }

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn wrap(text: &str) -> String {
        format!("<w:document><w:body><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:body></w:document>")
    }

    #[test]
    fn test_render_substitutes_all_fields() {
        let package = package_with_body(&wrap("Hello {name}, invoice {invoice_id}."));
        let out = render(
            &package,
            &fields(&[("name", "Jane Doe"), ("invoice_id", "999")]),
        )
        .unwrap();
        assert_eq!(
            out.document_xml().unwrap(),
            wrap("Hello Jane Doe, invoice 999.")
        );
    }

    #[test]
    fn test_render_escapes_xml_metacharacters() {
        let package = package_with_body(&wrap("Company: {company}"));
        let out = render(&package, &fields(&[("company", "A & B <Ltd>")])).unwrap();
        let body = out.document_xml().unwrap().to_string();
        assert!(body.contains("A &amp; B &lt;Ltd&gt;"));
        assert!(!body.contains("A & B"));

        // The rewritten body must still parse as XML
        let mut reader = quick_xml::Reader::from_str(&body);
        loop {
            match reader.read_event() {
                Ok(quick_xml::events::Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("rendered body is not well-formed: {e}"),
            }
        }
    }

    #[test]
    fn test_missing_field_defaults_to_empty() {
        let package = package_with_body(&wrap("Hello {name}, invoice {invoice_id}."));
        let out = render(&package, &fields(&[("name", "Jane")])).unwrap();
        assert_eq!(out.document_xml().unwrap(), wrap("Hello Jane, invoice ."));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let package = package_with_body(&wrap("Hello {name}."));
        let out = render(
            &package,
            &fields(&[("name", "Jane"), ("not_in_template", "zzz")]),
        )
        .unwrap();
        let body = out.document_xml().unwrap();
        assert_eq!(body, wrap("Hello Jane."));
        assert!(!body.contains("zzz"));
    }

    #[test]
    fn test_repeated_placeholder_fills_every_occurrence() {
        let package = package_with_body(&wrap("{name} and {name} and {name}"));
        let out = render(&package, &fields(&[("name", "Ann")])).unwrap();
        assert_eq!(out.document_xml().unwrap(), wrap("Ann and Ann and Ann"));
    }

    #[test]
    fn test_value_containing_braces_is_inserted_literally() {
        let package = package_with_body(&wrap("{a} {b}"));
        let out = render(&package, &fields(&[("a", "{b}"), ("b", "beta")])).unwrap();
        assert_eq!(out.document_xml().unwrap(), wrap("{b} beta"));
    }

    #[test]
    fn test_empty_fields_round_trip() {
        let body = wrap("Start {x} middle {y} end.");
        let package = package_with_body(&body);
        let out = render(&package, &HashMap::new()).unwrap();
        assert_eq!(out.document_xml().unwrap(), wrap("Start  middle  end."));
        // Non-body entries are byte-identical
        assert_eq!(
            out.entry_bytes("word/styles.xml"),
            package.entry_bytes("word/styles.xml")
        );
    }

    #[test]
    fn test_render_leaves_input_package_unchanged() {
        let body = wrap("Hello {name}.");
        let package = package_with_body(&body);
        let _ = render(&package, &fields(&[("name", "Jane")])).unwrap();
        assert_eq!(package.document_xml().unwrap(), body);
    }

    #[test]
    fn test_fill_document_round_trip() {
        let bytes = package_with_body(&wrap("Hi {who}!")).to_bytes().unwrap();
        let out = fill_document(&bytes, &fields(&[("who", "there")])).unwrap();
        let reopened = DocPackage::open(&out).unwrap();
        assert_eq!(reopened.document_xml().unwrap(), wrap("Hi there!"));
    }

    proptest! {
        #[test]
        fn prop_no_placeholder_survives_render(
            name in "[A-Za-z0-9_]{1,12}",
            value in "[ -~]{0,40}",
        ) {
            let package = package_with_body(&wrap(&format!("x {{{name}}} y")));
            let out = render(&package, &fields(&[(name.as_str(), value.as_str())])).unwrap();
            let body = out.document_xml().unwrap();
            let token = format!("{{{name}}}");
            prop_assert!(!body.contains(&token)
                // unless the supplied value itself carried the literal token
                || value.contains(&token));
        }

        #[test]
        fn prop_rendered_body_has_no_raw_ampersand(value in "[ -~]{0,40}") {
            let package = package_with_body(&wrap("v={v}"));
            let out = render(&package, &fields(&[("v", value.as_str())])).unwrap();
            let body = out.document_xml().unwrap();
            // every '&' in the body must start an entity
            for (i, _) in body.match_indices('&') {
                let rest = &body[i..];
                prop_assert!(
                    rest.starts_with("&amp;")
                        || rest.starts_with("&lt;")
                        || rest.starts_with("&gt;")
                        || rest.starts_with("&quot;")
                        || rest.starts_with("&apos;"),
                    "raw ampersand at {i} in {body}"
                );
            }
        }
    }
}
