// src/core/html.rs
//
// Pure document scanning. No HTTP here, so everything is testable against
// saved login pages.

use scraper::{Html, Selector};

use crate::config::consts::{TOKEN_FIELD, TOKEN_META};

/// Anti-forgery token of a login page: the `_token` hidden input, or the
/// `csrf-token` meta tag when the form field is absent.
pub fn extract_token(document: &str) -> Option<String> {
    extract_named_token(document, TOKEN_FIELD)
        .or_else(|| extract_meta_content(document, TOKEN_META))
}

/// `value` of the first `<input name="{name}">` with a non-blank value.
pub fn extract_named_token(document: &str, name: &str) -> Option<String> {
    let doc = Html::parse_document(document);
    let sel = Selector::parse(&format!(r#"input[name="{name}"]"#)).ok()?;
    first_attr(&doc, &sel, "value")
}

/// `content` of the first `<meta name="{name}">` with a non-blank value.
pub fn extract_meta_content(document: &str, name: &str) -> Option<String> {
    let doc = Html::parse_document(document);
    let sel = Selector::parse(&format!(r#"meta[name="{name}"]"#)).ok()?;
    first_attr(&doc, &sel, "content")
}

fn first_attr(doc: &Html, sel: &Selector, attr: &str) -> Option<String> {
    doc.select(sel)
        .filter_map(|el| el.value().attr(attr))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}
