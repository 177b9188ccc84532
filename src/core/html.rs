// src/core/html.rs
// Element matching over a parsed `scraper::Html` tree.
// Tag names compare ASCII case-insensitively; `class` matches by token
// subset, every other attribute by exact value.

use std::collections::BTreeMap;

use scraper::ElementRef;

use super::sanitize::normalize_ws;

pub type Attrs = BTreeMap<String, String>;

/// Every element under `root` (inclusive), document order.
pub fn elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().filter_map(ElementRef::wrap)
}

pub fn has_tag(el: ElementRef<'_>, tag: &str) -> bool {
    el.value().name().eq_ignore_ascii_case(tag)
}

pub fn matches(el: ElementRef<'_>, tag: &str, attrs: &Attrs) -> bool {
    if !has_tag(el, tag) {
        return false;
    }
    attrs.iter().all(|(name, want)| {
        if name.eq_ignore_ascii_case("class") {
            let have: Vec<&str> = el.value().classes().collect();
            want.split_whitespace().all(|c| have.contains(&c))
        } else {
            el.value().attr(name) == Some(want.as_str())
        }
    })
}

pub fn find_first<'a>(root: ElementRef<'a>, tag: &str, attrs: &Attrs) -> Option<ElementRef<'a>> {
    elements(root).find(|el| matches(*el, tag, attrs))
}

/// Visible text, whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Visible text with only the ends trimmed; inner spacing is kept.
pub fn trimmed_text(el: ElementRef<'_>) -> String {
    s!(el.text().collect::<String>().trim())
}

/// First element under `root` with the given tag whose text equals `text`
/// (after whitespace normalisation on both sides).
pub fn find_by_text<'a>(root: ElementRef<'a>, tag: &str, text: &str) -> Option<ElementRef<'a>> {
    let want = normalize_ws(text);
    elements(root).find(|el| has_tag(*el, tag) && text_of(*el) == want)
}

/// First `tag` element after `anchor` in document order, searching within `root`.
pub fn next_after<'a>(root: ElementRef<'a>, anchor: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    let anchor_id = anchor.id();
    elements(root)
        .skip_while(|el| el.id() != anchor_id)
        .skip(1)
        .find(|el| has_tag(*el, tag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn attrs(pairs: &[(&str, &str)]) -> Attrs {
        pairs.iter().map(|(k, v)| (s!(*k), s!(*v))).collect()
    }

    #[test]
    fn class_matches_by_token_subset() {
        let doc = Html::parse_document(r#"<table class="list errorHistory wide"></table>"#);
        let root = doc.root_element();
        assert!(find_first(root, "table", &attrs(&[("class", "errorHistory list")])).is_some());
        assert!(find_first(root, "table", &attrs(&[("class", "list narrow")])).is_none());
    }

    #[test]
    fn other_attributes_match_exactly() {
        let doc = Html::parse_document(r#"<img alt="Black" height="40"><img alt="Blackish" height="9">"#);
        let root = doc.root_element();
        let el = find_first(root, "IMG", &attrs(&[("alt", "Black")])).unwrap();
        assert_eq!(el.value().attr("height"), Some("40"));
    }

    #[test]
    fn trimmed_text_keeps_inner_runs() {
        let doc = Html::parse_document("<dd>\n  HL  L2350\u{a0} </dd>");
        let dd = find_first(doc.root_element(), "dd", &Attrs::new()).unwrap();
        assert_eq!(trimmed_text(dd), "HL  L2350");
        assert_eq!(text_of(dd), "HL L2350");
    }

    #[test]
    fn next_after_walks_document_order() {
        let doc = Html::parse_document(
            "<dl><dt>Model Name</dt></dl><p>x</p><dl><dd> HL-L2350DW </dd></dl>",
        );
        let root = doc.root_element();
        let dt = find_by_text(root, "dt", "Model Name").unwrap();
        let dd = next_after(root, dt, "dd").unwrap();
        assert_eq!(text_of(dd), "HL-L2350DW");
    }
}
