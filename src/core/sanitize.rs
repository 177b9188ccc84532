// src/core/sanitize.rs
use crate::config::consts::PAGE_PREFIX;

/// Collapse whitespace runs (NBSP included) into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// `"Page : \u{a0}12"` → `"12"`.
///
/// The device sometimes renders the space after the colon as `&nbsp;`, so
/// `"Page :"` followed by any whitespace counts as the prefix too.
pub fn normalize_locator(s: &str) -> String {
    let t = s.trim();
    let rest = t
        .strip_prefix(PAGE_PREFIX)
        .or_else(|| {
            t.strip_prefix(PAGE_PREFIX.trim_end())
                .filter(|r| r.starts_with(char::is_whitespace))
        })
        .unwrap_or(t);
    rest.trim().to_string()
}

/// Reversible file-name stem: ASCII alphanumerics and `-` pass through, every
/// other byte becomes `_` plus two lowercase hex digits (`"office 2f"` →
/// `"office_202f"`). Distinct names always give distinct stems, and a `_` in
/// the output is always followed by a hex digit.
pub fn escape_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for b in name.bytes() {
        if b.is_ascii_alphanumeric() || b == b'-' {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("_{b:02x}"));
        }
    }
    out
}
