//! HTML escaping helpers shared by the parsers and the HTML renderer.

use std::sync::OnceLock;

use regex::Regex;

const BLOCKED_SCHEMES: [&str; 2] = ["javascript:", "vbscript:"];

/// Escapes `&`, `<` and `>` (and both quote characters when `quote` is set).
///
/// With `smart_amp`, an `&` that already starts an entity such as `&amp;` or
/// `&#8617;` is left alone.
pub fn escape(text: &str, quote: bool, smart_amp: bool) -> String {
    if !smart_amp {
        return encode(text, quote);
    }

    static ENTITY: OnceLock<Regex> = OnceLock::new();
    let entity =
        ENTITY.get_or_init(|| Regex::new(r"&#?[A-Za-z0-9]+;").expect("Invalid entity regex"));

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in entity.find_iter(text) {
        out.push_str(&encode(&text[last..m.start()], quote));
        out.push_str(m.as_str());
        last = m.end();
    }
    out.push_str(&encode(&text[last..], quote));
    out
}

fn encode(text: &str, quote: bool) -> String {
    if quote {
        html_escape::encode_quoted_attribute(text).into_owned()
    } else {
        html_escape::encode_text(text).into_owned()
    }
}

/// Escapes a URL for use in an attribute, dropping dangerous schemes.
///
/// Returns an empty string when the URL's scheme is `javascript:` or
/// `vbscript:`, compared case-insensitively after trimming control
/// characters and ignoring anything outside `[A-Za-z0-9/:]`.
pub fn escape_link(url: &str) -> String {
    let lowered = url
        .to_lowercase()
        .trim_matches(|c: char| matches!(c, '\0' | '\x1a' | ' ' | '\n' | '\r' | '\t'))
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '/' || *c == ':')
        .collect::<String>();

    if BLOCKED_SCHEMES.iter().any(|s| lowered.starts_with(s)) {
        log::debug!("dropping link with blocked scheme: {url:?}");
        return String::new();
    }
    escape(url, true, false)
}

/// Normalizes a reference key: lowercase, whitespace runs collapsed to one
/// space, HTML-escaped.
pub fn keyify(key: &str) -> String {
    let collapsed = key
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    escape(&collapsed, true, true)
}
