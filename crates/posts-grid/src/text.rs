//! Text helpers for building safe markup.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use quick_xml::escape::{resolve_html5_entity, unescape_with};
use regex::{Captures, Regex};

static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("valid script/style pattern")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"));

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#?[A-Za-z0-9]+;").expect("valid entity pattern"));

static PERCENT_OCTET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%[A-Fa-f0-9]{2}").expect("valid octet pattern"));

static URL_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("valid scheme pattern")
});

/// Schemes allowed in emitted links.
pub const ALLOWED_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "irc6", "ircs", "gopher", "nntp",
    "feed", "telnet", "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

/// Ellipsis appended to trimmed excerpts.
pub const ELLIPSIS: &str = "\u{2026}";

/// Removes HTML tags, dropping `<script>` and `<style>` elements along with
/// their contents.
pub fn strip_tags(html: &str) -> String {
    let without_code = SCRIPT_OR_STYLE.replace_all(html, "");
    TAG.replace_all(&without_code, "").into_owned()
}

/// Decodes named and numeric character references into plain text.
///
/// References that do not resolve, and bare `&`, are kept as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    ENTITY.replace_all(text, |caps: &Captures<'_>| {
        let raw = &caps[0];
        match unescape_with(raw, |name| resolve_html5_entity(name)) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => raw.to_string(),
        }
    })
}

/// Strips tags, decodes character references and keeps at most `limit`
/// words.
///
/// The result is plain text, ready to be escaped exactly once. Whitespace
/// runs collapse to single spaces. `more` is appended only when words were
/// dropped.
pub fn trim_words(text: &str, limit: usize, more: &str) -> String {
    let stripped = strip_tags(text);
    let plain = decode_entities(&stripped);
    let words: Vec<&str> = plain.split_whitespace().collect();
    if words.len() > limit {
        let mut trimmed = words[..limit].join(" ");
        trimmed.push_str(more);
        trimmed
    } else {
        words.join(" ")
    }
}

/// Reduces `raw` to characters valid in an HTML class or id.
///
/// Percent-encoded octets are removed, then everything outside
/// `A-Z a-z 0-9 _ -` is dropped.
pub fn sanitize_html_class(raw: &str) -> String {
    PERCENT_OCTET
        .replace_all(raw, "")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Lower-cases `raw` and keeps only `a-z 0-9 _ -`.
pub fn sanitize_key(raw: &str) -> String {
    raw.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect()
}

/// Makes a URL safe for a double-quoted HTML attribute.
///
/// Control characters are removed and URLs with a scheme outside
/// [`ALLOWED_SCHEMES`] become the empty string. Spaces, quotes and angle
/// brackets are percent-encoded and `&` is written as `&amp;`.
pub fn esc_url(url: &str) -> String {
    let url: String = url.trim().chars().filter(|c| !c.is_control()).collect();
    if url.is_empty() {
        return String::new();
    }
    if let Some(caps) = URL_SCHEME.captures(&url) {
        let scheme = caps[1].to_ascii_lowercase();
        if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
            return String::new();
        }
    }

    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '"' => out.push_str("%22"),
            '\'' => out.push_str("%27"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '`' => out.push_str("%60"),
            '&' => out.push_str("&amp;"),
            c => out.push(c),
        }
    }
    out
}
