//! Character encoding detection for fetched bodies
//!
//! The encoding is taken from the Content-Type header when declared, then
//! from a `<meta>` declaration near the start of the document, then a BOM,
//! and finally defaults to UTF-8.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252, X_USER_DEFINED};
use regex::bytes::Regex;
use std::sync::OnceLock;

/// How many leading bytes are scanned for a `<meta>` charset declaration
const META_SNIFF_LIMIT: usize = 1024;

/// Extracts the `charset` parameter from a Content-Type header value
///
/// # Examples
///
/// ```
/// use onpage_seo::fetch::charset_from_content_type;
///
/// assert_eq!(
///     charset_from_content_type("text/html; charset=\"ISO-8859-1\""),
///     Some("ISO-8859-1".to_string())
/// );
/// assert_eq!(charset_from_content_type("text/html"), None);
/// ```
pub fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// `charset=` followed by an optionally quoted label
fn meta_charset_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r#"(?i)charset\s*=\s*["']?\s*([a-z0-9_:.\-]+)"#).ok())
        .as_ref()
}

/// Looks for `charset=` in the first kilobyte of the document
///
/// Covers both `<meta charset="...">` and the `http-equiv` Content-Type form.
fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(META_SNIFF_LIMIT)];
    let captures = meta_charset_pattern()?.captures(head)?;
    let label = captures.get(1)?.as_bytes();
    Some(String::from_utf8_lossy(label).to_ascii_lowercase())
}

/// Resolves a label found in a `<meta>` declaration
///
/// A document that could declare its own charset in ASCII is not UTF-16, so
/// UTF-16 labels mean UTF-8 here; `x-user-defined` means windows-1252.
fn meta_encoding(label: &str) -> Option<&'static Encoding> {
    let encoding = Encoding::for_label(label.as_bytes())?;
    if encoding == UTF_16BE || encoding == UTF_16LE {
        Some(UTF_8)
    } else if encoding == X_USER_DEFINED {
        Some(WINDOWS_1252)
    } else {
        Some(encoding)
    }
}

/// Decodes a response body to text
///
/// # Arguments
///
/// * `bytes` - Raw response body
/// * `declared` - Charset label from the Content-Type header, if any
///
/// # Returns
///
/// The decoded text (malformed sequences replaced with U+FFFD) and the name
/// of the encoding actually used.
pub fn decode_body(bytes: &[u8], declared: Option<&str>) -> (String, &'static str) {
    let encoding = declared
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| sniff_meta_charset(bytes).and_then(|label| meta_encoding(&label)))
        .unwrap_or(UTF_8);

    // decode() lets a byte order mark override the chosen encoding
    let (text, used, _had_errors) = encoding.decode(bytes);
    (text.into_owned(), used.name())
}
