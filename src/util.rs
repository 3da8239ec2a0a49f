//! Text helpers shared by the provider and the renderers.

use std::borrow::Cow;

/// Decode a response body, handling non-UTF-8 content.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (the `charset` of `Content-Type`)
/// 3. Falls back to Windows-1252
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the `charset` parameter from a `Content-Type` header value.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Split `text` after `max_chars` Unicode scalar values.
///
/// Returns `None` when the text is not longer than the limit.
pub fn truncate_chars(text: &str, max_chars: usize) -> Option<&str> {
    text.char_indices()
        .nth(max_chars)
        .map(|(byte_idx, _)| &text[..byte_idx])
}

// ============================================================================
// Tests
// ============================================================================
