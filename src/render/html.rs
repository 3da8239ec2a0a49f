//! HTML string helpers for the renderers.

/// Escape text for element content and double-quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// `class="..."` value from a base class and an optional `active` modifier.
pub fn class_list(base: &str, active: bool) -> String {
    if active {
        format!("{base} active")
    } else {
        base.to_string()
    }
}
