//! Inline section bodies with a "show more" control.

use crate::util::truncate_chars;

/// Bodies longer than this many characters start collapsed.
///
/// Counts Unicode scalar values, not UTF-16 code units, so text with
/// astral-plane characters such as emoji keeps more of its preview than a
/// browser `length` check would.
pub const TRUNCATE_AT: usize = 600;

/// Appended to a collapsed preview.
pub const ELLIPSIS: char = '…';

/// An inline body, collapsed to a preview when it is long.
///
/// The markup is trusted and inserted as-is. Truncation counts characters of
/// the raw markup, so a preview can cut through a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBody {
    text: String,
    expanded: bool,
}

impl SectionBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expanded: false,
        }
    }

    pub fn is_long(&self) -> bool {
        truncate_chars(&self.text, TRUNCATE_AT).is_some()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip between preview and full text. No effect on short bodies.
    pub fn toggle(&mut self) {
        if self.is_long() {
            self.expanded = !self.expanded;
        }
    }

    /// The markup currently shown.
    pub fn visible_text(&self) -> String {
        match truncate_chars(&self.text, TRUNCATE_AT) {
            Some(preview) if !self.expanded => {
                let mut shown = preview.to_string();
                shown.push(ELLIPSIS);
                shown
            }
            _ => self.text.clone(),
        }
    }

    /// Label of the toggle button, if one is shown.
    pub fn control_label(&self) -> Option<&'static str> {
        if !self.is_long() {
            None
        } else if self.expanded {
            Some("Show less")
        } else {
            Some("Show more")
        }
    }

    pub fn render(&self) -> String {
        let mut html = format!(
            "<div class=\"section-body\"><p>{}</p>",
            self.visible_text()
        );
        if let Some(label) = self.control_label() {
            html.push_str(&format!(
                "<button type=\"button\" class=\"body-toggle\">{label}</button>"
            ));
        }
        html.push_str("</div>");
        html
    }
}
