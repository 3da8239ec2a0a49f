//! Glossary with substring search.

use crate::model::GlossaryEntry;
use crate::render::escape_html;

/// Entries matching `query`, in manifest order.
///
/// The query is trimmed and compared case-insensitively against the term
/// and the definition. A blank query matches everything.
pub fn filter_glossary<'a>(entries: &'a [GlossaryEntry], query: &str) -> Vec<&'a GlossaryEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|entry| {
            entry.term.to_lowercase().contains(&needle)
                || entry.definition.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The glossary view for the current search text.
#[derive(Debug, Clone, Copy)]
pub struct Glossary<'a> {
    entries: &'a [GlossaryEntry],
    query: &'a str,
}

impl<'a> Glossary<'a> {
    pub fn new(entries: &'a [GlossaryEntry], query: &'a str) -> Self {
        Self { entries, query }
    }

    pub fn items(&self) -> Vec<&'a GlossaryEntry> {
        filter_glossary(self.entries, self.query)
    }

    pub fn render(&self) -> String {
        let mut html = format!(
            "<div id=\"glossary\"><h2>Glossary</h2><div>\
             <input type=\"search\" placeholder=\"Search terms...\" value=\"{}\"><ul>",
            escape_html(self.query)
        );
        let items = self.items();
        for entry in &items {
            html.push_str(&format!(
                "<li><span>{}</span> — {}</li>",
                escape_html(&entry.term),
                escape_html(&entry.definition)
            ));
        }
        if items.is_empty() {
            html.push_str("<li>No matches</li>");
        }
        html.push_str("</ul></div></div>");
        html
    }
}
