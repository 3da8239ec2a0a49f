//! Plain-text rendering of reader markup for terminal output.

use markup5ever_rcdom::{Handle, NodeData};

use super::dom::{element_name, parse_html};

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "nav", "main", "aside", "ul", "ol",
    "table", "tr", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "button", "input",
];

/// Convert `html` to readable plain text.
///
/// Block elements start new lines, list items get a `- ` bullet, table cells
/// are separated by ` | `, and runs of whitespace collapse to one space.
pub fn html_to_text(html: &str) -> String {
    let dom = parse_html(html);
    let mut out = TextWriter::default();
    out.node(&dom.document);
    out.finish()
}

#[derive(Default)]
struct TextWriter {
    lines: Vec<String>,
    current: String,
}

impl TextWriter {
    fn node(&mut self, handle: &Handle) {
        match &handle.data {
            NodeData::Text { contents } => self.text(&contents.borrow()),
            NodeData::Element { .. } => self.element(handle),
            NodeData::Document => self.children(handle),
            _ => {}
        }
    }

    fn children(&mut self, handle: &Handle) {
        for child in handle.children.borrow().iter() {
            self.node(child);
        }
    }

    fn element(&mut self, handle: &Handle) {
        let name = element_name(handle).unwrap_or_default();
        match name.as_str() {
            "script" | "style" | "head" => {}
            "br" => self.break_line(),
            "li" => {
                self.break_line();
                self.current.push_str("- ");
                self.children(handle);
                self.break_line();
            }
            "td" | "th" => {
                if !self.current.is_empty() {
                    self.current.truncate(self.current.trim_end().len());
                    self.current.push_str(" | ");
                }
                self.children(handle);
            }
            name if BLOCK_ELEMENTS.contains(&name) => {
                self.break_line();
                self.children(handle);
                self.break_line();
            }
            _ => self.children(handle),
        }
    }

    fn text(&mut self, text: &str) {
        if text.starts_with(char::is_whitespace) {
            self.space();
        }
        for (i, word) in text.split_whitespace().enumerate() {
            if i > 0 {
                self.space();
            }
            self.current.push_str(word);
        }
        if text.ends_with(char::is_whitespace) {
            self.space();
        }
    }

    fn space(&mut self) {
        if !self.current.is_empty() && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
    }

    fn break_line(&mut self) {
        let line = self.current.trim_end().to_string();
        self.current.clear();
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_become_lines() {
        let text = html_to_text("<h1>Dosage</h1><p>Take  <b>one</b>\n tablet.</p><p>Daily.</p>");
        assert_eq!(text, "Dosage\nTake one tablet.\nDaily.");
    }

    #[test]
    fn test_lists_and_tables() {
        let text = html_to_text(
            "<ul><li>First</li><li>Second</li></ul>\
             <table><tr><th>Dose</th><th>Freq</th></tr><tr><td>5 mg</td><td>daily</td></tr></table>",
        );
        assert_eq!(text, "- First\n- Second\nDose | Freq\n5 mg | daily");
    }

    #[test]
    fn test_inline_spacing_is_kept() {
        assert_eq!(html_to_text("<p>See <a href=\"#s1\">1</a> and 2</p>"), "See 1 and 2");
        assert_eq!(html_to_text("<p>a<br>b</p>"), "a\nb");
    }
}
