//! Parsed views of provider markup.
//!
//! Uses html5ever's built-in RcDom. Parsing is lenient like a browser: any
//! input produces a document, fragments are wrapped in `<html><body>`.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse `html` into a document tree.
pub fn parse_html(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// Local name of an element node.
pub fn element_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// Value of attribute `attr` on an element node.
pub fn attribute(handle: &Handle, attr: &str) -> Option<String> {
    match &handle.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == attr)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Whether an element's `class` attribute contains `class`.
pub fn has_class(handle: &Handle, class: &str) -> bool {
    attribute(handle, "class")
        .map(|value| value.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Depth-first, document-order walk over `handle` and its descendants.
pub fn walk(handle: &Handle, visit: &mut impl FnMut(&Handle)) {
    visit(handle);
    for child in handle.children.borrow().iter() {
        walk(child, visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_classes_in_fragments() {
        let dom = parse_html(r#"<div class="a table-wrapper"><table></table></div><p id="x">t</p>"#);
        let mut wrappers = 0;
        let mut ids = Vec::new();
        walk(&dom.document, &mut |node| {
            if has_class(node, "table-wrapper") {
                wrappers += 1;
                assert_eq!(element_name(node).as_deref(), Some("div"));
            }
            if let Some(id) = attribute(node, "id") {
                ids.push(id);
            }
        });
        assert_eq!(wrappers, 1);
        assert_eq!(ids, vec!["x"]);
    }
}
