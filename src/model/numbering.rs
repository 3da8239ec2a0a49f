//! Display numbers for sections, subsections and cross-references.
//!
//! Numbers are 1-based and derived from array position, so they are recomputed
//! on every render rather than stored.

use super::Section;

/// Sentinel rendered for a cross-reference that resolves to nothing.
pub const DANGLING_REF: &str = "?";

/// Ordinal of the section `id`, or `""` if there is no such section.
///
/// ```
/// use pireader::model::{Section, section_number};
///
/// let sections = vec![
///     Section { id: "a".into(), ..Default::default() },
///     Section { id: "b".into(), ..Default::default() },
/// ];
/// assert_eq!(section_number(&sections, "b"), "2");
/// assert_eq!(section_number(&sections, "z"), "");
/// ```
pub fn section_number(sections: &[Section], id: &str) -> String {
    sections
        .iter()
        .position(|s| s.id == id)
        .map(|idx| (idx + 1).to_string())
        .unwrap_or_default()
}

/// Dotted number `"{parent}.{sub}"` of `sub_id` under `parent_id`.
///
/// Returns `""` when the parent is missing or does not own the subsection.
pub fn sub_number(sections: &[Section], parent_id: &str, sub_id: &str) -> String {
    let Some(parent_idx) = sections.iter().position(|s| s.id == parent_id) else {
        return String::new();
    };
    sections[parent_idx]
        .subsections
        .iter()
        .position(|sub| sub.id == sub_id)
        .map(|sub_idx| format!("{}.{}", parent_idx + 1, sub_idx + 1))
        .unwrap_or_default()
}

/// Number for a cross-reference target: the section ordinal, the dotted
/// subsection number, or [`DANGLING_REF`].
pub fn ref_number(sections: &[Section], id: &str) -> String {
    if let Some(idx) = sections.iter().position(|s| s.id == id) {
        return (idx + 1).to_string();
    }
    for (parent_idx, parent) in sections.iter().enumerate() {
        if let Some(sub_idx) = parent.subsections.iter().position(|sub| sub.id == id) {
            return format!("{}.{}", parent_idx + 1, sub_idx + 1);
        }
    }
    DANGLING_REF.to_string()
}
