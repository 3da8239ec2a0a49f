//! Addressable views.

use std::fmt;

use crate::model::{Section, find_parent, find_section};

/// Views that are not derived from the section tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedView {
    Overview,
    Glossary,
    Quiz,
    BlackBox,
}

impl ReservedView {
    pub const ALL: [ReservedView; 4] = [
        ReservedView::Overview,
        ReservedView::Glossary,
        ReservedView::Quiz,
        ReservedView::BlackBox,
    ];

    /// Id used in the URL hash.
    pub fn as_str(self) -> &'static str {
        match self {
            ReservedView::Overview => "overview",
            ReservedView::Glossary => "glossary",
            ReservedView::Quiz => "quiz",
            ReservedView::BlackBox => "blackbox",
        }
    }

    /// Label shown in the main and bottom navigation.
    pub fn label(self) -> &'static str {
        match self {
            ReservedView::Overview => "Overview",
            ReservedView::Glossary => "Glossary",
            ReservedView::Quiz => "Quiz",
            ReservedView::BlackBox => "Black Box",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|view| view.as_str() == id)
    }
}

/// The single active view of the reader.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewId {
    Reserved(ReservedView),
    Section(String),
    Subsection { parent: String, id: String },
}

impl ViewId {
    /// Classify `id` against the section tree.
    ///
    /// Reserved ids win over section ids of the same name. Returns `None` for
    /// an id that names nothing.
    pub fn parse(sections: &[Section], id: &str) -> Option<Self> {
        if let Some(view) = ReservedView::from_id(id) {
            return Some(ViewId::Reserved(view));
        }
        if let Some(section) = find_section(sections, id) {
            return Some(ViewId::Section(section.id.clone()));
        }
        find_parent(sections, id).map(|parent| ViewId::Subsection {
            parent: parent.id.clone(),
            id: id.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            ViewId::Reserved(view) => view.as_str(),
            ViewId::Section(id) => id,
            ViewId::Subsection { id, .. } => id,
        }
    }

    /// True for section and subsection views.
    pub fn is_content(&self) -> bool {
        !matches!(self, ViewId::Reserved(_))
    }

    /// The section highlighted in the content nav for this view.
    pub fn content_section(&self) -> Option<&str> {
        match self {
            ViewId::Reserved(_) => None,
            ViewId::Section(id) => Some(id),
            ViewId::Subsection { parent, .. } => Some(parent),
        }
    }
}

impl Default for ViewId {
    fn default() -> Self {
        ViewId::Reserved(ReservedView::Overview)
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Subsection;

    fn sections() -> Vec<Section> {
        vec![
            Section {
                id: "dosage".into(),
                subsections: vec![Subsection {
                    id: "dosage-adults".into(),
                    ..Default::default()
                }],
                ..Default::default()
            },
            Section {
                id: "quiz".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn parse_classifies_ids() {
        let sections = sections();
        assert_eq!(
            ViewId::parse(&sections, "glossary"),
            Some(ViewId::Reserved(ReservedView::Glossary))
        );
        assert_eq!(
            ViewId::parse(&sections, "dosage"),
            Some(ViewId::Section("dosage".into()))
        );
        assert_eq!(
            ViewId::parse(&sections, "dosage-adults"),
            Some(ViewId::Subsection {
                parent: "dosage".into(),
                id: "dosage-adults".into()
            })
        );
        assert_eq!(ViewId::parse(&sections, "nonexistent"), None);
        assert_eq!(ViewId::parse(&sections, ""), None);
    }

    #[test]
    fn reserved_ids_shadow_sections() {
        assert_eq!(
            ViewId::parse(&sections(), "quiz"),
            Some(ViewId::Reserved(ReservedView::Quiz))
        );
    }

    #[test]
    fn content_section_of_subsection_is_parent() {
        let view = ViewId::parse(&sections(), "dosage-adults").unwrap();
        assert!(view.is_content());
        assert_eq!(view.content_section(), Some("dosage"));
        assert_eq!(view.as_str(), "dosage-adults");
        assert!(!ViewId::default().is_content());
        assert_eq!(ViewId::default().to_string(), "overview");
    }
}
