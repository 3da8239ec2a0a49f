//! Document manifest for one product label.
//!
//! The manifest is the JSON document served at
//! `{base}/products/{productId}/content.json`. It is loaded once per session
//! and never mutated afterwards; every other component borrows from it.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Public Types
// ============================================================================

/// The top-level content document for one product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overview_sections: Vec<OverviewBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview_black_box_html: Option<String>,
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub glossary: Vec<GlossaryEntry>,
    pub quiz: Quiz,
    pub submission: Submission,
}

/// Product metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub version: String,
    pub lang: String,
    /// Plain-text overview shown when no overview blocks are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
}

/// Optional theme hints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// A titled block on the overview page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewBlock {
    pub title: String,
    /// Lead markup. Only the first block's content is rendered, as the lead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<Bullet>,
}

/// A bullet item, optionally cross-referencing sections or subsections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refs: Vec<String>,
}

/// A top-level addressable content unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body_md: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_format: Option<BodyFormat>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

/// A terminal content unit nested under a [`Section`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body_md: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_format: Option<BodyFormat>,
}

/// Declared format of an external body.
///
/// Unknown values are preserved so that the renderer can name them in its
/// error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BodyFormat {
    #[default]
    Html,
    Markdown,
    Other(String),
}

/// A glossary term and its definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// Quiz definition. Only its summary is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Percentage needed to pass. Not range checked.
    pub pass_pct: f64,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default)]
    pub choices: Vec<String>,
    /// Indices into `choices` of the correct answers.
    #[serde(default)]
    pub answer: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Single,
    Multiple,
    Boolean,
}

/// Where quiz results would be submitted to the hosting page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub channel: SubmissionChannel,
    pub target_origin: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionChannel {
    #[default]
    #[serde(rename = "postMessage")]
    PostMessage,
}

// ============================================================================
// Parsing and lookups
// ============================================================================

impl Manifest {
    /// Parse a manifest from JSON text.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Look up a top-level section by id.
    pub fn section(&self, id: &str) -> Option<&Section> {
        find_section(&self.sections, id)
    }

    /// Look up a subsection by id, together with its parent section.
    pub fn subsection(&self, id: &str) -> Option<(&Section, &Subsection)> {
        find_subsection(&self.sections, id)
    }
}

impl Section {
    /// A section with a non-empty subsection list.
    pub fn is_container(&self) -> bool {
        !self.subsections.is_empty()
    }

    pub fn owns(&self, sub_id: &str) -> bool {
        self.subsections.iter().any(|sub| sub.id == sub_id)
    }
}

impl QuestionKind {
    /// Label shown in the quiz summary.
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Single => "Single choice",
            QuestionKind::Multiple => "Multiple choice",
            QuestionKind::Boolean => "True/False",
        }
    }
}

impl BodyFormat {
    pub fn as_str(&self) -> &str {
        match self {
            BodyFormat::Html => "html",
            BodyFormat::Markdown => "md",
            BodyFormat::Other(other) => other,
        }
    }
}

impl From<String> for BodyFormat {
    fn from(value: String) -> Self {
        match value.as_str() {
            "html" => BodyFormat::Html,
            "md" => BodyFormat::Markdown,
            _ => BodyFormat::Other(value),
        }
    }
}

impl From<BodyFormat> for String {
    fn from(value: BodyFormat) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find a top-level section by id.
pub fn find_section<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.id == id)
}

/// Find the section that owns the subsection `sub_id`.
pub fn find_parent<'a>(sections: &'a [Section], sub_id: &str) -> Option<&'a Section> {
    sections.iter().find(|s| s.owns(sub_id))
}

/// Find a subsection by id, returning its parent too.
pub fn find_subsection<'a>(
    sections: &'a [Section],
    sub_id: &str,
) -> Option<(&'a Section, &'a Subsection)> {
    sections.iter().find_map(|parent| {
        parent
            .subsections
            .iter()
            .find(|sub| sub.id == sub_id)
            .map(|sub| (parent, sub))
    })
}
