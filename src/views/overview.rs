//! The overview page.

use crate::model::{Manifest, OverviewBlock, Section, ref_number};
use crate::render::escape_html;

/// Overview of a product: an optional lead block followed by bulleted blocks
/// whose bullets cross-reference sections.
#[derive(Debug, Clone, Copy)]
pub struct Overview<'a> {
    blocks: &'a [OverviewBlock],
    sections: &'a [Section],
    product_overview: Option<&'a str>,
    error: Option<&'a str>,
}

impl<'a> Overview<'a> {
    /// `error` is the manifest load failure, if any.
    pub fn new(manifest: &'a Manifest, error: Option<&'a str>) -> Self {
        Self {
            blocks: &manifest.overview_sections,
            sections: &manifest.sections,
            product_overview: manifest.product.overview.as_deref(),
            error,
        }
    }

    /// The first block, when it carries lead content.
    pub fn lead(&self) -> Option<&'a OverviewBlock> {
        self.blocks
            .first()
            .filter(|block| block.content.as_deref().is_some_and(|c| !c.is_empty()))
    }

    /// Blocks rendered as bulleted sections.
    pub fn rest(&self) -> &'a [OverviewBlock] {
        match self.lead() {
            Some(_) => &self.blocks[1..],
            None => self.blocks,
        }
    }

    /// Clickable reference ids in document order.
    pub fn refs(&self) -> Vec<&'a str> {
        self.rest()
            .iter()
            .flat_map(|block| &block.bullets)
            .flat_map(|bullet| &bullet.refs)
            .map(String::as_str)
            .collect()
    }

    pub fn render(&self) -> String {
        let mut html = String::from("<div id=\"overview\">");

        if let Some(lead) = self.lead() {
            html.push_str(&format!(
                "<div><h1>{}</h1><span>{}</span></div>",
                escape_html(&lead.title),
                lead.content.as_deref().unwrap_or_default()
            ));
        }

        if let Some(error) = self.error {
            html.push_str(&format!("<p>Error: {}</p>", escape_html(error)));
        } else if self.rest().is_empty() {
            let fallback = self.product_overview.unwrap_or("Loading content…");
            html.push_str(&format!("<p>{}</p>", escape_html(fallback)));
        } else {
            html.push_str("<div>");
            for block in self.rest() {
                self.render_block(&mut html, block);
            }
            html.push_str("</div>");
        }

        html.push_str("</div>");
        html
    }

    fn render_block(&self, html: &mut String, block: &OverviewBlock) {
        html.push_str(&format!("<div><h2>{}</h2>", escape_html(&block.title)));
        if !block.bullets.is_empty() {
            html.push_str("<ul>");
            for bullet in &block.bullets {
                html.push_str(&format!("<li><span>{}</span>", bullet.text));
                if !bullet.refs.is_empty() {
                    html.push_str("<span>");
                    for id in &bullet.refs {
                        html.push_str(&format!(
                            "<a class=\"internal-link\" href=\"#{}\">{}</a>",
                            escape_html(id),
                            ref_number(self.sections, id)
                        ));
                    }
                    html.push_str("</span>");
                }
                html.push_str("</li>");
            }
            html.push_str("</ul>");
        }
        html.push_str("</div>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bullet, Subsection};

    fn manifest() -> Manifest {
        Manifest {
            overview_sections: vec![
                OverviewBlock {
                    title: "About".into(),
                    content: Some("<em>Lead</em>".into()),
                    bullets: vec![],
                },
                OverviewBlock {
                    title: "Key points".into(),
                    content: None,
                    bullets: vec![Bullet {
                        text: "Dose <b>once</b>".into(),
                        refs: vec!["dosage".into(), "renal".into(), "gone".into()],
                    }],
                },
            ],
            sections: vec![
                Section {
                    id: "indications".into(),
                    title: "Indications".into(),
                    ..Default::default()
                },
                Section {
                    id: "dosage".into(),
                    title: "Dosage".into(),
                    subsections: vec![Subsection {
                        id: "renal".into(),
                        title: "Renal".into(),
                        ..Default::default()
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_lead_and_refs() {
        let manifest = manifest();
        let overview = Overview::new(&manifest, None);
        assert_eq!(overview.lead().map(|b| b.title.as_str()), Some("About"));
        assert_eq!(overview.rest().len(), 1);
        assert_eq!(overview.refs(), vec!["dosage", "renal", "gone"]);

        let html = overview.render();
        assert!(html.contains("<h1>About</h1><span><em>Lead</em></span>"));
        assert!(html.contains("<h2>Key points</h2>"));
        assert!(html.contains("<a class=\"internal-link\" href=\"#dosage\">2</a>"));
        assert!(html.contains("<a class=\"internal-link\" href=\"#renal\">2.1</a>"));
        assert!(html.contains("<a class=\"internal-link\" href=\"#gone\">?</a>"));
    }

    #[test]
    fn test_first_block_without_content_is_not_lead() {
        let mut manifest = manifest();
        manifest.overview_sections.remove(0);
        let overview = Overview::new(&manifest, None);
        assert!(overview.lead().is_none());
        assert_eq!(overview.rest().len(), 1);
        assert!(!overview.render().contains("<h1>"));

        let mut manifest = self::manifest();
        manifest.overview_sections[0].content = Some(String::new());
        let overview = Overview::new(&manifest, None);
        assert!(overview.lead().is_none());
        assert_eq!(overview.rest().len(), 2);
        let html = overview.render();
        assert!(!html.contains("<h1>"));
        assert!(html.contains("<h2>About</h2>"));
    }

    #[test]
    fn test_error_replaces_blocks() {
        let manifest = manifest();
        let html = Overview::new(&manifest, Some("Failed to fetch x: 500")).render();
        assert!(html.contains("<p>Error: Failed to fetch x: 500</p>"));
        assert!(!html.contains("Key points"));
    }

    #[test]
    fn test_fallbacks() {
        let mut manifest = Manifest::default();
        assert!(
            Overview::new(&manifest, None)
                .render()
                .contains("<p>Loading content…</p>")
        );

        manifest.product.overview = Some("A kinase inhibitor.".into());
        assert!(
            Overview::new(&manifest, None)
                .render()
                .contains("<p>A kinase inhibitor.</p>")
        );
    }
}
