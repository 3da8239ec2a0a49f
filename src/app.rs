//! Root composition: the reader.
//!
//! A [`Reader`] owns the loaded manifest, the [`Navigator`], the glossary
//! search text and the body mounted for the active content view. User input
//! arrives as [`Action`]s through [`Reader::dispatch`]; the page is rendered
//! from current state by [`Reader::render_page`].

use tracing::{debug, info, warn};

use crate::model::{BodyFormat, Manifest, Section, section_number, sub_number};
use crate::nav::{Location, NavState, Navigator, ReservedView, ViewId};
use crate::provider::ContentProvider;
use crate::render::{
    BodyState, ExternalBody, ScrollMetrics, SectionBody, ShadowClasses, ShadowRegistry,
    ShadowScope, class_list, escape_html, html_to_text,
};
use crate::views::{Glossary, Overview, render_black_box, render_quiz};

// ============================================================================
// Actions
// ============================================================================

/// A user or browser event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Cross-reference click, bottom or main nav entry.
    Navigate(String),
    /// The location hash changed outside the reader.
    HashChanged(String),
    /// Click on a section header in the content nav or drawer.
    ToggleSection(String),
    /// Click on a subsection entry.
    SelectSubsection(String),
    /// The "Content" main-nav entry.
    OpenContent,
    OpenDrawer,
    /// Close button or overlay click.
    CloseDrawer,
    SetGlossaryQuery(String),
    /// "Show more" / "Show less" on an inline body.
    ToggleBody,
    /// Scroll or resize of the table wrapper at `index` in the loaded body.
    ScrollTable { index: usize, metrics: ScrollMetrics },
}

// ============================================================================
// Mounted bodies
// ============================================================================

/// Body of the active content view.
#[derive(Debug)]
pub enum MountedBody {
    External(ExternalBody),
    Inline(SectionBody),
}

impl MountedBody {
    pub fn render(&self) -> String {
        match self {
            MountedBody::External(body) => body.render(),
            MountedBody::Inline(body) => body.render(),
        }
    }
}

#[derive(Debug)]
struct Mount {
    view: ViewId,
    body: MountedBody,
}

// ============================================================================
// Reader
// ============================================================================

pub struct Reader<P: ContentProvider, L: Location> {
    provider: P,
    manifest: Manifest,
    load_error: Option<String>,
    navigator: Navigator<L>,
    glossary_query: String,
    mount: Option<Mount>,
    shadows: ShadowRegistry,
}

impl<P: ContentProvider, L: Location> Reader<P, L> {
    /// Load the manifest and initialize navigation from the location hash.
    ///
    /// A manifest failure is kept as [`load_error`](Self::load_error) and the
    /// reader starts with an empty manifest.
    pub fn start(provider: P, location: L) -> Self {
        let (manifest, load_error) = match provider.load_manifest() {
            Ok(manifest) => (manifest, None),
            Err(err) => {
                warn!(error = %err, "manifest load failed");
                (Manifest::default(), Some(err.to_string()))
            }
        };
        let navigator = Navigator::init(location, &manifest.sections);
        info!(active = %navigator.active(), "reader started");

        let mut reader = Self {
            provider,
            manifest,
            load_error,
            navigator,
            glossary_query: String::new(),
            mount: None,
            shadows: ShadowRegistry::new(),
        };
        reader.sync_body();
        reader
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn state(&self) -> &NavState {
        self.navigator.state()
    }

    pub fn active(&self) -> &ViewId {
        self.navigator.active()
    }

    pub fn location(&self) -> &L {
        self.navigator.location()
    }

    pub fn location_mut(&mut self) -> &mut L {
        self.navigator.location_mut()
    }

    pub fn glossary_query(&self) -> &str {
        &self.glossary_query
    }

    pub fn body(&self) -> Option<&MountedBody> {
        self.mount.as_ref().map(|mount| &mount.body)
    }

    /// Load state of the mounted external body.
    pub fn body_state(&self) -> Option<&BodyState> {
        match self.body()? {
            MountedBody::External(body) => Some(body.state()),
            MountedBody::Inline(_) => None,
        }
    }

    /// Table-shadow trackers of the mounted external body.
    pub fn shadows(&self) -> Option<&ShadowScope> {
        match self.body()? {
            MountedBody::External(body) => body.shadows(),
            MountedBody::Inline(_) => None,
        }
    }

    pub fn shadow_registry(&self) -> &ShadowRegistry {
        &self.shadows
    }

    /// Apply `action`. Returns whether the active view changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let before = self.navigator.active().clone();
        let sections = &self.manifest.sections;
        debug!(?action, "dispatch");

        match action {
            Action::Navigate(id) => {
                self.navigator.navigate_to(sections, &id);
            }
            Action::HashChanged(hash) => {
                self.navigator.hash_changed(sections, &hash);
            }
            Action::ToggleSection(id) => {
                self.navigator.toggle_section(sections, &id);
            }
            Action::SelectSubsection(id) => {
                self.navigator.select_subsection(sections, &id);
            }
            Action::OpenContent => {
                self.navigator.open_content(sections);
            }
            Action::OpenDrawer => self.navigator.open_drawer(),
            Action::CloseDrawer => self.navigator.close_drawer(),
            Action::SetGlossaryQuery(query) => self.glossary_query = query,
            Action::ToggleBody => {
                if let Some(Mount {
                    body: MountedBody::Inline(body),
                    ..
                }) = &mut self.mount
                {
                    body.toggle();
                }
            }
            Action::ScrollTable { index, metrics } => {
                self.scroll_table(index, metrics);
            }
        }

        self.sync_body();
        self.navigator.active() != &before
    }

    /// Re-evaluate one table wrapper of the loaded body.
    pub fn scroll_table(&mut self, index: usize, metrics: ScrollMetrics) -> Option<ShadowClasses> {
        match &mut self.mount {
            Some(Mount {
                body: MountedBody::External(body),
                ..
            }) => body.shadows_mut()?.update(index, metrics),
            _ => None,
        }
    }

    /// Keep the mounted body in step with the active view.
    fn sync_body(&mut self) {
        let active = self.navigator.active();
        if !active.is_content() {
            if let Some(mount) = self.mount.take() {
                debug!(view = %mount.view, "body unmounted");
            }
            return;
        }
        if self.mount.as_ref().is_some_and(|mount| &mount.view == active) {
            return;
        }

        let view = active.clone();
        // Replacing the mount drops the previous body, which revokes its loads
        self.mount = None;
        let Some(mut body) = self.body_for(&view) else {
            return;
        };
        if let MountedBody::External(external) = &mut body {
            debug!(view = %view, location = external.location(), "loading body");
            external.load(&self.provider);
        }
        self.mount = Some(Mount { view, body });
    }

    fn body_for(&self, view: &ViewId) -> Option<MountedBody> {
        match view {
            ViewId::Reserved(_) => None,
            ViewId::Section(id) => {
                let section = self.manifest.section(id)?;
                let location = match &section.body_url {
                    Some(url) => url.clone(),
                    None => self.block_location(&section.id),
                };
                Some(MountedBody::External(
                    ExternalBody::new(location, BodyFormat::Html)
                        .with_registry(self.shadows.clone()),
                ))
            }
            ViewId::Subsection { id, .. } => {
                let (_, sub) = self.manifest.subsection(id)?;
                Some(match &sub.body_url {
                    Some(url) => MountedBody::External(
                        ExternalBody::new(url.clone(), sub.body_format.clone().unwrap_or_default())
                            .with_registry(self.shadows.clone()),
                    ),
                    None => MountedBody::Inline(SectionBody::new(sub.body_md.clone())),
                })
            }
        }
    }

    /// Default body location, under the manifest's own product id.
    fn block_location(&self, section_id: &str) -> String {
        let config = self.provider.config();
        let product_id = &self.manifest.product.id;
        if product_id.is_empty() || product_id == config.product_id() {
            config.block_location(section_id)
        } else {
            config
                .clone()
                .with_product_id(product_id)
                .block_location(section_id)
        }
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Numbered outline of the section tree, one entry per line.
    pub fn outline(&self) -> String {
        let sections = &self.manifest.sections;
        let mut out = String::new();
        for section in sections {
            out.push_str(&format!(
                "{}. {} [{}]\n",
                section_number(sections, &section.id),
                section.title,
                section.id
            ));
            for sub in &section.subsections {
                out.push_str(&format!(
                    "   {}. {} [{}]\n",
                    sub_number(sections, &section.id, &sub.id),
                    sub.title,
                    sub.id
                ));
            }
        }
        out
    }

    /// Markup of the reading pane for the active view.
    pub fn render_pane(&self) -> String {
        let product_name = Some(self.manifest.product.name.as_str());
        match self.navigator.active() {
            ViewId::Reserved(ReservedView::Overview) => {
                Overview::new(&self.manifest, self.load_error()).render()
            }
            ViewId::Reserved(ReservedView::Glossary) => {
                Glossary::new(&self.manifest.glossary, &self.glossary_query).render()
            }
            ViewId::Reserved(ReservedView::Quiz) => render_quiz(&self.manifest.quiz, product_name),
            ViewId::Reserved(ReservedView::BlackBox) => render_black_box(
                self.manifest.overview_black_box_html.as_deref(),
                product_name,
            ),
            view => {
                let body = self.body().map(MountedBody::render).unwrap_or_default();
                format!("<div id=\"{}\">{body}</div>", escape_html(view.as_str()))
            }
        }
    }

    /// The reading pane as plain text.
    pub fn render_text(&self) -> String {
        html_to_text(&self.render_pane())
    }

    /// Full page: header, navigation chrome and reading pane.
    pub fn render_page(&self) -> String {
        let state = self.navigator.state();
        let mut html = String::from("<div class=\"reader\">");

        html.push_str(&format!(
            "<header class=\"reader-header\"><span class=\"brand\">{}</span></header>",
            escape_html(&self.manifest.product.name)
        ));

        if state.active().is_content() {
            html.push_str(
                "<div class=\"mobile-content-menu\"><button class=\"mobile-content-menu-btn\" \
                 aria-label=\"Open content menu\">Menu</button></div>",
            );
        }

        let open = if state.drawer_open() { " open" } else { "" };
        html.push_str(&format!(
            "<div class=\"mobile-content-drawer-overlay{open}\"></div>\
             <div class=\"mobile-content-drawer{open}\">\
             <div class=\"mobile-content-drawer-header\">\
             <span class=\"mobile-content-drawer-title\">Content</span>\
             <button class=\"mobile-content-drawer-close\" aria-label=\"Close content menu\">Close</button>\
             </div><nav class=\"mobile-content-drawer-nav\">"
        ));
        self.render_section_list(&mut html, "mobile-content-drawer");
        html.push_str("</nav></div>");

        html.push_str("<main><aside class=\"fluid-sidebar\">");
        html.push_str(&format!(
            "<div class=\"{}\"><nav class=\"fluid-nav-main\"><ul>",
            if state.show_content_nav() {
                "fluid-sidebar-wrapper connected"
            } else {
                "fluid-sidebar-wrapper"
            }
        ));
        self.render_main_items(&mut html, "fluid-nav-item");
        html.push_str("</ul></nav>");
        if state.show_content_nav() {
            html.push_str(
                "<div class=\"fluid-nav-extended\"><nav class=\"fluid-nav-sub\">\
                 <div class=\"fluid-nav-sub-header\">Content</div>",
            );
            self.render_section_list(&mut html, "fluid-nav");
            html.push_str("</nav></div>");
        }
        html.push_str("</div></aside>");

        html.push_str(&format!(
            "<section id=\"reader-top\">{}</section></main>",
            self.render_pane()
        ));

        html.push_str("<nav class=\"mobile-bottom-nav\"><ul>");
        self.render_main_items(&mut html, "mobile-nav-item");
        html.push_str("</ul></nav></div>");
        html
    }

    /// Overview, Content, Glossary, Quiz, Black Box.
    fn render_main_items(&self, html: &mut String, item_class: &str) {
        let active = self.navigator.active();
        let mut item = |href: &str, label: &str, is_active: bool| {
            html.push_str(&format!(
                "<li><a class=\"{}\" href=\"#{}\">{}</a></li>",
                class_list(item_class, is_active),
                escape_html(href),
                label
            ));
        };

        let overview = ReservedView::Overview;
        item(
            overview.as_str(),
            overview.label(),
            active == &ViewId::Reserved(overview),
        );
        let content_target = self
            .manifest
            .sections
            .first()
            .map(|s| s.id.as_str())
            .unwrap_or_default();
        let content_href = if active.is_content() {
            active.as_str()
        } else {
            content_target
        };
        item(content_href, "Content", active.is_content());
        for view in [ReservedView::Glossary, ReservedView::Quiz, ReservedView::BlackBox] {
            item(view.as_str(), view.label(), active == &ViewId::Reserved(view));
        }
    }

    /// Numbered sections with their expanded subsections.
    ///
    /// `prefix` selects the class family: `fluid-nav` for the sidebar,
    /// `mobile-content-drawer` for the drawer.
    fn render_section_list(&self, html: &mut String, prefix: &str) {
        let state = self.navigator.state();
        let sections = &self.manifest.sections;
        let (item_class, sub_list_class, sub_item_class) = if prefix == "fluid-nav" {
            (
                "fluid-nav-sub-item",
                "fluid-nav-subsections",
                "fluid-nav-subsection-item",
            )
        } else {
            (
                "mobile-content-drawer-item",
                "mobile-content-drawer-subsections",
                "mobile-content-drawer-subitem",
            )
        };

        html.push_str("<ul>");
        for section in sections {
            html.push_str(&format!(
                "<li><a class=\"{}\" href=\"#{}\" data-has-children=\"{}\" data-expanded=\"{}\">\
                 <span>{}. {}</span></a>",
                class_list(item_class, self.section_is_current(section)),
                escape_html(&section.id),
                section.is_container(),
                state.is_expanded(&section.id),
                section_number(sections, &section.id),
                escape_html(&section.title)
            ));
            if section.is_container() && state.is_expanded(&section.id) {
                html.push_str(&format!("<ul class=\"{sub_list_class}\">"));
                for sub in &section.subsections {
                    let is_active = self.navigator.active().as_str() == sub.id
                        && matches!(self.navigator.active(), ViewId::Subsection { .. });
                    html.push_str(&format!(
                        "<li><a class=\"{}\" href=\"#{}\">{}. {}</a></li>",
                        class_list(sub_item_class, is_active),
                        escape_html(&sub.id),
                        sub_number(sections, &section.id, &sub.id),
                        escape_html(&sub.title)
                    ));
                }
                html.push_str("</ul>");
            }
            html.push_str("</li>");
        }
        html.push_str("</ul>");
    }

    /// The section itself or one of its subsections is active.
    fn section_is_current(&self, section: &Section) -> bool {
        self.navigator.active().content_section() == Some(section.id.as_str())
    }
}

impl<P: ContentProvider, L: Location> std::fmt::Debug for Reader<P, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("product", &self.manifest.product.id)
            .field("load_error", &self.load_error)
            .field("state", self.navigator.state())
            .field("glossary_query", &self.glossary_query)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::model::Subsection;
    use crate::nav::MemoryLocation;
    use crate::provider::StaticProvider;

    fn manifest() -> Manifest {
        let mut manifest = Manifest::default();
        manifest.product.id = "sample-product".into();
        manifest.product.name = "Navsunli".into();
        manifest.sections = vec![
            Section {
                id: "indications".into(),
                title: "Indications".into(),
                ..Default::default()
            },
            Section {
                id: "dosage".into(),
                title: "Dosage".into(),
                subsections: vec![
                    Subsection {
                        id: "renal".into(),
                        title: "Renal impairment".into(),
                        body_md: "Reduce the dose.".into(),
                        ..Default::default()
                    },
                    Subsection {
                        id: "hepatic".into(),
                        title: "Hepatic impairment".into(),
                        body_url: Some("/content/extra/hepatic.md".into()),
                        body_format: Some(BodyFormat::Markdown),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        ];
        manifest
    }

    fn reader(hash: &str) -> Reader<StaticProvider, MemoryLocation> {
        let config = ProviderConfig::new();
        let indications = config.block_location("indications");
        let dosage = config.block_location("dosage");
        let provider = StaticProvider::new(config)
            .with_manifest(&manifest())
            .with_body(&indications, "<p>Indicated for X.</p>")
            .with_body(
                &dosage,
                r#"<div class="table-wrapper"><table><tr><td>5 mg</td></tr></table></div>"#,
            );
        Reader::start(provider, MemoryLocation::new(hash))
    }

    #[test]
    fn test_start_mounts_nothing_on_overview() {
        let reader = reader("");
        assert_eq!(reader.active(), &ViewId::Reserved(ReservedView::Overview));
        assert!(reader.body().is_none());
        assert_eq!(reader.provider().requests().len(), 1);
    }

    #[test]
    fn test_section_body_is_fetched() {
        let mut reader = reader("");
        assert!(reader.dispatch(Action::Navigate("indications".into())));
        assert_eq!(
            reader.body_state(),
            Some(&BodyState::Loaded("<p>Indicated for X.</p>".into()))
        );
        assert!(reader.render_pane().contains("Indicated for X."));
        assert_eq!(reader.render_text(), "Indicated for X.");
    }

    #[test]
    fn test_subsection_bodies() {
        let mut reader = reader("#renal");
        assert!(matches!(reader.body(), Some(MountedBody::Inline(_))));
        assert!(reader.render_pane().contains("Reduce the dose."));

        reader.dispatch(Action::SelectSubsection("hepatic".into()));
        assert_eq!(
            reader.body_state(),
            Some(&BodyState::Failed(
                "Unsupported format 'md'. Provide precompiled HTML.".into()
            ))
        );
        assert!(
            !reader
                .provider()
                .requests()
                .iter()
                .any(|r| r.ends_with("hepatic.md"))
        );
    }

    #[test]
    fn test_leaving_view_releases_shadows() {
        let mut reader = reader("#dosage");
        assert_eq!(reader.shadows().map(ShadowScope::wrapper_count), Some(1));
        assert_eq!(reader.shadow_registry().live_scopes(), 1);

        let classes = reader.scroll_table(
            0,
            ScrollMetrics {
                scroll_left: 0.0,
                scroll_width: 800.0,
                client_width: 300.0,
            },
        );
        assert_eq!(classes.map(|c| c.can_scroll_right), Some(true));

        reader.dispatch(Action::Navigate("glossary".into()));
        assert!(reader.body().is_none());
        assert_eq!(reader.shadow_registry().live_scopes(), 0);
    }

    #[test]
    fn test_same_view_keeps_mount() {
        let mut reader = reader("#indications");
        let fetched = reader.provider().requests().len();
        assert!(!reader.dispatch(Action::ToggleSection("indications".into())));
        assert_eq!(reader.provider().requests().len(), fetched);
    }

    #[test]
    fn test_glossary_query_and_toggle_body() {
        let mut reader = reader("#renal");
        reader.dispatch(Action::ToggleBody);
        reader.dispatch(Action::SetGlossaryQuery("auc".into()));
        assert_eq!(reader.glossary_query(), "auc");
        assert!(reader.dispatch(Action::Navigate("glossary".into())));
        assert!(reader.render_pane().contains("No matches"));
    }

    #[test]
    fn test_manifest_failure_surfaces_in_overview() {
        let provider = StaticProvider::new(ProviderConfig::new());
        let reader = Reader::start(provider, MemoryLocation::new("#dosage"));
        assert_eq!(
            reader.load_error(),
            Some("Failed to fetch /content/products/sample-product/content.json: 404")
        );
        assert_eq!(reader.active(), &ViewId::Reserved(ReservedView::Overview));
        assert!(reader.render_page().contains("<p>Error: Failed to fetch"));
    }

    #[test]
    fn test_page_chrome() {
        let mut reader = reader("#renal");
        let html = reader.render_page();
        assert!(html.contains("fluid-sidebar-wrapper connected"));
        assert!(html.contains("<span>2. Dosage</span>"));
        assert!(html.contains("2.1. Renal impairment"));
        assert!(html.contains("class=\"fluid-nav-subsection-item active\" href=\"#renal\""));
        assert!(html.contains("class=\"fluid-nav-sub-item active\" href=\"#dosage\""));
        assert!(html.contains("class=\"mobile-content-drawer\">"));

        reader.dispatch(Action::OpenDrawer);
        assert!(reader.render_page().contains("mobile-content-drawer open"));

        reader.dispatch(Action::Navigate("quiz".into()));
        let html = reader.render_page();
        assert!(!html.contains("fluid-nav-extended"));
        assert!(html.contains("class=\"fluid-nav-item active\" href=\"#quiz\""));
    }

    #[test]
    fn test_outline() {
        let reader = reader("");
        assert_eq!(
            reader.outline(),
            "1. Indications [indications]\n\
             2. Dosage [dosage]\n   \
             2.1. Renal impairment [renal]\n   \
             2.2. Hepatic impairment [hepatic]\n"
        );
    }
}
