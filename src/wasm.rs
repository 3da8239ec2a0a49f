//! WASM bindings for browser shells.
//!
//! Exposes the navigation engine and numbering to JavaScript. The shell owns
//! the real `location` and DOM: after each call it writes [`ReaderNav::hash`]
//! back with `history.replaceState` and scrolls when
//! [`ReaderNav::scroll_count`] advanced.

use wasm_bindgen::prelude::*;

use crate::model::{Manifest, Section, ref_number, section_number, sub_number};
use crate::nav::{Location, MemoryLocation, Navigator};
use crate::views::filter_glossary;

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Navigation state for one loaded manifest.
#[wasm_bindgen]
pub struct ReaderNav {
    manifest: Manifest,
    nav: Navigator<MemoryLocation>,
}

impl ReaderNav {
    fn sections(&self) -> &[Section] {
        &self.manifest.sections
    }
}

#[wasm_bindgen]
impl ReaderNav {
    /// Parse `manifest_json` and initialize from the page's current `hash`.
    #[wasm_bindgen(constructor)]
    pub fn new(manifest_json: &str, hash: &str) -> Result<ReaderNav, JsValue> {
        let manifest =
            Manifest::from_json(manifest_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let nav = Navigator::init(MemoryLocation::new(hash), &manifest.sections);
        Ok(ReaderNav { manifest, nav })
    }

    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&mut self, id: &str) -> bool {
        self.nav.navigate_to(&self.manifest.sections, id)
    }

    #[wasm_bindgen(js_name = hashChanged)]
    pub fn hash_changed(&mut self, hash: &str) -> bool {
        self.nav.hash_changed(&self.manifest.sections, hash)
    }

    #[wasm_bindgen(js_name = toggleSection)]
    pub fn toggle_section(&mut self, id: &str) -> bool {
        self.nav.toggle_section(&self.manifest.sections, id)
    }

    #[wasm_bindgen(js_name = selectSubsection)]
    pub fn select_subsection(&mut self, id: &str) -> bool {
        self.nav.select_subsection(&self.manifest.sections, id)
    }

    #[wasm_bindgen(js_name = openContent)]
    pub fn open_content(&mut self) -> bool {
        self.nav.open_content(&self.manifest.sections)
    }

    #[wasm_bindgen(js_name = openDrawer)]
    pub fn open_drawer(&mut self) {
        self.nav.open_drawer();
    }

    #[wasm_bindgen(js_name = closeDrawer)]
    pub fn close_drawer(&mut self) {
        self.nav.close_drawer();
    }

    /// Active view id.
    pub fn active(&self) -> String {
        self.nav.active().as_str().to_string()
    }

    /// Hash to write back, without the leading `#`.
    pub fn hash(&self) -> String {
        self.nav.location().hash()
    }

    #[wasm_bindgen(js_name = scrollCount)]
    pub fn scroll_count(&self) -> usize {
        self.nav.location().scroll_count()
    }

    /// Expanded section ids.
    pub fn expanded(&self) -> Vec<String> {
        self.nav.state().expanded().iter().cloned().collect()
    }

    #[wasm_bindgen(js_name = showContentNav)]
    pub fn show_content_nav(&self) -> bool {
        self.nav.state().show_content_nav()
    }

    #[wasm_bindgen(js_name = drawerOpen)]
    pub fn drawer_open(&self) -> bool {
        self.nav.state().drawer_open()
    }

    #[wasm_bindgen(js_name = sectionNumber)]
    pub fn section_number(&self, id: &str) -> String {
        section_number(self.sections(), id)
    }

    #[wasm_bindgen(js_name = subNumber)]
    pub fn sub_number(&self, parent_id: &str, sub_id: &str) -> String {
        sub_number(self.sections(), parent_id, sub_id)
    }

    #[wasm_bindgen(js_name = refNumber)]
    pub fn ref_number(&self, id: &str) -> String {
        ref_number(self.sections(), id)
    }

    /// Glossary terms matching `query`, in manifest order.
    #[wasm_bindgen(js_name = glossaryTerms)]
    pub fn glossary_terms(&self, query: &str) -> Vec<String> {
        filter_glossary(&self.manifest.glossary, query)
            .into_iter()
            .map(|entry| entry.term.clone())
            .collect()
    }
}
