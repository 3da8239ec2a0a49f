//! The navigation state container.
//!
//! [`Navigator`] owns the active view, the sidebar expansion set and the
//! mobile drawer flag. Every transition goes through one of its methods.
//! Derived values are recomputed after the active view changes, using the
//! pure functions [`show_content_nav`] and [`accordion`].

use std::collections::BTreeSet;

use tracing::{debug, trace};

use super::location::{Location, strip_hash};
use super::view::ViewId;
use crate::model::{Section, find_section};

// ============================================================================
// State
// ============================================================================

/// Navigation state. Read-only outside the navigator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    active: ViewId,
    expanded: BTreeSet<String>,
    show_content_nav: bool,
    drawer_open: bool,
}

impl NavState {
    pub fn active(&self) -> &ViewId {
        &self.active
    }

    /// Section ids expanded in the sidebar.
    pub fn expanded(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    pub fn is_expanded(&self, section_id: &str) -> bool {
        self.expanded.contains(section_id)
    }

    pub fn show_content_nav(&self) -> bool {
        self.show_content_nav
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }
}

// ============================================================================
// Derivations
// ============================================================================

/// Whether the content nav is shown for `active`.
pub fn show_content_nav(active: &ViewId) -> bool {
    active.is_content()
}

/// Expansion set after `active` settles.
///
/// A container section expands alone, a leaf section collapses everything, a
/// subsection expands only its parent. Reserved views keep `previous`.
pub fn accordion(
    sections: &[Section],
    active: &ViewId,
    previous: &BTreeSet<String>,
) -> BTreeSet<String> {
    match active {
        ViewId::Reserved(_) => previous.clone(),
        ViewId::Section(id) => match find_section(sections, id) {
            Some(section) if section.is_container() => BTreeSet::from([id.clone()]),
            _ => BTreeSet::new(),
        },
        ViewId::Subsection { parent, .. } => BTreeSet::from([parent.clone()]),
    }
}

// ============================================================================
// Navigator
// ============================================================================

/// Owns [`NavState`] and performs the location side effects of navigation.
#[derive(Debug)]
pub struct Navigator<L: Location> {
    location: L,
    state: NavState,
}

impl<L: Location> Navigator<L> {
    /// Initialize from the location's hash.
    ///
    /// A hash naming a reserved view, section or subsection is activated
    /// directly; anything else falls back to the overview. The hash itself is
    /// left as found.
    pub fn init(location: L, sections: &[Section]) -> Self {
        let hash = location.hash();
        let active = ViewId::parse(sections, strip_hash(&hash)).unwrap_or_default();
        debug!(hash = %hash, active = %active, "navigator initialized");

        let mut nav = Self {
            location,
            state: NavState::default(),
        };
        nav.state.active = active;
        nav.settle(sections);
        nav
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn active(&self) -> &ViewId {
        &self.state.active
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    pub fn into_location(self) -> L {
        self.location
    }

    /// Navigate to a reserved view, section or subsection.
    ///
    /// Returns `false` and leaves the state untouched for an empty or unknown
    /// id.
    pub fn navigate_to(&mut self, sections: &[Section], id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        let Some(target) = ViewId::parse(sections, id) else {
            trace!(id, "ignoring unknown navigation target");
            return false;
        };
        self.activate(sections, target);
        true
    }

    /// React to a hash change (back/forward or an external edit).
    ///
    /// Unlike [`init`](Self::init) there is no fallback: an unknown hash
    /// leaves the current view in place.
    pub fn hash_changed(&mut self, sections: &[Section], hash: &str) -> bool {
        self.navigate_to(sections, strip_hash(hash))
    }

    /// A click on a section header in the content nav or drawer.
    ///
    /// Containers flip their own expansion before the section is activated.
    /// If the click changes the active view the accordion rule then re-asserts
    /// the section as the sole expanded one. Leaf sections close the drawer.
    pub fn toggle_section(&mut self, sections: &[Section], id: &str) -> bool {
        let Some(section) = find_section(sections, id) else {
            trace!(id, "ignoring toggle of unknown section");
            return false;
        };
        let is_container = section.is_container();
        if is_container && !self.state.expanded.remove(id) {
            self.state.expanded.insert(id.to_string());
        }
        self.activate(sections, ViewId::Section(section.id.clone()));
        if !is_container {
            self.state.drawer_open = false;
        }
        true
    }

    /// A click on a subsection entry. Always closes the drawer.
    pub fn select_subsection(&mut self, sections: &[Section], id: &str) -> bool {
        match ViewId::parse(sections, id) {
            Some(target @ ViewId::Subsection { .. }) => {
                self.activate(sections, target);
                self.state.drawer_open = false;
                true
            }
            _ => {
                trace!(id, "ignoring selection of unknown subsection");
                false
            }
        }
    }

    /// The "Content" entry of the main nav: jump to the first section unless
    /// a content view is already active.
    pub fn open_content(&mut self, sections: &[Section]) -> bool {
        if self.state.active.is_content() {
            return false;
        }
        match sections.first() {
            Some(first) => {
                let id = first.id.clone();
                self.navigate_to(sections, &id)
            }
            None => false,
        }
    }

    pub fn open_drawer(&mut self) {
        self.state.drawer_open = true;
    }

    /// Explicit close or a click on the overlay.
    pub fn close_drawer(&mut self) {
        self.state.drawer_open = false;
    }

    fn activate(&mut self, sections: &[Section], target: ViewId) {
        let changed = self.state.active != target;
        debug!(from = %self.state.active, to = %target, "navigate");
        self.state.active = target;
        self.location.scroll_to_top();
        self.location.replace_hash(self.state.active.as_str());
        if changed {
            self.settle(sections);
        }
    }

    /// Recompute derived state after `active` changed.
    fn settle(&mut self, sections: &[Section]) {
        self.state.expanded = accordion(sections, &self.state.active, &self.state.expanded);
        self.state.show_content_nav = show_content_nav(&self.state.active);
    }
}
