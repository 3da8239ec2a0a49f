//! Scroll-shadow indicators for wide tables.
//!
//! Provider markup wraps wide tables in `.table-wrapper` elements. While a
//! body is displayed, each wrapper carries `can-scroll-left` /
//! `can-scroll-right` classes derived from its horizontal scroll position.
//! The trackers live in a [`ShadowScope`] that is attached when a body's
//! markup is rendered and released when the view is torn down or its
//! location changes.

use std::cell::Cell;
use std::rc::Rc;

use tracing::debug;

use super::dom::{has_class, parse_html, walk};

/// Class marking a horizontally scrollable table container.
pub const TABLE_WRAPPER_CLASS: &str = "table-wrapper";
pub const CAN_SCROLL_LEFT: &str = "can-scroll-left";
pub const CAN_SCROLL_RIGHT: &str = "can-scroll-right";

/// Pixels of slack before a shadow appears.
const EDGE_TOLERANCE: f64 = 2.0;

/// Horizontal scroll geometry of one wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_left: f64,
    pub scroll_width: f64,
    pub client_width: f64,
}

/// Shadow classes of one wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShadowClasses {
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
}

impl ShadowClasses {
    pub fn from_metrics(m: ScrollMetrics) -> Self {
        Self {
            can_scroll_left: m.scroll_left > EDGE_TOLERANCE,
            can_scroll_right: m.scroll_left < m.scroll_width - m.client_width - EDGE_TOLERANCE,
        }
    }

    /// Class names to apply, in a stable order.
    pub fn class_names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.can_scroll_left {
            names.push(CAN_SCROLL_LEFT);
        }
        if self.can_scroll_right {
            names.push(CAN_SCROLL_RIGHT);
        }
        names
    }
}

/// Identity of the container a scope is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerKey {
    pub location: String,
    pub mount: u64,
}

/// Counts live scopes so that release is observable.
#[derive(Debug, Clone, Default)]
pub struct ShadowRegistry {
    live: Rc<Cell<usize>>,
}

impl ShadowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_scopes(&self) -> usize {
        self.live.get()
    }

    /// Attach trackers to every table wrapper in `html`.
    ///
    /// Each tracker starts from zeroed metrics, which shows no shadow until
    /// the first scroll or resize measurement arrives.
    pub fn attach(&self, key: ContainerKey, html: &str) -> ShadowScope {
        let dom = parse_html(html);
        let mut trackers = Vec::new();
        walk(&dom.document, &mut |node| {
            if has_class(node, TABLE_WRAPPER_CLASS) {
                trackers.push(ShadowClasses::default());
            }
        });
        self.live.set(self.live.get() + 1);
        debug!(location = %key.location, wrappers = trackers.len(), "shadow scope attached");
        ShadowScope {
            key,
            trackers,
            registry: self.clone(),
        }
    }
}

/// Trackers for one rendered body. Dropping the scope detaches them.
#[derive(Debug)]
pub struct ShadowScope {
    key: ContainerKey,
    trackers: Vec<ShadowClasses>,
    registry: ShadowRegistry,
}

impl ShadowScope {
    pub fn key(&self) -> &ContainerKey {
        &self.key
    }

    /// Number of table wrappers found in the markup.
    pub fn wrapper_count(&self) -> usize {
        self.trackers.len()
    }

    /// Current classes of the wrapper at `index` (document order).
    pub fn classes(&self, index: usize) -> Option<ShadowClasses> {
        self.trackers.get(index).copied()
    }

    /// Re-evaluate wrapper `index` after a scroll or resize.
    pub fn update(&mut self, index: usize, metrics: ScrollMetrics) -> Option<ShadowClasses> {
        let tracker = self.trackers.get_mut(index)?;
        *tracker = ShadowClasses::from_metrics(metrics);
        Some(*tracker)
    }
}

impl Drop for ShadowScope {
    fn drop(&mut self) {
        let live = self.registry.live.get();
        self.registry.live.set(live.saturating_sub(1));
        debug!(location = %self.key.location, "shadow scope released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLES: &str = r#"
        <div class="table-wrapper"><table><tr><td>1</td></tr></table></div>
        <p>between</p>
        <div class="wide table-wrapper"><table><tr><td>2</td></tr></table></div>
    "#;

    fn key() -> ContainerKey {
        ContainerKey {
            location: "/blocks/a.html".into(),
            mount: 1,
        }
    }

    #[test]
    fn test_classes_from_metrics() {
        let at_start = ScrollMetrics {
            scroll_left: 0.0,
            scroll_width: 900.0,
            client_width: 300.0,
        };
        assert_eq!(
            ShadowClasses::from_metrics(at_start).class_names(),
            vec![CAN_SCROLL_RIGHT]
        );

        let middle = ScrollMetrics {
            scroll_left: 300.0,
            ..at_start
        };
        assert_eq!(
            ShadowClasses::from_metrics(middle).class_names(),
            vec![CAN_SCROLL_LEFT, CAN_SCROLL_RIGHT]
        );

        // Within the 2px tolerance of the right edge
        let at_end = ScrollMetrics {
            scroll_left: 599.0,
            ..at_start
        };
        assert_eq!(
            ShadowClasses::from_metrics(at_end).class_names(),
            vec![CAN_SCROLL_LEFT]
        );

        let fits = ScrollMetrics {
            scroll_left: 0.0,
            scroll_width: 300.0,
            client_width: 300.0,
        };
        assert!(ShadowClasses::from_metrics(fits).class_names().is_empty());
    }

    #[test]
    fn test_attach_finds_wrappers() {
        let registry = ShadowRegistry::new();
        let mut scope = registry.attach(key(), TABLES);
        assert_eq!(scope.wrapper_count(), 2);
        assert_eq!(scope.classes(1), Some(ShadowClasses::default()));

        let updated = scope.update(
            1,
            ScrollMetrics {
                scroll_left: 10.0,
                scroll_width: 500.0,
                client_width: 200.0,
            },
        );
        assert_eq!(
            updated,
            Some(ShadowClasses {
                can_scroll_left: true,
                can_scroll_right: true
            })
        );
        assert_eq!(scope.update(2, ScrollMetrics::default()), None);
    }

    #[test]
    fn test_drop_releases_scope() {
        let registry = ShadowRegistry::new();
        let first = registry.attach(key(), TABLES);
        let second = registry.attach(key(), "<p>no tables</p>");
        assert_eq!(registry.live_scopes(), 2);
        assert_eq!(second.wrapper_count(), 0);

        drop(first);
        assert_eq!(registry.live_scopes(), 1);
        drop(second);
        assert_eq!(registry.live_scopes(), 0);
    }
}
