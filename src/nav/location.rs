//! The browser-location seam: hash reads and writes plus the scroll reset.

/// Side effects the navigator performs on every successful navigation.
pub trait Location {
    /// Current hash without the leading `#`. Empty when unset.
    fn hash(&self) -> String;

    /// Replace the hash in place (no new history entry).
    fn replace_hash(&mut self, id: &str);

    /// Scroll the reading pane back to its top.
    fn scroll_to_top(&mut self);
}

/// In-process location used by the CLI, the WASM bindings and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLocation {
    hash: String,
    scrolls: usize,
}

impl MemoryLocation {
    /// Create a location whose hash is `hash` (a leading `#` is accepted).
    pub fn new(hash: &str) -> Self {
        Self {
            hash: strip_hash(hash).to_string(),
            scrolls: 0,
        }
    }

    /// Simulate an external hash edit or back/forward navigation.
    pub fn set_hash(&mut self, hash: &str) {
        self.hash = strip_hash(hash).to_string();
    }

    /// How many times the pane was scrolled to top.
    pub fn scroll_count(&self) -> usize {
        self.scrolls
    }
}

impl Location for MemoryLocation {
    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn replace_hash(&mut self, id: &str) {
        self.hash = id.to_string();
    }

    fn scroll_to_top(&mut self) {
        self.scrolls += 1;
    }
}

impl<L: Location + ?Sized> Location for &mut L {
    fn hash(&self) -> String {
        (**self).hash()
    }

    fn replace_hash(&mut self, id: &str) {
        (**self).replace_hash(id);
    }

    fn scroll_to_top(&mut self) {
        (**self).scroll_to_top();
    }
}

/// Strip one leading `#` from a hash string.
pub fn strip_hash(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_location_strips_hash() {
        let mut loc = MemoryLocation::new("#glossary");
        assert_eq!(loc.hash(), "glossary");
        loc.set_hash("quiz");
        assert_eq!(loc.hash(), "quiz");
        loc.replace_hash("dosage");
        loc.scroll_to_top();
        assert_eq!(loc.hash(), "dosage");
        assert_eq!(loc.scroll_count(), 1);
    }
}
