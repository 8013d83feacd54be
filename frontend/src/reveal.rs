use std::collections::HashSet;

/// Marks elements that fade in when scrolled into view.
pub const REVEAL_KEY_ATTR: &str = "data-reveal";
pub const LAZY_KEY_ATTR: &str = "data-lazy";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// One-way visibility bookkeeping for fade-ins and lazy images.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    loaded: bool,
    revealed: HashSet<String>,
    images: HashSet<String>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches pending elements from `loading` to `loaded`. Happens once.
    pub fn mark_loaded(&mut self) -> bool {
        !std::mem::replace(&mut self.loaded, true)
    }

    /// First intersection of a fade-in element. Later ones are ignored.
    pub fn reveal(&mut self, key: &str) -> bool {
        self.revealed.insert(key.to_string())
    }

    /// First intersection of a lazy image; its real source should load now.
    pub fn load_image(&mut self, key: &str) -> bool {
        self.images.insert(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_is_one_way() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.reveal("feature-1"));
        assert!(!tracker.reveal("feature-1"));
        assert!(tracker.reveal("feature-2"));
    }

    #[test]
    fn loaded_only_once() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.mark_loaded());
        assert!(!tracker.mark_loaded());
    }

    #[test]
    fn images_load_once() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.load_image("hero"));
        assert!(!tracker.load_image("hero"));
    }
}
