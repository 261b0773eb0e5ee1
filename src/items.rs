//! In-memory item list shown on the index page.

use parking_lot::RwLock;

/// Append-only list of non-empty text items, kept in insertion order.
///
/// Lives only as long as the process.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<Vec<String>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trim `text` and append it. Returns `false` and leaves the list
    /// untouched when nothing is left after trimming.
    pub fn add(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.items.write().push(text.to_string());
        true
    }

    /// Snapshot of all items in insertion order.
    pub fn list(&self) -> Vec<String> {
        self.items.read().clone()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}
