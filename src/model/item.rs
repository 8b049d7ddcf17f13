use serde::{Deserialize, Serialize};

/// A selectable entry: `key` identifies it, `display` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub display: String,
}

impl Item {
    pub fn new(key: impl Into<String>, display: impl Into<String>) -> Self {
        Item {
            key: key.into(),
            display: display.into(),
        }
    }

    /// An item with an empty key or label carries nothing worth showing.
    pub fn is_blank(&self) -> bool {
        self.key.is_empty() || self.display.is_empty()
    }
}
