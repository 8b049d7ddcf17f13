use std::collections::HashSet;

use crate::model::Item;

/// Outcome of [`Selection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    /// Removed from this position.
    Removed(usize),
}

/// The ordered list of chosen items. Keys are unique; order is insertion
/// order and removing an item never reorders the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<Item>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a host-provided list. Blank items are dropped and later
    /// duplicates of a key are ignored.
    pub fn from_seed(seed: impl IntoIterator<Item = Item>) -> Self {
        let mut seen = HashSet::new();
        let items = seed
            .into_iter()
            .filter(|item| !item.is_blank())
            .filter(|item| seen.insert(item.key.clone()))
            .collect();
        Selection { items }
    }

    /// Remove `item` if its key is present, otherwise append it.
    pub fn toggle(&mut self, item: Item) -> Toggled {
        match self.position(&item.key) {
            Some(index) => {
                self.items.remove(index);
                Toggled::Removed(index)
            }
            None => {
                self.items.push(item);
                Toggled::Added
            }
        }
    }

    /// Toggled copy, leaving `self` untouched.
    pub fn toggled(&self, item: Item) -> Selection {
        let mut next = self.clone();
        next.toggle(item);
        next
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|item| item.key.as_str())
    }

    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
