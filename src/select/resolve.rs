use crate::model::Item;

use super::store::Selection;

/// A candidate ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub item: &'a Item,
    /// Already in the selection; activating it again removes it.
    pub checked: bool,
}

/// Candidates whose display text contains `query`, in candidate order.
/// Case-insensitive; an empty query matches everything.
pub fn filter<'a>(
    candidates: &'a [Item],
    query: &str,
) -> impl Iterator<Item = &'a Item> + use<'a> {
    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(move |item| needle.is_empty() || item.display.to_lowercase().contains(&needle))
}

/// Filtered candidates, each marked with whether it is already selected.
pub fn resolve<'a>(
    candidates: &'a [Item],
    selection: &'a Selection,
    query: &str,
) -> impl Iterator<Item = Resolved<'a>> + use<'a> {
    filter(candidates, query).map(move |item| Resolved {
        item,
        checked: selection.contains(&item.key),
    })
}
