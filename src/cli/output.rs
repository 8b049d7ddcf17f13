use serde::Serialize;

use crate::model::Item;
use crate::select::{Interaction, Resolved, Selection};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CandidateJson<'a> {
    pub key: &'a str,
    pub display: &'a str,
    pub checked: bool,
}

#[derive(Serialize)]
pub struct StateJson<'a> {
    pub selected: &'a [Item],
    pub query: &'a str,
    /// -1 while the text input has focus
    pub active: i64,
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<&'a str>,
    /// Number of value-change notifications the run produced
    pub changes: usize,
}

impl<'a> From<&Resolved<'a>> for CandidateJson<'a> {
    fn from(r: &Resolved<'a>) -> Self {
        CandidateJson {
            key: &r.item.key,
            display: &r.item.display,
            checked: r.checked,
        }
    }
}

/// Active index in the -1-means-input convention
pub fn active_number(state: &Interaction) -> i64 {
    state.active_index().map_or(-1, |i| i as i64)
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Accepted selection: one key per line.
pub fn format_selection(values: &Selection) -> String {
    values.keys().map(|k| format!("{}\n", k)).collect()
}

/// Filter results: `✓ key<TAB>display` for selected, two spaces otherwise.
pub fn format_candidates(rows: &[Resolved<'_>]) -> String {
    rows.iter()
        .map(|r| {
            let mark = if r.checked { "\u{2713}" } else { " " };
            format!("{} {}\t{}\n", mark, r.item.key, r.item.display)
        })
        .collect()
}

pub fn format_state(state: &StateJson<'_>) -> String {
    let selected: Vec<&str> = state.selected.iter().map(|i| i.key.as_str()).collect();
    let mut out = String::new();
    out.push_str(&format!("selected: {}\n", selected.join(", ")));
    out.push_str(&format!("query: {}\n", state.query));
    out.push_str(&format!("active: {}\n", state.active));
    out.push_str(&format!("open: {}\n", state.open));
    if let Some(key) = state.highlighted {
        out.push_str(&format!("highlighted: {}\n", key));
    }
    out.push_str(&format!("changes: {}\n", state.changes));
    out
}
