//! Keyboard routing for the selected-item row.
//!
//! [`route`] is a pure function: it looks at one key press and the current
//! interaction state and says what should happen. The controller applies the
//! answer. Keys the router does not claim fall through to the text input.

use crate::model::Direction;

/// Keys the picker understands, independent of any terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Backspace,
    Delete,
    Enter,
    Escape,
    Tab,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub ctrl: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        KeyPress {
            key,
            shift: false,
            ctrl: false,
        }
    }

    pub fn shift(key: Key) -> Self {
        KeyPress {
            shift: true,
            ..Self::plain(key)
        }
    }

    pub fn ctrl(key: Key) -> Self {
        KeyPress {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    fn is_modified(&self) -> bool {
        self.shift || self.ctrl
    }
}

impl From<Key> for KeyPress {
    fn from(key: Key) -> Self {
        KeyPress::plain(key)
    }
}

/// Movement through the selected items, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    /// Toward the first selected item. Needs the caret at the start of the text.
    Retreat,
    /// Toward the text input.
    Advance,
}

/// Arrow-key meaning per reading direction.
const LTR_ARROWS: [(Key, Nav); 2] = [(Key::Left, Nav::Retreat), (Key::Right, Nav::Advance)];
const RTL_ARROWS: [(Key, Nav); 2] = [(Key::Left, Nav::Advance), (Key::Right, Nav::Retreat)];

impl Direction {
    pub fn nav(self, key: Key) -> Option<Nav> {
        let table = match self {
            Direction::Ltr => &LTR_ARROWS,
            Direction::Rtl => &RTL_ARROWS,
        };
        table.iter().find(|(k, _)| *k == key).map(|(_, nav)| *nav)
    }
}

/// Where the text caret sits, as far as routing cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    /// Caret (or selection start) is at offset 0.
    pub at_start: bool,
    /// The text selection spans the whole query. True for an empty query.
    pub covers_query: bool,
}

/// Everything the router reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteContext {
    /// Number of selected items.
    pub len: usize,
    pub active: Option<usize>,
    pub open: bool,
    pub caret: Caret,
    pub direction: Direction,
    pub loop_nav: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Not ours; the text input gets the key.
    Pass,
    /// Move keyboard focus among the selected items (None = text input).
    Focus(Option<usize>),
    /// Remove the focused item, then focus `then`.
    RemoveActive { index: usize, then: Option<usize> },
    /// Remove the last item from the text input. The key still reaches the
    /// text input so a fully selected query is deleted too.
    RemoveLast,
    Open,
    Close,
}

impl Route {
    /// Whether the text input should also see the key.
    pub fn passes_through(&self) -> bool {
        matches!(self, Route::Pass | Route::RemoveLast)
    }
}

/// One step toward the front of the list. Arriving from the text input
/// lands on the last item; the front stays put unless looping.
pub fn retreat(active: Option<usize>, len: usize, loop_nav: bool) -> Option<usize> {
    if len == 0 {
        return active;
    }
    match active {
        None => Some(len - 1),
        Some(0) if loop_nav => Some(len - 1),
        Some(0) => Some(0),
        Some(i) => Some(i - 1),
    }
}

/// One step toward the text input. Stepping past the last item hands focus
/// back to the text input, or wraps to the front when looping.
pub fn advance(active: Option<usize>, len: usize, loop_nav: bool) -> Option<usize> {
    if len == 0 {
        return active;
    }
    match active {
        None if loop_nav => Some(0),
        None => None,
        Some(i) if i + 1 >= len => {
            if loop_nav {
                Some(0)
            } else {
                None
            }
        }
        Some(i) => Some(i + 1),
    }
}

/// Focus after removing the item at `index`, given how many remain.
pub fn after_removal(index: usize, remaining: usize) -> Option<usize> {
    if remaining == 0 {
        None
    } else {
        Some(index.saturating_sub(1).min(remaining - 1))
    }
}

/// Decide what a key press does to the selected-item row.
pub fn route(press: KeyPress, ctx: &RouteContext) -> Route {
    match press.key {
        Key::Left | Key::Right => {
            // Modified arrows belong to text selection
            if press.is_modified() {
                return Route::Pass;
            }
            let Some(nav) = ctx.direction.nav(press.key) else {
                return Route::Pass;
            };
            if ctx.len == 0 {
                return Route::Pass;
            }
            match nav {
                Nav::Retreat if ctx.caret.at_start => {
                    Route::Focus(retreat(ctx.active, ctx.len, ctx.loop_nav))
                }
                Nav::Advance if ctx.active.is_some() || ctx.loop_nav => {
                    Route::Focus(advance(ctx.active, ctx.len, ctx.loop_nav))
                }
                _ => Route::Pass,
            }
        }
        Key::Backspace | Key::Delete => {
            if ctx.len == 0 {
                return Route::Pass;
            }
            match ctx.active {
                Some(index) if index < ctx.len => Route::RemoveActive {
                    index,
                    then: after_removal(index, ctx.len - 1),
                },
                _ if ctx.caret.at_start && ctx.caret.covers_query => Route::RemoveLast,
                _ => Route::Pass,
            }
        }
        Key::Enter => Route::Open,
        Key::Escape => {
            if ctx.active.is_some() {
                Route::Focus(None)
            } else if ctx.open {
                Route::Close
            } else {
                Route::Pass
            }
        }
        _ => Route::Pass,
    }
}
