use tracing::{debug, warn};

use crate::model::{Item, PickerConfig};

use super::keys::{self, Caret, Key, KeyPress, Route, RouteContext};
use super::resolve;
use super::store::Selection;
use super::text::TextInput;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    #[error("multi-select state read after the picker was unmounted")]
    Unmounted,
}

/// Interaction state owned by the controller: query text, keyboard focus
/// among the selected items, suggestion list visibility and highlight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interaction {
    text: TextInput,
    active: Option<usize>,
    open: bool,
    highlight: usize,
}

impl Interaction {
    pub fn query(&self) -> &str {
        self.text.as_str()
    }

    pub fn text(&self) -> &TextInput {
        &self.text
    }

    /// Selected item holding keyboard focus. None means the text input has it.
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Position of the highlighted candidate within the filtered list.
    pub fn highlight(&self) -> usize {
        self.highlight
    }
}

/// Turns key, pointer and focus events into interaction state changes.
///
/// The controller never owns the selection. Every handler reads the host's
/// current [`Selection`] and returns the next one when an item was added or
/// removed; the host is expected to adopt it.
#[derive(Debug, Clone)]
pub struct Controller {
    config: PickerConfig,
    state: Interaction,
    mounted: bool,
}

impl Controller {
    pub fn new(config: PickerConfig) -> Self {
        Controller {
            config,
            state: Interaction::default(),
            mounted: true,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Current interaction state. Fails once the picker is unmounted.
    pub fn state(&self) -> Result<&Interaction, SelectError> {
        if self.mounted {
            Ok(&self.state)
        } else {
            Err(SelectError::Unmounted)
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn unmount(&mut self) {
        debug!("picker unmounted");
        self.mounted = false;
    }

    fn live(&self, event: &'static str) -> bool {
        if !self.mounted {
            warn!(event, "event after unmount ignored");
        }
        self.mounted
    }

    /// Pull the active index back inside `values` after the host changed it.
    pub fn sync(&mut self, values: &Selection) {
        if let Some(index) = self.state.active
            && index >= values.len()
        {
            self.state.active = values.len().checked_sub(1);
        }
    }

    fn route_context(&self, values: &Selection) -> RouteContext {
        RouteContext {
            len: values.len(),
            active: self.state.active,
            open: self.state.open,
            caret: Caret {
                at_start: self.state.text.caret_at_start(),
                covers_query: self.state.text.covers_all(),
            },
            direction: self.config.direction,
            loop_nav: self.config.loop_nav,
        }
    }

    pub fn handle_key(
        &mut self,
        values: &Selection,
        candidates: &[Item],
        press: KeyPress,
    ) -> Option<Selection> {
        if !self.live("key") {
            return None;
        }
        self.sync(values);

        if !press.ctrl && matches!(press.key, Key::Up | Key::Down) {
            self.move_highlight(candidates, press.key == Key::Down);
            return None;
        }

        let route = keys::route(press, &self.route_context(values));
        // The input rejects edits while a selected item holds focus
        let text_focused = self.state.active.is_none();
        debug!(?press, ?route, "key routed");

        let mut change = None;
        match route {
            Route::Pass => {}
            Route::Focus(next) => self.state.active = next,
            Route::RemoveActive { index, then } => {
                let mut next = values.clone();
                next.remove_at(index);
                self.state.active = then;
                change = Some(next);
            }
            Route::RemoveLast => {
                if let Some(last) = values.last() {
                    change = Some(values.toggled(last.clone()));
                }
            }
            Route::Open => {
                if self.state.open {
                    change = self.activate_highlight(values, candidates);
                }
                self.state.open = true;
            }
            Route::Close => self.state.open = false,
        }

        if route.passes_through() && text_focused && self.state.text.apply(press) {
            self.state.highlight = 0;
        }
        change
    }

    fn move_highlight(&mut self, candidates: &[Item], down: bool) {
        if !self.state.open || self.config.loading {
            return;
        }
        let count = resolve::filter(candidates, self.state.text.as_str()).count();
        if count == 0 {
            return;
        }
        let current = self.state.highlight.min(count - 1);
        self.state.highlight = if down {
            if current + 1 < count {
                current + 1
            } else if self.config.loop_nav {
                0
            } else {
                current
            }
        } else if current > 0 {
            current - 1
        } else if self.config.loop_nav {
            count - 1
        } else {
            0
        };
    }

    /// The candidate Enter would activate.
    pub fn highlighted<'a>(&self, candidates: &'a [Item]) -> Option<&'a Item> {
        if self.config.loading {
            return None;
        }
        let matches: Vec<&Item> = resolve::filter(candidates, self.state.text.as_str()).collect();
        let last = matches.len().checked_sub(1)?;
        matches.get(self.state.highlight.min(last)).copied()
    }

    fn activate_highlight(&mut self, values: &Selection, candidates: &[Item]) -> Option<Selection> {
        let item = self.highlighted(candidates)?.clone();
        self.apply_pick(values, item)
    }

    fn apply_pick(&mut self, values: &Selection, item: Item) -> Option<Selection> {
        debug!(key = %item.key, "candidate activated");
        let next = values.toggled(item);
        self.state.text.clear();
        self.state.highlight = 0;
        self.state.open = true;
        self.sync(&next);
        Some(next)
    }

    /// A candidate in the suggestion list was clicked.
    pub fn pick(&mut self, values: &Selection, item: &Item) -> Option<Selection> {
        if !self.live("pick") {
            return None;
        }
        self.apply_pick(values, item.clone())
    }

    /// The remove affordance on a selected item's badge was clicked.
    pub fn remove(&mut self, values: &Selection, key: &str) -> Option<Selection> {
        if !self.live("remove") {
            return None;
        }
        let item = values.get(values.position(key)?)?.clone();
        let next = values.toggled(item);
        self.sync(&next);
        Some(next)
    }

    pub fn focus(&mut self) {
        if self.live("focus") {
            self.state.open = true;
        }
    }

    pub fn blur(&mut self) {
        if self.live("blur") {
            self.state.open = false;
        }
    }

    /// Clicking the text input hands keyboard focus back to it and opens
    /// the list.
    pub fn click_input(&mut self) {
        if self.live("click") {
            self.state.active = None;
            self.state.open = true;
        }
    }
}
