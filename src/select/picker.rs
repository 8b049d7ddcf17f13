use crate::model::{Item, PickerConfig};

use super::controller::{Controller, Interaction, SelectError};
use super::keys::KeyPress;
use super::resolve::{self, Resolved};
use super::store::Selection;

/// Called with the full selection after every add or remove.
pub type ValuesListener = Box<dyn FnMut(&[Item])>;

/// Host side of a multi-select: owns the selection and the candidate set,
/// forwards events to the [`Controller`] and adopts the changes it reports.
pub struct MultiSelect {
    controller: Controller,
    values: Selection,
    candidates: Vec<Item>,
    listener: Option<ValuesListener>,
}

impl MultiSelect {
    pub fn new(config: PickerConfig, candidates: Vec<Item>, initial: Vec<Item>) -> Self {
        MultiSelect {
            controller: Controller::new(config),
            values: Selection::from_seed(initial),
            candidates,
            listener: None,
        }
    }

    pub fn on_values_change(mut self, listener: impl FnMut(&[Item]) + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn values(&self) -> &Selection {
        &self.values
    }

    pub fn candidates(&self) -> &[Item] {
        &self.candidates
    }

    pub fn config(&self) -> &PickerConfig {
        self.controller.config()
    }

    pub fn state(&self) -> Result<&Interaction, SelectError> {
        self.controller.state()
    }

    /// Filtered candidates with their checked flag. Empty while loading.
    pub fn suggestions(&self) -> Result<Vec<Resolved<'_>>, SelectError> {
        let state = self.controller.state()?;
        if self.config().loading {
            return Ok(Vec::new());
        }
        Ok(resolve::resolve(&self.candidates, &self.values, state.query()).collect())
    }

    pub fn highlighted(&self) -> Option<&Item> {
        self.controller.highlighted(&self.candidates)
    }

    /// Replace the selection from the host side. Does not notify the listener.
    pub fn set_values(&mut self, values: Selection) {
        self.values = values;
        self.controller.sync(&self.values);
    }

    fn commit(&mut self, change: Option<Selection>) {
        let Some(next) = change else {
            return;
        };
        self.values = next;
        if let Some(listener) = &mut self.listener {
            listener(self.values.as_slice());
        }
    }

    pub fn key(&mut self, press: impl Into<KeyPress>) {
        let change = self
            .controller
            .handle_key(&self.values, &self.candidates, press.into());
        self.commit(change);
    }

    /// Click on a candidate by key. Returns false if no candidate has that key.
    pub fn pick(&mut self, key: &str) -> bool {
        let Some(item) = self.candidates.iter().find(|c| c.key == key) else {
            return false;
        };
        let change = self.controller.pick(&self.values, item);
        self.commit(change);
        true
    }

    /// Click on the remove affordance of a selected item. Returns false if
    /// no selected item has that key.
    pub fn remove(&mut self, key: &str) -> bool {
        if !self.values.contains(key) {
            return false;
        }
        let change = self.controller.remove(&self.values, key);
        self.commit(change);
        true
    }

    pub fn focus(&mut self) {
        self.controller.focus();
    }

    pub fn blur(&mut self) {
        self.controller.blur();
    }

    pub fn click_input(&mut self) {
        self.controller.click_input();
    }

    pub fn unmount(&mut self) {
        self.controller.unmount();
    }
}
