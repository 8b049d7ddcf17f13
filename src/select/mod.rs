//! The multi-select interaction model: selection store, keyboard router,
//! candidate resolver and the controller that ties them together.

pub mod controller;
pub mod keys;
pub mod picker;
pub mod resolve;
pub mod script;
pub mod store;
pub mod text;

pub use controller::{Controller, Interaction, SelectError};
pub use keys::{Key, KeyPress};
pub use picker::{MultiSelect, ValuesListener};
pub use resolve::Resolved;
pub use store::{Selection, Toggled};
pub use text::TextInput;
