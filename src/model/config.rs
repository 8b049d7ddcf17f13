use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::item::Item;

/// Contents of mpick.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Reading order of the selection row. Decides which arrow key walks
/// backward through the selected items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Behaviour switches for a multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Wrap keyboard navigation at both ends of the selected list and the
    /// suggestion list instead of stopping.
    #[serde(default, rename = "loop")]
    pub loop_nav: bool,
    /// Replace the suggestion list with a loading placeholder.
    #[serde(default)]
    pub loading: bool,
    /// Shown in the empty text input.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default)]
    pub direction: Direction,
    /// Keys of the items selected on startup.
    #[serde(default)]
    pub selected: Vec<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        PickerConfig {
            loop_nav: false,
            loading: false,
            placeholder: default_placeholder(),
            direction: Direction::Ltr,
            selected: Vec::new(),
        }
    }
}

fn default_placeholder() -> String {
    "Select...".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key hint line under the picker.
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Color overrides, `name = "#RRGGBB"`.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
