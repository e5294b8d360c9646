pub mod settings;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::ActionDefinition;

/// The persisted, host-configurable surface of one browser instance.
///
/// Missing fields deserialize to their defaults, so configs written by
/// older versions keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// The directory shown when the instance starts, when
    /// `auto_load_last_directory` is set.
    pub last_directory: Option<PathBuf>,
    pub auto_load_last_directory: bool,
    pub show_hidden: bool,
    /// When false, every selection-mutating interaction is a no-op; Open
    /// actions still fire.
    pub selection_enabled: bool,
    /// Forwarded to the frontend, which classifies double clicks.
    pub double_click_threshold_ms: u64,
    /// Host-supplied action definitions appended to the built-in set.
    pub custom_actions: Vec<ActionDefinition>,
    /// Drop the built-in action set and use `custom_actions` alone.
    pub disable_builtin_actions: bool,
    pub window_size: (f64, f64),
    pub window_position: (f64, f64),
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            last_directory: None,
            auto_load_last_directory: true,
            show_hidden: false,
            selection_enabled: true,
            double_click_threshold_ms: 400,
            custom_actions: Vec::new(),
            disable_builtin_actions: false,
            window_size: (1000.0, 700.0),
            window_position: (100.0, 100.0),
        }
    }
}
