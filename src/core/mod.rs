pub mod action;
pub mod capability;
pub mod error;
pub mod file_ops;
pub mod interpreter;
pub mod listing;
pub mod selection;

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A single entry of the browsed directory, in the form the rest of the
/// system consumes it: identity plus the attributes the capability
/// predicates and the view model read. The core never mutates an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileEntry {
    /// Unique within one browser instance; the lossily rendered path.
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub is_directory: bool,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
    pub is_hidden: bool,
    /// Entries the process could not stat are shown greyed out and carry
    /// no capabilities.
    pub is_disabled: bool,
}

impl FileEntry {
    /// An entry standing for a folder that is not part of the listed
    /// sequence itself: the parent directory, a breadcrumb, or the
    /// currently browsed directory as an action target.
    pub fn folder(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            id: path.to_string_lossy().into_owned(),
            name,
            path: path.to_path_buf(),
            is_directory: true,
            size: 0,
            modified: None,
            is_hidden: false,
            is_disabled: false,
        }
    }
}

pub use action::{ActionDefinition, ActionId, ActionRegistry, SemanticAction};
pub use capability::{is_draggable, is_openable, is_selectable};
pub use error::CoreError;
pub use interpreter::{interpret, BrowserKey, DropEffect, InteractionEvent, InterpreterCtx};
pub use listing::list_directory;
pub use selection::SelectionState;
