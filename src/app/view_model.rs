//! Responsible for transforming the `AppState` into a `UiState` view model.
//!
//! This module acts as a presentation layer, preparing data specifically for
//! consumption by the UI: grid rows in display order, the breadcrumb chain,
//! and the toolbar derived from the action registry.

use serde::Serialize;
use std::path::Path;

use crate::config::AppConfig;
use crate::core::{ActionId, FileEntry};
use crate::utils::file_kind::file_kind;

use super::state::AppState;

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug)]
pub struct UiState {
    pub config: AppConfig,
    pub current_path: String,
    pub crumbs: Vec<Crumb>,
    pub entries: Vec<EntryRow>,
    pub toolbar: Vec<ToolbarItem>,
    pub selected_count: usize,
    pub is_listing: bool,
    pub status_message: String,
}

/// A serializable representation of a single grid row for the UI.
#[derive(Serialize, Clone, Debug)]
pub struct EntryRow {
    pub id: String,
    pub name: String,
    /// Icon kind understood by the frontend.
    pub kind: String,
    pub size: u64,
    pub modified: Option<String>,
    pub is_directory: bool,
    pub is_hidden: bool,
    pub is_disabled: bool,
    pub is_selected: bool,
}

/// One segment of the folder chain above the grid.
#[derive(Serialize, Clone, Debug)]
pub struct Crumb {
    pub name: String,
    pub path: String,
}

/// One toolbar entry, derived from a registered action definition.
#[derive(Serialize, Clone, Debug)]
pub struct ToolbarItem {
    pub id: ActionId,
    pub label: String,
    pub icon: String,
    pub enabled: bool,
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let entries: Vec<EntryRow> = state.files.iter().map(|f| entry_row(f, state)).collect();
    let selected_count = state.selection.selection_size(&state.files, &[]);

    let toolbar = state
        .registry
        .definitions()
        .iter()
        .filter(|def| def.show_in_toolbar)
        .map(|def| ToolbarItem {
            id: def.id.clone(),
            label: def.label.clone(),
            icon: def.icon.clone(),
            enabled: !def.requires_selection || selected_count > 0,
        })
        .collect();

    UiState {
        config: state.config.clone(),
        current_path: state.current_path.to_string_lossy().into_owned(),
        crumbs: build_crumbs(&state.current_path),
        entries,
        toolbar,
        selected_count,
        is_listing: state.is_listing,
        status_message: state.status_message.clone(),
    }
}

fn entry_row(file: &FileEntry, state: &AppState) -> EntryRow {
    EntryRow {
        id: file.id.clone(),
        name: file.name.clone(),
        kind: file_kind(&file.name, file.is_directory).to_string(),
        size: file.size,
        modified: file
            .modified
            .map(|m| m.format("%Y-%m-%d %H:%M").to_string()),
        is_directory: file.is_directory,
        is_hidden: file.is_hidden,
        is_disabled: file.is_disabled,
        is_selected: state.selection.is_selected(&file.id),
    }
}

/// The folder chain from the filesystem root down to `path`, in click order.
fn build_crumbs(path: &Path) -> Vec<Crumb> {
    let mut crumbs: Vec<Crumb> = path
        .ancestors()
        .map(|ancestor| Crumb {
            name: ancestor
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| ancestor.to_string_lossy().into_owned()),
            path: ancestor.to_string_lossy().into_owned(),
        })
        .collect();
    crumbs.reverse();
    crumbs
}
