//! Contains all the command handlers that are callable from the frontend
//! via IPC.
//!
//! Each function in this module corresponds to a specific
//! `IpcMessage::command`. The interaction commands deserialize their
//! payload, run the event interpreter against the instance state, and hand
//! any synthesized action to dispatch — after the state lock is released,
//! so the interpreter's mutations are complete before any handler runs.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::dispatch::{dispatch, ActionSink};
use super::events::{ClickPayload, DragStartPayload, DropPayload, KeyPayload};
use super::file_dialog::DialogService;
use super::helpers::with_state_and_notify;
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks;
use crate::config::{self, AppConfig};
use crate::core::{
    interpret, ActionId, BrowserKey, FileEntry, InteractionEvent, InterpreterCtx, SemanticAction,
};

/// Runs one interpreter transition and dispatches whatever it synthesized.
fn run_interpreter<P: EventProxy, S: ActionSink + ?Sized>(
    event: InteractionEvent,
    sink: &S,
    proxy: &P,
    state: &Arc<Mutex<AppState>>,
) {
    let action = with_state_and_notify(state, proxy, |s| {
        let parent = s.parent_entry();
        let selection_enabled = s.config.selection_enabled;
        let mut ctx = InterpreterCtx {
            files: s.files.as_slice(),
            selection: &mut s.selection,
            parent: parent.as_ref(),
            selection_enabled,
        };
        interpret(&mut ctx, event)
    });
    if let Some(action) = action {
        dispatch(sink, proxy, state, action);
    }
}

/// Sends the initial state and lists the start directory.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let start = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        let remembered = if state_guard.config.auto_load_last_directory {
            state_guard.config.last_directory.clone()
        } else {
            None
        };
        remembered.filter(|p| p.is_dir()).or_else(dirs::home_dir)
    };
    match start {
        Some(path) => tasks::start_listing(path, proxy, state),
        None => with_state_and_notify(&state, &proxy, |s| {
            s.status_message = "No start directory available.".to_string();
        }),
    }
}

/// Navigates to the directory named in the payload.
pub fn navigate<P: EventProxy>(payload: Value, proxy: P, state: Arc<Mutex<AppState>>) {
    if let Ok(path_str) = serde_json::from_value::<String>(payload.clone()) {
        tasks::start_listing(PathBuf::from(path_str), proxy, state);
    } else {
        tracing::warn!(
            "Failed to deserialize path string from payload: {:?}",
            payload
        );
    }
}

/// Opens a native dialog for the user to pick a directory to browse.
pub fn pick_directory<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if let Some(path) = dialog.pick_directory() {
        tasks::start_listing(path, proxy, state);
    } else {
        tracing::info!("User cancelled directory selection.");
    }
}

/// A single or double mouse click on a grid row (or on empty grid space,
/// with an index past the sequence end).
pub fn file_clicked<P: EventProxy, S: ActionSink + ?Sized>(
    payload: Value,
    sink: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match serde_json::from_value::<ClickPayload>(payload) {
        Ok(click) => run_interpreter(
            InteractionEvent::MouseClick {
                index: click.index,
                double: click.double,
                ctrl: click.ctrl,
                shift: click.shift,
            },
            sink,
            &proxy,
            &state,
        ),
        Err(e) => tracing::warn!("Malformed file_clicked payload: {}", e),
    }
}

/// A key press on a focused grid row.
pub fn key_pressed<P: EventProxy, S: ActionSink + ?Sized>(
    payload: Value,
    sink: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match serde_json::from_value::<KeyPayload>(payload) {
        Ok(key) => run_interpreter(
            InteractionEvent::KeyPress {
                index: key.index,
                key: BrowserKey::from_wire(&key.key),
                ctrl: key.ctrl,
            },
            sink,
            &proxy,
            &state,
        ),
        Err(e) => tracing::warn!("Malformed key_pressed payload: {}", e),
    }
}

/// The frontend started dragging a grid row.
pub fn drag_started<P: EventProxy, S: ActionSink + ?Sized>(
    payload: Value,
    sink: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match serde_json::from_value::<DragStartPayload>(payload) {
        Ok(drag) => run_interpreter(
            InteractionEvent::DragStart { index: drag.index },
            sink,
            &proxy,
            &state,
        ),
        Err(e) => tracing::warn!("Malformed drag_started payload: {}", e),
    }
}

/// A drag the frontend started ended on a grid row.
pub fn drag_dropped<P: EventProxy, S: ActionSink + ?Sized>(
    payload: Value,
    sink: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match serde_json::from_value::<DropPayload>(payload) {
        Ok(drop) => run_interpreter(
            InteractionEvent::DragEnd {
                source_index: drop.source_index,
                target_index: drop.target_index,
                effect: drop.effect,
            },
            sink,
            &proxy,
            &state,
        ),
        Err(e) => tracing::warn!("Malformed drag_dropped payload: {}", e),
    }
}

/// The toolbar's "up" entry or a dedicated shortcut.
pub fn open_parent<P: EventProxy, S: ActionSink + ?Sized>(
    sink: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    run_interpreter(InteractionEvent::OpenParentRequest, sink, &proxy, &state);
}

/// A click on one segment of the folder chain above the grid.
pub fn crumb_clicked<P: EventProxy, S: ActionSink + ?Sized>(
    payload: Value,
    sink: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    if let Ok(path_str) = serde_json::from_value::<String>(payload.clone()) {
        let folder = FileEntry::folder(&PathBuf::from(path_str));
        run_interpreter(
            InteractionEvent::ChainFolderClick { folder },
            sink,
            &proxy,
            &state,
        );
    } else {
        tracing::warn!(
            "Failed to deserialize path string from payload: {:?}",
            payload
        );
    }
}

/// An action invoked by name from the toolbar.
pub fn action_invoked<P: EventProxy, S: ActionSink + ?Sized>(
    payload: Value,
    sink: &S,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(id_str) = serde_json::from_value::<String>(payload.clone()) else {
        tracing::warn!(
            "Failed to deserialize action id from payload: {:?}",
            payload
        );
        return;
    };
    let id = ActionId::from(id_str);

    // Going up is an interpreter concern like every other open request.
    if id == ActionId::OpenParent {
        run_interpreter(InteractionEvent::OpenParentRequest, sink, &proxy, &state);
        return;
    }

    let action = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        let Some(definition) = state_guard.registry.get(&id) else {
            tracing::error!("invoked action `{}` is not registered", id);
            return;
        };
        let selected: Vec<FileEntry> = state_guard
            .selection
            .selected_files(&state_guard.files, &[])
            .into_iter()
            .cloned()
            .collect();
        if definition.requires_selection && selected.is_empty() {
            tracing::warn!("action `{}` requires a selection", id);
            return;
        }
        match &id {
            ActionId::Open => selected.first().cloned().map(|target| SemanticAction {
                id: id.clone(),
                target,
                files: selected,
            }),
            ActionId::Move | ActionId::Duplicate => {
                // These need a drop target; the toolbar never offers them.
                tracing::warn!("action `{}` cannot be invoked without a drop target", id);
                None
            }
            _ => Some(SemanticAction {
                id: id.clone(),
                target: state_guard.current_dir_entry(),
                files: selected,
            }),
        }
    };

    if let Some(action) = action {
        dispatch(sink, &proxy, &state, action);
    }
}

/// Replaces the configuration and persists it. The action registry is
/// rebuilt wholesale; disabling selection clears it.
pub fn update_config<P: EventProxy>(payload: Value, proxy: P, state: Arc<Mutex<AppState>>) {
    let Ok(new_config) = serde_json::from_value::<AppConfig>(payload.clone()) else {
        tracing::warn!("Failed to deserialize config from payload: {:?}", payload);
        return;
    };

    let relist = with_state_and_notify(&state, &proxy, |s| {
        let show_hidden_changed = s.config.show_hidden != new_config.show_hidden;
        let selection_now_disabled = s.config.selection_enabled && !new_config.selection_enabled;
        s.config = new_config;
        s.rebuild_registry();
        if selection_now_disabled {
            s.selection.clear();
        }
        if let Err(e) = config::settings::save_config(&s.config, None) {
            tracing::warn!("Failed to save config: {}", e);
        }
        (show_hidden_changed && !s.current_path.as_os_str().is_empty())
            .then(|| s.current_path.clone())
    });

    if let Some(path) = relist {
        tasks::start_listing(path, proxy, state);
    }
}
