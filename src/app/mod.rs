//! The instance layer: state, IPC surface, command handlers, and dispatch.

pub mod commands;
pub mod dispatch;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod view_model;

use std::sync::{Arc, Mutex};

use events::{IpcMessage, UserEvent};

use dispatch::ActionSink;
use file_dialog::DialogService;
use proxy::EventProxy;
use state::AppState;

/// Routes one raw IPC message from the webview to its command handler.
///
/// Unknown commands and unparsable messages are logged and ignored; nothing
/// the frontend sends can take the instance down.
pub fn handle_ipc_message<P, D, S>(
    message: String,
    dialog: Arc<D>,
    sink: Arc<S>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) where
    P: EventProxy,
    D: DialogService + ?Sized,
    S: ActionSink + ?Sized,
{
    let msg: IpcMessage = match serde_json::from_str(&message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Unparsable IPC message: {}", e);
            return;
        }
    };
    tracing::debug!(command = %msg.command, "IPC message received");

    match msg.command.as_str() {
        "initialize" => commands::initialize(proxy, state),
        "navigate" => commands::navigate(msg.payload, proxy, state),
        "pick_directory" => commands::pick_directory(dialog.as_ref(), proxy, state),
        "file_clicked" => commands::file_clicked(msg.payload, sink.as_ref(), proxy, state),
        "key_pressed" => commands::key_pressed(msg.payload, sink.as_ref(), proxy, state),
        "drag_started" => commands::drag_started(msg.payload, sink.as_ref(), proxy, state),
        "drag_dropped" => commands::drag_dropped(msg.payload, sink.as_ref(), proxy, state),
        "open_parent" => commands::open_parent(sink.as_ref(), proxy, state),
        "crumb_clicked" => commands::crumb_clicked(msg.payload, sink.as_ref(), proxy, state),
        "action_invoked" => commands::action_invoked(msg.payload, sink.as_ref(), proxy, state),
        "update_config" => commands::update_config(msg.payload, proxy, state),
        other => tracing::warn!("Unknown IPC command: {}", other),
    }
}

/// Forwards one backend event to the webview by evaluating the matching
/// `window.*` function.
pub fn handle_user_event(event: UserEvent, webview: &wry::WebView) {
    let script = match &event {
        UserEvent::StateUpdate(ui_state) => serde_json::to_string(ui_state.as_ref())
            .map(|json| format!("window.render({json})")),
        UserEvent::ShowError(message) => {
            serde_json::to_string(message).map(|json| format!("window.showError({json})"))
        }
        UserEvent::DragStateChanged(active) => Ok(format!("window.setDragState({active})")),
    };
    match script {
        Ok(script) => {
            if let Err(e) = webview.evaluate_script(&script) {
                tracing::error!("Failed to evaluate script in webview: {}", e);
            }
        }
        Err(e) => tracing::error!("Failed to serialize event for the UI: {}", e),
    }
}
