//! Defines the event and message structures for communication between the
//! backend and the frontend.

use serde::Deserialize;

use super::view_model::UiState;
use crate::core::DropEffect;

/// Events sent from the Rust backend to the webview (UI thread).
///
/// Each variant corresponds to a `window.*` function called in the frontend.
#[derive(Debug)]
pub enum UserEvent {
    /// A complete state update to re-render the UI.
    StateUpdate(Box<UiState>),
    /// An error message to be displayed to the user.
    ShowError(String),
    /// Indicates that something is being dragged over the window.
    DragStateChanged(bool),
}

/// A message received from the webview via the IPC channel.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    pub payload: serde_json::Value,
}

/// Payload of a `file_clicked` message. The frontend computes the display
/// index under its current rendering order and classifies double clicks
/// with the configured threshold.
#[derive(Deserialize, Debug)]
pub struct ClickPayload {
    pub index: usize,
    #[serde(default)]
    pub double: bool,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
}

/// Payload of a `key_pressed` message; `key` is the DOM `KeyboardEvent.key`.
#[derive(Deserialize, Debug)]
pub struct KeyPayload {
    pub index: usize,
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
}

/// Payload of a `drag_started` message.
#[derive(Deserialize, Debug)]
pub struct DragStartPayload {
    pub index: usize,
}

/// Payload of a `drag_dropped` message. The frontend only reports drops
/// that followed a drag it started itself.
#[derive(Deserialize, Debug)]
pub struct DropPayload {
    pub source_index: usize,
    pub target_index: usize,
    pub effect: DropEffect,
}
