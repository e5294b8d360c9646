//! The single entry point through which semantic actions leave the system.
//!
//! Dispatch looks the action up in the registry, runs the selection-level
//! built-ins itself, and forwards everything else to the host's
//! [`ActionSink`]. The sink call is a result-type isolation boundary: a
//! failing handler is logged and surfaced to the UI, never propagated. By
//! the time dispatch runs, the interpreter's own state mutations have
//! already completed, so a handler failure can never leave the selection
//! half-updated.

use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::helpers::with_state_and_notify;
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks;
use crate::core::{file_ops, ActionId, CoreError, SemanticAction};

/// The host-supplied receiver of semantic actions.
///
/// Implementations may kick off long-running work of their own; the
/// dispatcher neither awaits nor serializes handler completions.
pub trait ActionSink: Send + Sync {
    fn handle(&self, action: &SemanticAction) -> Result<(), CoreError>;
}

/// Dispatches one semantic action. Consumes it; an action is never
/// re-dispatched.
pub fn dispatch<P: EventProxy, S: ActionSink + ?Sized>(
    sink: &S,
    proxy: &P,
    state: &Arc<Mutex<AppState>>,
    action: SemanticAction,
) {
    enum Route {
        Drop,
        Internal,
        Forward,
    }

    let route = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        if state_guard.registry.get(&action.id).is_none() {
            tracing::error!("dropping action `{}`: not registered", action.id);
            Route::Drop
        } else if matches!(action.id, ActionId::SelectAll | ActionId::ClearSelection) {
            Route::Internal
        } else {
            Route::Forward
        }
    };

    match route {
        Route::Drop => {}
        Route::Internal => run_selection_action(&action, proxy, state),
        Route::Forward => {
            // Outside the lock: the sink is allowed to re-enter the state,
            // e.g. to navigate into an opened folder.
            if let Err(e) = sink.handle(&action) {
                tracing::error!("action `{}` failed: {}", action.id, e);
                proxy.send_event(UserEvent::ShowError(format!(
                    "Action `{}` failed: {e}",
                    action.id
                )));
            }
        }
    }
}

fn run_selection_action<P: EventProxy>(
    action: &SemanticAction,
    proxy: &P,
    state: &Arc<Mutex<AppState>>,
) {
    with_state_and_notify(state, proxy, |s| {
        if !s.config.selection_enabled {
            return;
        }
        match action.id {
            ActionId::SelectAll => {
                let all_ids: Vec<String> = s.files.iter().map(|f| f.id.clone()).collect();
                s.selection.set_exact(&s.files, &all_ids, false);
            }
            ActionId::ClearSelection => s.selection.clear(),
            _ => unreachable!("routed as internal"),
        }
    });
}

/// The default sink of the standalone application: navigates on folder
/// opens and performs the built-in file operations.
pub struct ShellActionSink<P: EventProxy> {
    proxy: P,
    state: Arc<Mutex<AppState>>,
}

impl<P: EventProxy> ShellActionSink<P> {
    pub fn new(proxy: P, state: Arc<Mutex<AppState>>) -> Self {
        Self { proxy, state }
    }

    /// Re-lists the currently browsed directory after a file operation.
    fn refresh(&self) {
        let path = {
            let state_guard = self
                .state
                .lock()
                .expect("Mutex was poisoned. This should not happen.");
            state_guard.current_path.clone()
        };
        if !path.as_os_str().is_empty() {
            tasks::start_listing(path, self.proxy.clone(), self.state.clone());
        }
    }
}

impl<P: EventProxy> ActionSink for ShellActionSink<P> {
    fn handle(&self, action: &SemanticAction) -> Result<(), CoreError> {
        match &action.id {
            ActionId::Open | ActionId::OpenParent => {
                if action.target.is_directory {
                    tasks::start_listing(
                        action.target.path.clone(),
                        self.proxy.clone(),
                        self.state.clone(),
                    );
                } else {
                    for file in action.files.iter().filter(|f| !f.is_directory) {
                        file_ops::open_with_system(&file.path)?;
                    }
                }
                Ok(())
            }
            ActionId::Move => {
                file_ops::move_entries(&action.files, &action.target.path)?;
                self.refresh();
                Ok(())
            }
            ActionId::Duplicate => {
                file_ops::copy_entries(&action.files, &action.target.path)?;
                self.refresh();
                Ok(())
            }
            // Selection-level built-ins are handled ahead of the sink.
            ActionId::SelectAll | ActionId::ClearSelection => Ok(()),
            ActionId::Custom(_) => Err(CoreError::MissingHandler(action.id.clone())),
        }
    }
}
