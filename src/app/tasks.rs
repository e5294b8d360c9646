//! Spawned background work: directory listings.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::events::UserEvent;
use super::helpers::with_state_and_notify;
use super::proxy::EventProxy;
use super::state::AppState;
use super::view_model::generate_ui_state;
use crate::core::listing;

/// Starts listing `path`, replacing any listing already in flight.
///
/// The listing itself runs in a spawned task with an abortable handle and a
/// cancellation flag, so navigating away from a slow directory (e.g. a cold
/// network mount) never wedges the instance.
pub fn start_listing<P: EventProxy>(path: PathBuf, proxy: P, state: Arc<Mutex<AppState>>) {
    let cancel_flag = Arc::new(AtomicBool::new(false));
    {
        let mut state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        state_guard.cancel_current_listing();
        state_guard.is_listing = true;
        state_guard.status_message = format!("Reading {}…", path.display());
        state_guard.listing_cancel_flag = cancel_flag.clone();

        let proxy_clone = proxy.clone();
        let state_clone = state.clone();
        let path_clone = path.clone();
        let flag_clone = cancel_flag.clone();
        let handle = tokio::spawn(async move {
            listing_task(path_clone, proxy_clone, state_clone, flag_clone).await;
        });
        state_guard.listing_task = Some(handle);

        let event = UserEvent::StateUpdate(Box::new(generate_ui_state(&state_guard)));
        proxy.send_event(event);
    }
}

async fn listing_task<P: EventProxy>(
    path: PathBuf,
    proxy: P,
    state: Arc<Mutex<AppState>>,
    cancel_flag: Arc<AtomicBool>,
) {
    let show_hidden = {
        let state_guard = state
            .lock()
            .expect("Mutex was poisoned. This should not happen.");
        state_guard.config.show_hidden
    };

    let result = listing::list_directory(&path, show_hidden);

    if cancel_flag.load(Ordering::SeqCst) {
        tracing::info!("listing of {} cancelled", path.display());
        return;
    }

    match result {
        Ok(files) => {
            with_state_and_notify(&state, &proxy, |s| {
                s.current_path = path.clone();
                s.config.last_directory = Some(path.clone());
                if let Err(e) = crate::config::settings::save_config(&s.config, None) {
                    tracing::warn!("Failed to save config after navigation: {}", e);
                }
                s.replace_files(files);
                s.is_listing = false;
                s.status_message = format!("{} items", s.files.len());
            });
        }
        Err(e) => {
            tracing::error!("failed to list {}: {}", path.display(), e);
            proxy.send_event(UserEvent::ShowError(format!(
                "Could not read {}: {e}",
                path.display()
            )));
            with_state_and_notify(&state, &proxy, |s| {
                s.is_listing = false;
                s.status_message = "Failed to read directory.".to_string();
            });
        }
    }
}
