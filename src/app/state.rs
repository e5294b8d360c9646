//! Defines the central, mutable state of one browser instance.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::core::{ActionRegistry, FileEntry, SelectionState};

/// Holds the complete, mutable state of one browser instance.
///
/// Wrapped in an `Arc<Mutex<...>>` for shared access from the event loop,
/// the IPC handler, and spawned listing tasks. Created when the instance
/// mounts and dropped with it; nothing here outlives the instance.
pub struct AppState {
    pub config: AppConfig,
    /// Absolute path of the directory currently shown. Empty until the
    /// first listing completes.
    pub current_path: PathBuf,
    /// The ordered file sequence; positions are the display indices.
    pub files: Vec<FileEntry>,
    pub selection: SelectionState,
    /// The actions this instance knows about. Replaced wholesale when the
    /// configured action set changes, never patched.
    pub registry: ActionRegistry,
    /// `true` while a directory listing is in flight.
    pub is_listing: bool,
    pub status_message: String,
    /// A handle to the currently running listing task, allowing it to be
    /// aborted.
    pub listing_task: Option<JoinHandle<()>>,
    /// A flag used to signal cancellation to the listing task.
    pub listing_cancel_flag: Arc<AtomicBool>,
}

impl Default for AppState {
    /// Creates a default `AppState`, loading the configuration from disk.
    fn default() -> Self {
        let config = AppConfig::load().unwrap_or_default();
        let registry =
            ActionRegistry::with_extensions(&config.custom_actions, config.disable_builtin_actions);
        Self {
            config,
            current_path: PathBuf::new(),
            files: Vec::new(),
            selection: SelectionState::new(),
            registry,
            is_listing: false,
            status_message: "Ready.".to_string(),
            listing_task: None,
            listing_cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl AppState {
    /// Cancels the current listing task, if any.
    pub fn cancel_current_listing(&mut self) {
        if let Some(handle) = self.listing_task.take() {
            handle.abort();
            self.listing_cancel_flag.store(true, Ordering::SeqCst);
            self.is_listing = false;
        }
    }

    /// Swaps in a freshly listed file sequence. Selection entries whose
    /// files are gone are dropped and the range anchor is reset; an index
    /// into the old sequence no longer means the same file.
    pub fn replace_files(&mut self, files: Vec<FileEntry>) {
        self.files = files;
        self.selection.sync_with_files(&self.files);
    }

    /// The parent of the currently browsed directory, if there is one.
    pub fn parent_entry(&self) -> Option<FileEntry> {
        self.current_path.parent().map(FileEntry::folder)
    }

    /// The currently browsed directory as an action target.
    pub fn current_dir_entry(&self) -> FileEntry {
        FileEntry::folder(&self.current_path)
    }

    /// Rebuilds the action registry from the current configuration.
    pub fn rebuild_registry(&mut self) {
        self.registry = ActionRegistry::with_extensions(
            &self.config.custom_actions,
            self.config.disable_builtin_actions,
        );
    }
}
