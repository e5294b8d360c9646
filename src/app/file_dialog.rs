//! An abstraction layer for native file dialogs to enable testing.

use std::path::PathBuf;

/// Defines a common interface for folder selection dialogs. This allows a
/// mock implementation during tests, avoiding actual OS dialog windows.
pub trait DialogService: Send + Sync {
    /// Opens a dialog to select a single directory to browse.
    fn pick_directory(&self) -> Option<PathBuf>;
}

/// The production implementation that uses the `rfd` crate to show native
/// OS dialogs.
pub struct NativeDialogService;

impl DialogService for NativeDialogService {
    fn pick_directory(&self) -> Option<PathBuf> {
        rfd::FileDialog::new().pick_folder()
    }
}
