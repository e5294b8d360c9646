//! Reads one directory level into the ordered file sequence shown to the UI.

use chrono::{DateTime, Local};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use super::{CoreError, FileEntry};

/// Lists the direct children of `path`. The returned order (directories
/// first, then case-insensitive by name) defines the display-index space
/// the interpreter and range selection operate in.
pub fn list_directory(path: &Path, show_hidden: bool) -> Result<Vec<FileEntry>, CoreError> {
    if !path.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }
    let read_dir = fs::read_dir(path).map_err(|e| CoreError::Io(e, path.to_path_buf()))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("skipping unreadable entry in {}: {}", path.display(), e);
                continue;
            }
        };
        let entry_path = dir_entry.path();
        let name = dir_entry.file_name().to_string_lossy().into_owned();
        let is_hidden = name.starts_with('.');
        if is_hidden && !show_hidden {
            continue;
        }
        let entry = match dir_entry.metadata() {
            Ok(meta) => FileEntry {
                id: entry_path.to_string_lossy().into_owned(),
                name,
                is_directory: meta.is_dir(),
                size: if meta.is_dir() { 0 } else { meta.len() },
                modified: meta.modified().ok().map(DateTime::<Local>::from),
                is_hidden,
                is_disabled: false,
                path: entry_path,
            },
            Err(e) => {
                // Entries the process cannot stat stay visible but lose all
                // capabilities.
                tracing::debug!("no metadata for {}: {}", entry_path.display(), e);
                FileEntry {
                    id: entry_path.to_string_lossy().into_owned(),
                    name,
                    is_directory: false,
                    size: 0,
                    modified: None,
                    is_hidden,
                    is_disabled: true,
                    path: entry_path,
                }
            }
        };
        entries.push(entry);
    }

    sort_entries(&mut entries);
    Ok(entries)
}

/// Directories first, then case-insensitive by name.
pub fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| match (a.is_directory, b.is_directory) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    });
}
