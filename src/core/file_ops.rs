//! Filesystem-level behavior behind the built-in actions.

use std::fs;
use std::path::{Path, PathBuf};

use super::{CoreError, FileEntry};

/// Opens a file with the platform's default handler.
pub fn open_with_system(path: &Path) -> Result<(), CoreError> {
    open::that(path).map_err(|e| CoreError::Io(e, path.to_path_buf()))
}

/// Moves the given entries into `target_dir`. Returns how many were moved.
pub fn move_entries(files: &[FileEntry], target_dir: &Path) -> Result<usize, CoreError> {
    if !target_dir.is_dir() {
        return Err(CoreError::NotADirectory(target_dir.to_path_buf()));
    }
    let mut moved = 0;
    for file in files {
        let dest = unique_destination(target_dir, &file.name);
        fs::rename(&file.path, &dest).map_err(|e| CoreError::Io(e, file.path.clone()))?;
        moved += 1;
    }
    Ok(moved)
}

/// Copies the given entries into `target_dir`. Directories are copied
/// recursively. Returns how many top-level entries were copied.
pub fn copy_entries(files: &[FileEntry], target_dir: &Path) -> Result<usize, CoreError> {
    if !target_dir.is_dir() {
        return Err(CoreError::NotADirectory(target_dir.to_path_buf()));
    }
    let mut copied = 0;
    for file in files {
        let dest = unique_destination(target_dir, &file.name);
        copy_recursively(&file.path, &dest)?;
        copied += 1;
    }
    Ok(copied)
}

fn copy_recursively(source: &Path, dest: &Path) -> Result<(), CoreError> {
    if source.is_dir() {
        fs::create_dir_all(dest).map_err(|e| CoreError::Io(e, dest.to_path_buf()))?;
        let read_dir = fs::read_dir(source).map_err(|e| CoreError::Io(e, source.to_path_buf()))?;
        for child in read_dir {
            let child = child.map_err(|e| CoreError::Io(e, source.to_path_buf()))?;
            copy_recursively(&child.path(), &dest.join(child.file_name()))?;
        }
    } else {
        fs::copy(source, dest).map_err(|e| CoreError::Io(e, source.to_path_buf()))?;
    }
    Ok(())
}

/// A destination path in `dir` that does not collide with an existing
/// entry, appending ` copy` (then ` copy 2`, ` copy 3`, …) before the
/// extension.
fn unique_destination(dir: &Path, name: &str) -> PathBuf {
    let direct = dir.join(name);
    if !direct.exists() {
        return direct;
    }
    let (stem, ext) = split_name(name);
    for n in 1u32.. {
        let candidate = if n == 1 {
            format!("{stem} copy{ext}")
        } else {
            format!("{stem} copy {n}{ext}")
        };
        let path = dir.join(candidate);
        if !path.exists() {
            return path;
        }
    }
    unreachable!("u32 counter exhausted");
}

fn split_name(name: &str) -> (&str, String) {
    match name.rsplit_once('.') {
        // A leading dot is a hidden file, not an extension.
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (name, String::new()),
    }
}
