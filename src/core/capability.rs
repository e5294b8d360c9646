//! Capability predicates over file entries.
//!
//! Pure and total over nullable input: `None` never has any capability.
//! All three currently reduce to the disabled flag; they stay separate
//! entry points because the interpreter asks three different questions.

use super::FileEntry;

/// Whether the entry may become part of the selection.
pub fn is_selectable(file: Option<&FileEntry>) -> bool {
    file.is_some_and(|f| !f.is_disabled)
}

/// Whether an Open action may target the entry.
pub fn is_openable(file: Option<&FileEntry>) -> bool {
    file.is_some_and(|f| !f.is_disabled)
}

/// Whether the entry may be carried by a drag.
pub fn is_draggable(file: Option<&FileEntry>) -> bool {
    file.is_some_and(|f| !f.is_disabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn entry(disabled: bool) -> FileEntry {
        let mut e = FileEntry::folder(Path::new("/tmp/x"));
        e.is_disabled = disabled;
        e
    }

    #[test]
    fn none_has_no_capabilities() {
        assert!(!is_selectable(None));
        assert!(!is_openable(None));
        assert!(!is_draggable(None));
    }

    #[test]
    fn disabled_entry_has_no_capabilities() {
        let e = entry(true);
        assert!(!is_selectable(Some(&e)));
        assert!(!is_openable(Some(&e)));
        assert!(!is_draggable(Some(&e)));
    }

    #[test]
    fn plain_entry_has_all_capabilities() {
        let e = entry(false);
        assert!(is_selectable(Some(&e)));
        assert!(is_openable(Some(&e)));
        assert!(is_draggable(Some(&e)));
    }
}
