//! Selection state for one browser instance.
//!
//! Holds the set of selected file ids plus the anchor index used by
//! shift-click range selection. The store never validates ids on entry;
//! stale ids are dropped when the file sequence is replaced
//! ([`SelectionState::sync_with_files`]) and every query joins against the
//! live sequence, so an id without a matching file is simply never observed.

use std::collections::HashSet;

use super::capability::is_selectable;
use super::FileEntry;

/// The signature shared by the capability predicates, usable as a query
/// filter.
pub type CapabilityPredicate = fn(Option<&FileEntry>) -> bool;

#[derive(Debug, Default)]
pub struct SelectionState {
    selected: HashSet<String>,
    anchor_index: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with `{id}` when `exclusive`, otherwise flips
    /// the id's membership.
    pub fn toggle(&mut self, id: &str, exclusive: bool) {
        if exclusive {
            self.selected.clear();
            self.selected.insert(id.to_string());
        } else if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    /// Replaces the selection with every selectable file whose display index
    /// lies in `[min(a, b), max(a, b)]`. Symmetric in its index arguments;
    /// indices past the end of the sequence select nothing extra.
    pub fn select_range(&mut self, files: &[FileEntry], a: usize, b: usize) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        self.selected = files
            .iter()
            .skip(lo)
            .take(hi - lo + 1)
            .filter(|f| is_selectable(Some(f)))
            .map(|f| f.id.clone())
            .collect();
    }

    /// Replaces (`reset`) or extends the selection with the given ids,
    /// keeping only ids that name a selectable file in `files`.
    pub fn set_exact(&mut self, files: &[FileEntry], ids: &[String], reset: bool) {
        let valid = files
            .iter()
            .filter(|f| is_selectable(Some(f)) && ids.contains(&f.id))
            .map(|f| f.id.clone());
        if reset {
            self.selected = valid.collect();
        } else {
            self.selected.extend(valid);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// The display index of the most recent qualifying click, used as the
    /// anchor for shift-click range selection.
    pub fn anchor(&self) -> Option<usize> {
        self.anchor_index
    }

    pub fn set_anchor(&mut self, index: usize) {
        self.anchor_index = Some(index);
    }

    /// All selected entries, in display order, for which every given
    /// predicate holds.
    pub fn selected_files<'a>(
        &self,
        files: &'a [FileEntry],
        predicates: &[CapabilityPredicate],
    ) -> Vec<&'a FileEntry> {
        files
            .iter()
            .filter(|f| self.selected.contains(&f.id))
            .filter(|f| predicates.iter().all(|p| p(Some(f))))
            .collect()
    }

    pub fn selection_size(&self, files: &[FileEntry], predicates: &[CapabilityPredicate]) -> usize {
        self.selected_files(files, predicates).len()
    }

    /// Drops ids that no longer name a file in the supplied sequence and
    /// resets the anchor. Must be called whenever the file sequence is
    /// replaced; the old anchor's index no longer means the same file.
    pub fn sync_with_files(&mut self, files: &[FileEntry]) {
        let live: HashSet<&str> = files.iter().map(|f| f.id.as_str()).collect();
        self.selected.retain(|id| live.contains(id.as_str()));
        self.anchor_index = None;
    }
}
