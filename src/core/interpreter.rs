//! The event interpreter: turns the raw interaction event stream into
//! selection mutations and, where the event carries intent, a semantic
//! action for dispatch.
//!
//! The transition function is pure over its context: every piece of
//! collaborator state (file sequence, selection store, parent folder,
//! selection flag) is threaded in explicitly, so the whole state machine is
//! testable without a window or an event loop.

use serde::Deserialize;

use super::action::{ActionId, SemanticAction};
use super::capability::{is_draggable, is_openable, is_selectable};
use super::selection::SelectionState;
use super::FileEntry;

/// Key classification for a key press on a focused file row. Anything the
/// interpreter does not handle arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKey {
    Enter,
    Space,
    Other,
}

impl BrowserKey {
    /// Maps the DOM `KeyboardEvent.key` value reported by the frontend.
    pub fn from_wire(key: &str) -> Self {
        match key {
            "Enter" => BrowserKey::Enter,
            " " | "Space" | "Spacebar" => BrowserKey::Space,
            _ => BrowserKey::Other,
        }
    }
}

/// The drop effect chosen by the rendering layer when a drag ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropEffect {
    Move,
    Copy,
}

/// A raw interaction event as reported by the rendering layer. Indices are
/// display indices into the current file sequence; the rendering layer
/// computes them under its current order.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    MouseClick {
        index: usize,
        double: bool,
        ctrl: bool,
        shift: bool,
    },
    KeyPress {
        index: usize,
        key: BrowserKey,
        ctrl: bool,
    },
    DragStart {
        index: usize,
    },
    DragEnd {
        source_index: usize,
        target_index: usize,
        effect: DropEffect,
    },
    OpenParentRequest,
    ChainFolderClick {
        folder: FileEntry,
    },
}

/// Collaborator state for one transition, borrowed from the owning browser
/// instance.
pub struct InterpreterCtx<'a> {
    /// The ordered file sequence; positions are the display indices.
    pub files: &'a [FileEntry],
    pub selection: &'a mut SelectionState,
    /// The parent of the currently browsed directory, if any.
    pub parent: Option<&'a FileEntry>,
    /// When false, selection-mutating branches are no-ops; Open synthesis
    /// still fires.
    pub selection_enabled: bool,
}

/// Runs one transition. Mutates the selection store through `ctx` and
/// returns the semantic action the event amounts to, if any.
///
/// Never panics: unknown indices and odd modifier combinations fall through
/// to the nearest matching branch.
pub fn interpret(ctx: &mut InterpreterCtx<'_>, event: InteractionEvent) -> Option<SemanticAction> {
    match event {
        InteractionEvent::MouseClick {
            index,
            double: true,
            ..
        } => {
            // Double-click opens only the clicked file, regardless of any
            // wider selection. Selection and anchor stay untouched.
            let file = ctx.files.get(index)?;
            is_openable(Some(file)).then(|| SemanticAction::open(file))
        }

        InteractionEvent::MouseClick {
            index,
            double: false,
            ctrl,
            shift,
        } => {
            if !ctx.selection_enabled {
                return None;
            }
            match ctx.files.get(index) {
                Some(file) if is_selectable(Some(file)) => {
                    if ctrl {
                        ctx.selection.toggle(&file.id, false);
                        ctx.selection.set_anchor(index);
                    } else if shift {
                        match ctx.selection.anchor() {
                            // The anchor is deliberately left where it is:
                            // consecutive shift-clicks extend from the
                            // original anchor, not the last shift target.
                            Some(anchor) => ctx.selection.select_range(ctx.files, anchor, index),
                            None => {
                                ctx.selection.toggle(&file.id, false);
                                ctx.selection.set_anchor(index);
                            }
                        }
                    } else {
                        ctx.selection.toggle(&file.id, true);
                        ctx.selection.set_anchor(index);
                    }
                }
                _ => {
                    // Clicks on empty space or disabled rows still clear (no
                    // ctrl) and move the range anchor.
                    if !ctrl {
                        ctx.selection.clear();
                    }
                    ctx.selection.set_anchor(index);
                }
            }
            None
        }

        InteractionEvent::KeyPress { index, key, ctrl } => {
            // Keeps the range anchor in sync with keyboard navigation.
            if ctx.selection_enabled {
                ctx.selection.set_anchor(index);
            }
            let file = ctx.files.get(index)?;
            match key {
                BrowserKey::Enter if ctx.selection.is_empty() => {
                    // With an active selection, Enter is left to the global
                    // hotkey layer.
                    is_openable(Some(file)).then(|| SemanticAction::open(file))
                }
                BrowserKey::Space if is_selectable(Some(file)) => {
                    if ctx.selection_enabled {
                        ctx.selection.toggle(&file.id, ctrl);
                    }
                    None
                }
                _ => None,
            }
        }

        InteractionEvent::DragStart { index } => {
            let file = ctx.files.get(index)?;
            // A drag of an unselected file starts from a clean single-file
            // selection; a drag of a selected file carries the whole
            // existing selection.
            if ctx.selection_enabled && !ctx.selection.is_selected(&file.id) {
                ctx.selection.clear();
                if is_selectable(Some(file)) {
                    ctx.selection.toggle(&file.id, true);
                }
            }
            None
        }

        InteractionEvent::DragEnd {
            source_index,
            target_index,
            effect,
        } => {
            let target = ctx.files.get(target_index)?;
            if ctx.selection.is_selected(&target.id) {
                tracing::debug!("drop onto a selected entry rejected");
                return None;
            }
            let dragged: Vec<FileEntry> = ctx
                .selection
                .selected_files(ctx.files, &[is_draggable])
                .into_iter()
                .cloned()
                .collect();
            let files = if dragged.is_empty() {
                vec![ctx.files.get(source_index)?.clone()]
            } else {
                dragged
            };
            let id = match effect {
                DropEffect::Copy => ActionId::Duplicate,
                DropEffect::Move => ActionId::Move,
            };
            Some(SemanticAction {
                id,
                target: target.clone(),
                files,
            })
        }

        InteractionEvent::OpenParentRequest => match ctx.parent {
            Some(parent) if is_openable(Some(parent)) => Some(SemanticAction::open(parent)),
            // The UI should never offer this when no openable parent
            // exists; treat it as a caller bug.
            _ => {
                tracing::warn!("open-parent requested but no openable parent exists");
                None
            }
        },

        InteractionEvent::ChainFolderClick { folder } => Some(SemanticAction::open(&folder)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(name: &str) -> FileEntry {
        FileEntry {
            id: format!("/grid/{name}"),
            name: name.to_string(),
            path: PathBuf::from(format!("/grid/{name}")),
            is_directory: false,
            size: 1,
            modified: None,
            is_hidden: false,
            is_disabled: false,
        }
    }

    fn abcd() -> Vec<FileEntry> {
        ["a", "b", "c", "d"].iter().map(|n| entry(n)).collect()
    }

    fn click(index: usize) -> InteractionEvent {
        InteractionEvent::MouseClick {
            index,
            double: false,
            ctrl: false,
            shift: false,
        }
    }

    fn ctrl_click(index: usize) -> InteractionEvent {
        InteractionEvent::MouseClick {
            index,
            double: false,
            ctrl: true,
            shift: false,
        }
    }

    fn shift_click(index: usize) -> InteractionEvent {
        InteractionEvent::MouseClick {
            index,
            double: false,
            ctrl: false,
            shift: true,
        }
    }

    fn run(
        files: &[FileEntry],
        selection: &mut SelectionState,
        event: InteractionEvent,
    ) -> Option<SemanticAction> {
        let mut ctx = InterpreterCtx {
            files,
            selection,
            parent: None,
            selection_enabled: true,
        };
        interpret(&mut ctx, event)
    }

    #[test]
    fn plain_click_selects_exclusively_and_anchors() {
        let files = abcd();
        let mut sel = SelectionState::new();
        sel.toggle(&files[3].id, false);

        assert!(run(&files, &mut sel, click(0)).is_none());
        assert_eq!(sel.len(), 1);
        assert!(sel.is_selected(&files[0].id));
        assert_eq!(sel.anchor(), Some(0));
    }

    #[test]
    fn ctrl_click_toggles_additively() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(&files, &mut sel, ctrl_click(2));
        assert_eq!(sel.len(), 2);
        run(&files, &mut sel, ctrl_click(2));
        assert_eq!(sel.len(), 1);
        assert_eq!(sel.anchor(), Some(2));
    }

    #[test]
    fn shift_click_ranges_from_anchor_and_keeps_it() {
        // Click A, shift-click D, ctrl-click B: the documented choreography.
        let files = abcd();
        let mut sel = SelectionState::new();

        run(&files, &mut sel, click(0));
        assert_eq!(sel.anchor(), Some(0));

        run(&files, &mut sel, shift_click(3));
        assert_eq!(sel.len(), 4);
        assert_eq!(sel.anchor(), Some(0));

        run(&files, &mut sel, ctrl_click(1));
        assert_eq!(sel.len(), 3);
        assert!(!sel.is_selected(&files[1].id));
    }

    #[test]
    fn consecutive_shift_clicks_extend_from_original_anchor() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(1));
        run(&files, &mut sel, shift_click(3));
        run(&files, &mut sel, shift_click(0));
        // Second shift-click still ranges from index 1, not from 3.
        assert!(sel.is_selected(&files[0].id));
        assert!(sel.is_selected(&files[1].id));
        assert!(!sel.is_selected(&files[2].id));
        assert!(!sel.is_selected(&files[3].id));
    }

    #[test]
    fn shift_click_without_anchor_acts_like_ctrl_click() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, shift_click(2));
        assert_eq!(sel.len(), 1);
        assert!(sel.is_selected(&files[2].id));
        assert_eq!(sel.anchor(), Some(2));

        run(&files, &mut sel, shift_click(0));
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn ctrl_wins_over_shift() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        let both = InteractionEvent::MouseClick {
            index: 3,
            double: false,
            ctrl: true,
            shift: true,
        };
        run(&files, &mut sel, both);
        // Toggled additively, no range.
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn click_on_empty_space_clears_and_anchors() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(1));
        assert!(run(&files, &mut sel, click(17)).is_none());
        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), Some(17));
    }

    #[test]
    fn ctrl_click_on_disabled_row_keeps_selection() {
        let mut files = abcd();
        files[2].is_disabled = true;
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(&files, &mut sel, ctrl_click(2));
        assert!(sel.is_selected(&files[0].id));
        assert_eq!(sel.anchor(), Some(2));
    }

    #[test]
    fn double_click_opens_only_the_clicked_file() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(&files, &mut sel, shift_click(2));
        assert_eq!(sel.len(), 3);

        let action = run(
            &files,
            &mut sel,
            InteractionEvent::MouseClick {
                index: 3,
                double: true,
                ctrl: false,
                shift: false,
            },
        )
        .expect("double click on openable file must dispatch");
        assert_eq!(action.id, ActionId::Open);
        assert_eq!(action.files, vec![files[3].clone()]);
        // Selection and anchor untouched.
        assert_eq!(sel.len(), 3);
        assert_eq!(sel.anchor(), Some(0));
    }

    #[test]
    fn double_click_on_disabled_file_does_nothing() {
        let mut files = abcd();
        files[1].is_disabled = true;
        let mut sel = SelectionState::new();
        let action = run(
            &files,
            &mut sel,
            InteractionEvent::MouseClick {
                index: 1,
                double: true,
                ctrl: false,
                shift: false,
            },
        );
        assert!(action.is_none());
    }

    #[test]
    fn enter_with_empty_selection_opens() {
        let files = abcd();
        let mut sel = SelectionState::new();
        let action = run(
            &files,
            &mut sel,
            InteractionEvent::KeyPress {
                index: 2,
                key: BrowserKey::Enter,
                ctrl: false,
            },
        )
        .expect("enter on openable file with empty selection opens");
        assert_eq!(action.id, ActionId::Open);
        assert_eq!(action.target, files[2]);
        assert_eq!(sel.anchor(), Some(2));
    }

    #[test]
    fn enter_with_active_selection_is_unhandled() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(&files, &mut sel, ctrl_click(1));
        let action = run(
            &files,
            &mut sel,
            InteractionEvent::KeyPress {
                index: 2,
                key: BrowserKey::Enter,
                ctrl: false,
            },
        );
        assert!(action.is_none());
    }

    #[test]
    fn space_toggles_selection() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(
            &files,
            &mut sel,
            InteractionEvent::KeyPress {
                index: 2,
                key: BrowserKey::Space,
                ctrl: false,
            },
        );
        assert_eq!(sel.len(), 2);

        // Ctrl-space is the exclusive variant.
        run(
            &files,
            &mut sel,
            InteractionEvent::KeyPress {
                index: 3,
                key: BrowserKey::Space,
                ctrl: true,
            },
        );
        assert_eq!(sel.len(), 1);
        assert!(sel.is_selected(&files[3].id));
    }

    #[test]
    fn other_keys_only_move_the_anchor() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(
            &files,
            &mut sel,
            InteractionEvent::KeyPress {
                index: 3,
                key: BrowserKey::Other,
                ctrl: false,
            },
        );
        assert_eq!(sel.anchor(), Some(3));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn drag_of_unselected_file_resets_to_single_selection() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(&files, &mut sel, ctrl_click(1));
        run(&files, &mut sel, InteractionEvent::DragStart { index: 3 });
        assert_eq!(sel.len(), 1);
        assert!(sel.is_selected(&files[3].id));
    }

    #[test]
    fn drag_of_selected_file_preserves_selection() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(&files, &mut sel, shift_click(2));
        run(&files, &mut sel, InteractionEvent::DragStart { index: 1 });
        assert_eq!(sel.len(), 3);
    }

    #[test]
    fn drop_carries_selection_to_target() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(&files, &mut sel, shift_click(2));
        run(&files, &mut sel, InteractionEvent::DragStart { index: 1 });

        let action = run(
            &files,
            &mut sel,
            InteractionEvent::DragEnd {
                source_index: 1,
                target_index: 3,
                effect: DropEffect::Move,
            },
        )
        .expect("drop on unselected target dispatches");
        assert_eq!(action.id, ActionId::Move);
        assert_eq!(action.target, files[3]);
        assert_eq!(action.files, files[0..=2].to_vec());
    }

    #[test]
    fn drop_with_copy_effect_duplicates() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, InteractionEvent::DragStart { index: 0 });
        let action = run(
            &files,
            &mut sel,
            InteractionEvent::DragEnd {
                source_index: 0,
                target_index: 2,
                effect: DropEffect::Copy,
            },
        )
        .unwrap();
        assert_eq!(action.id, ActionId::Duplicate);
    }

    #[test]
    fn drop_onto_selected_target_is_rejected() {
        let files = abcd();
        let mut sel = SelectionState::new();
        run(&files, &mut sel, click(0));
        run(&files, &mut sel, shift_click(2));
        let action = run(
            &files,
            &mut sel,
            InteractionEvent::DragEnd {
                source_index: 1,
                target_index: 2,
                effect: DropEffect::Move,
            },
        );
        assert!(action.is_none());
    }

    #[test]
    fn drop_with_empty_selection_carries_the_drag_source() {
        let files = abcd();
        let mut sel = SelectionState::new();
        let action = run(
            &files,
            &mut sel,
            InteractionEvent::DragEnd {
                source_index: 1,
                target_index: 3,
                effect: DropEffect::Move,
            },
        )
        .unwrap();
        assert_eq!(action.files, vec![files[1].clone()]);
    }

    #[test]
    fn open_parent_targets_the_parent() {
        let files = abcd();
        let parent = entry_dir("..");
        let mut sel = SelectionState::new();
        let mut ctx = InterpreterCtx {
            files: &files,
            selection: &mut sel,
            parent: Some(&parent),
            selection_enabled: true,
        };
        let action = interpret(&mut ctx, InteractionEvent::OpenParentRequest).unwrap();
        assert_eq!(action.id, ActionId::Open);
        assert_eq!(action.target, parent);
    }

    #[test]
    fn open_parent_without_parent_is_a_noop() {
        let files = abcd();
        let mut sel = SelectionState::new();
        let action = run(&files, &mut sel, InteractionEvent::OpenParentRequest);
        assert!(action.is_none());
    }

    #[test]
    fn chain_folder_click_opens_unconditionally() {
        let files = abcd();
        let folder = entry_dir("crumb");
        let mut sel = SelectionState::new();
        let action = run(
            &files,
            &mut sel,
            InteractionEvent::ChainFolderClick {
                folder: folder.clone(),
            },
        )
        .unwrap();
        assert_eq!(action.id, ActionId::Open);
        assert_eq!(action.target, folder);
    }

    #[test]
    fn disabled_selection_blocks_mutation_but_not_open() {
        let files = abcd();
        let mut sel = SelectionState::new();
        let mut ctx = InterpreterCtx {
            files: &files,
            selection: &mut sel,
            parent: None,
            selection_enabled: false,
        };
        assert!(interpret(&mut ctx, click(0)).is_none());
        let open = interpret(
            &mut ctx,
            InteractionEvent::MouseClick {
                index: 1,
                double: true,
                ctrl: false,
                shift: false,
            },
        );
        assert!(open.is_some());
        assert!(sel.is_empty());
        assert_eq!(sel.anchor(), None);
    }

    fn entry_dir(name: &str) -> FileEntry {
        FileEntry {
            is_directory: true,
            ..entry(name)
        }
    }
}
