//! The action model: identifiers, display metadata, and the registry.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FileEntry;

/// Identifier of a semantic action.
///
/// The built-in set is closed so dispatch can match exhaustively; hosts
/// register additional ids through `Custom`. On the wire an id is its
/// kebab-case string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionId {
    Open,
    OpenParent,
    Move,
    Duplicate,
    SelectAll,
    ClearSelection,
    Custom(String),
}

impl ActionId {
    pub fn as_str(&self) -> &str {
        match self {
            ActionId::Open => "open",
            ActionId::OpenParent => "open-parent",
            ActionId::Move => "move",
            ActionId::Duplicate => "duplicate",
            ActionId::SelectAll => "select-all",
            ActionId::ClearSelection => "clear-selection",
            ActionId::Custom(id) => id,
        }
    }
}

impl From<String> for ActionId {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "open" => ActionId::Open,
            "open-parent" => ActionId::OpenParent,
            "move" => ActionId::Move,
            "duplicate" => ActionId::Duplicate,
            "select-all" => ActionId::SelectAll,
            "clear-selection" => ActionId::ClearSelection,
            _ => ActionId::Custom(raw),
        }
    }
}

impl From<ActionId> for String {
    fn from(id: ActionId) -> Self {
        id.as_str().to_string()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for one registered action, consumed by the frontend
/// toolbar. Definitions are immutable after registration; changing the
/// supplied set replaces the whole registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub id: ActionId,
    pub label: String,
    /// Icon name understood by the frontend.
    pub icon: String,
    /// When set, invoking the action from the toolbar requires a non-empty
    /// selection; the toolbar renders the entry disabled otherwise.
    pub requires_selection: bool,
    pub show_in_toolbar: bool,
}

/// A host-meaningful intent synthesized from low-level interaction events.
/// Immutable once constructed and consumed exactly once by dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticAction {
    pub id: ActionId,
    /// The file the action is conceptually about.
    pub target: FileEntry,
    /// The full list of files the action applies to.
    pub files: Vec<FileEntry>,
}

impl SemanticAction {
    /// The common single-file Open shape.
    pub fn open(file: &FileEntry) -> Self {
        Self {
            id: ActionId::Open,
            target: file.clone(),
            files: vec![file.clone()],
        }
    }
}

/// The set of actions one browser instance knows about, in toolbar order.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    definitions: Vec<ActionDefinition>,
}

impl ActionRegistry {
    /// The built-in action set.
    pub fn builtin() -> Self {
        let def = |id: ActionId, label: &str, icon: &str, requires: bool, toolbar: bool| {
            ActionDefinition {
                id,
                label: label.to_string(),
                icon: icon.to_string(),
                requires_selection: requires,
                show_in_toolbar: toolbar,
            }
        };
        Self {
            definitions: vec![
                def(ActionId::OpenParent, "Up", "arrow-up", false, true),
                def(ActionId::Open, "Open", "open", true, true),
                def(ActionId::SelectAll, "Select all", "select-all", false, true),
                def(ActionId::ClearSelection, "Clear selection", "clear", true, true),
                def(ActionId::Duplicate, "Duplicate", "copy", true, false),
                def(ActionId::Move, "Move", "move", true, false),
            ],
        }
    }

    /// Builds the registry from the built-in set plus host extensions, or
    /// from the extensions alone when the host disables the built-ins.
    pub fn with_extensions(extensions: &[ActionDefinition], disable_builtins: bool) -> Self {
        let mut registry = if disable_builtins {
            Self {
                definitions: Vec::new(),
            }
        } else {
            Self::builtin()
        };
        for ext in extensions {
            if registry.get(&ext.id).is_some() {
                tracing::warn!("duplicate action definition `{}` ignored", ext.id);
                continue;
            }
            registry.definitions.push(ext.clone());
        }
        registry
    }

    pub fn get(&self, id: &ActionId) -> Option<&ActionDefinition> {
        self.definitions.iter().find(|d| &d.id == id)
    }

    pub fn definitions(&self) -> &[ActionDefinition] {
        &self.definitions
    }
}
