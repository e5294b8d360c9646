//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

use super::action::ActionId;

/// The primary error type for the `core` module.
///
/// This enum encapsulates all failures that can occur while listing
/// directories, performing file operations, or dispatching actions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Represents an I/O error, typically from file system operations.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Represents a path that was expected to be a directory but was not.
    #[error("Path is not a valid directory: {0}")]
    NotADirectory(PathBuf),

    /// Represents a dispatched action id for which no behavior is registered.
    #[error("No handler registered for action `{0}`")]
    MissingHandler(ActionId),

    /// Represents a failure inside an action handler.
    #[error("Action `{id}` failed: {reason}")]
    ActionFailed { id: ActionId, reason: String },
}
