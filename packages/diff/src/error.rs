//! Error types for diff application

use folio_layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Cannot descend into {kind} at '{path}'")]
    NotAContainer { path: String, kind: &'static str },

    #[error("Invalid change at '{path}': {reason}")]
    InvalidChange { path: String, reason: String },

    #[error(transparent)]
    Layout(#[from] LayoutError),
}
