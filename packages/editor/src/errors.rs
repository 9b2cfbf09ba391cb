//! Error types for the editor

use folio_layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),
}
