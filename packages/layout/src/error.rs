//! Error types for the layout model

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Duplicate component id: {0}")]
    DuplicateComponentId(String),

    #[error("Failed to encode layout: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Value is not a well-formed layout: {0}")]
    Decode(#[source] serde_json::Error),
}
