//! Snapshot capture errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Invalid element provided: {0}")]
    InvalidTarget(String),

    #[error("Selected element is no longer attached to the document")]
    StaleReference,

    #[error("No element selected")]
    NoSelection,
}
