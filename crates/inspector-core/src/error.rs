//! Errors surfaced by the content script.

use thiserror::Error;

use inspector_protocols::{CaptureError, RelayError};

#[derive(Debug, Error)]
pub enum InspectorError {
    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}
