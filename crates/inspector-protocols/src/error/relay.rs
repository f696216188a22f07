//! Cross-context relay errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The background context is gone (extension reloaded or invalidated).
    #[error("Background host unreachable: {0}")]
    HostUnreachable(String),

    #[error("Background host did not answer within {0} ms")]
    Timeout(u64),

    #[error("Invalid relay message: {0}")]
    InvalidMessage(String),

    #[error("Failed to open viewer: {0}")]
    LauncherFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RelayError {
    /// Whether the capturing context should ask the user to reload the page.
    pub fn requires_reload(&self) -> bool {
        matches!(self, Self::HostUnreachable(_) | Self::Timeout(_))
    }
}
