//! Viewer surface creation.

use async_trait::async_trait;

use crate::error::RelayError;

/// Opens a new presentation surface for the inspector viewer.
///
/// Called by the background host each time a snapshot arrives.
#[async_trait]
pub trait ViewerLauncher: Send + Sync {
    async fn open_viewer(&self) -> Result<(), RelayError>;
}
