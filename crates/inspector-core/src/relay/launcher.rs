//! Viewer launcher backed by a channel.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use inspector_protocols::{RelayError, ViewerLauncher};

/// One request for a new viewer surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerRequest {
    /// 1-based count of viewers requested so far.
    pub sequence: u64,
}

/// Forwards viewer requests to whoever owns the receiving end.
pub struct ChannelLauncher {
    tx: mpsc::UnboundedSender<ViewerRequest>,
    opened: AtomicU64,
}

impl ChannelLauncher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ViewerRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                opened: AtomicU64::new(0),
            },
            rx,
        )
    }

    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ViewerLauncher for ChannelLauncher {
    async fn open_viewer(&self) -> Result<(), RelayError> {
        let sequence = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Opening viewer #{}", sequence);
        self.tx
            .send(ViewerRequest { sequence })
            .map_err(|_| RelayError::LauncherFailed("viewer receiver closed".to_string()))
    }
}
