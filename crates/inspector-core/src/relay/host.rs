//! Background holder task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use inspector_config::RelayConfig;
use inspector_protocols::{
    ElementSnapshot, RelayError, RelayRequest, RelayResponse, ViewerLauncher,
};

use super::{Envelope, RelayClient};

/// Handle to the running background context.
///
/// Dropping the handle does not stop the task; call [`shutdown`](Self::shutdown).
pub struct BackgroundHost {
    tx: mpsc::Sender<Envelope>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl BackgroundHost {
    /// Spawn the holder task with default relay settings.
    pub fn spawn(launcher: Arc<dyn ViewerLauncher>) -> Self {
        Self::spawn_with(launcher, &RelayConfig::default())
    }

    pub fn spawn_with(launcher: Arc<dyn ViewerLauncher>, config: &RelayConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));
        let cancel = CancellationToken::new();

        let handle = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                run(rx, launcher, cancel).await;
            })
        };

        info!("Background host started");
        Self { tx, cancel, handle }
    }

    /// Client that talks to this host.
    pub fn client(&self, timeout: Duration) -> RelayClient {
        RelayClient::new(self.tx.clone(), timeout)
    }

    /// Stop the task, as when the extension is reloaded under the page.
    ///
    /// Requests already queued are dropped unanswered.
    pub fn shutdown(&self) {
        info!("Background host shutting down");
        self.cancel.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Wait for the task to exit after [`shutdown`](Self::shutdown).
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            error!("Background host task failed: {}", e);
        }
    }
}

async fn run(
    mut rx: mpsc::Receiver<Envelope>,
    launcher: Arc<dyn ViewerLauncher>,
    cancel: CancellationToken,
) {
    let mut slot: Option<Box<ElementSnapshot>> = None;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Background host cancelled");
                break;
            }
            envelope = rx.recv() => {
                let Some(Envelope { request, reply }) = envelope else {
                    debug!("All relay clients dropped");
                    break;
                };
                let result = handle(request, &mut slot, launcher.as_ref()).await;
                if reply.send(result).is_err() {
                    debug!("Relay client stopped waiting for a reply");
                }
            }
        }
    }
}

async fn handle(
    request: RelayRequest,
    slot: &mut Option<Box<ElementSnapshot>>,
    launcher: &dyn ViewerLauncher,
) -> Result<RelayResponse, RelayError> {
    match request {
        RelayRequest::OpenInspector { element_data } => {
            debug!("Storing snapshot of {}", element_data.selector_label());
            *slot = Some(element_data);
            launcher.open_viewer().await?;
            Ok(RelayResponse::Delivered)
        }
        RelayRequest::GetElementData => Ok(RelayResponse::ElementData(slot.clone())),
    }
}
