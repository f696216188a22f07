//! Sending side of the relay.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, trace, warn};

use inspector_protocols::{ElementSnapshot, RelayError, RelayRequest, RelayResponse};

use super::Envelope;

/// Talks to the [`BackgroundHost`](super::BackgroundHost).
///
/// Cheap to clone; every clone shares the host channel.
#[derive(Clone)]
pub struct RelayClient {
    tx: mpsc::Sender<Envelope>,
    timeout: Duration,
}

impl RelayClient {
    pub(crate) fn new(tx: mpsc::Sender<Envelope>, timeout: Duration) -> Self {
        Self { tx, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Hand a snapshot to the host and ask it to open a viewer.
    ///
    /// Not retried; a failed send leaves the caller to discard the snapshot.
    pub async fn send(&self, snapshot: ElementSnapshot) -> Result<(), RelayError> {
        match self.request(RelayRequest::open_inspector(snapshot)).await? {
            RelayResponse::Delivered => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    /// The most recently stored snapshot. Does not clear the slot.
    pub async fn fetch(&self) -> Result<Option<ElementSnapshot>, RelayError> {
        match self.request(RelayRequest::GetElementData).await? {
            RelayResponse::ElementData(data) => Ok(data.map(|snapshot| *snapshot)),
            other => Err(unexpected(&other)),
        }
    }

    /// Validate a raw wire message, forward it and return the wire reply.
    ///
    /// `openInspector` has no reply payload and yields `None`.
    pub async fn send_json(&self, raw: &str) -> Result<Option<String>, RelayError> {
        let request = RelayRequest::from_json(raw)?;
        self.request(request).await?.into_json()
    }

    /// Send one request and wait for the host's reply, bounded by the timeout.
    pub async fn request(&self, request: RelayRequest) -> Result<RelayResponse, RelayError> {
        let action = request.action();
        trace!("Relay send: {}", action);

        match tokio::time::timeout(self.timeout, self.exchange(request)).await {
            Ok(result) => {
                if let Err(e) = &result {
                    debug!("Relay {} failed: {}", action, e);
                }
                result
            }
            Err(_) => {
                warn!("Relay {} timed out after {:?}", action, self.timeout);
                Err(RelayError::Timeout(self.timeout.as_millis() as u64))
            }
        }
    }

    async fn exchange(&self, request: RelayRequest) -> Result<RelayResponse, RelayError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .await
            .map_err(|_| RelayError::HostUnreachable("channel closed".to_string()))?;

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(RelayError::HostUnreachable("response dropped".to_string())),
        }
    }
}

fn unexpected(response: &RelayResponse) -> RelayError {
    let kind = match response {
        RelayResponse::Delivered => "delivered",
        RelayResponse::ElementData(_) => "elementData",
    };
    RelayError::InvalidMessage(format!("unexpected response: {}", kind))
}
