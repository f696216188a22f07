//! Cross-context relay.
//!
//! The capturing page and the viewer never share memory with the background
//! context. Both talk to it through a [`RelayClient`], which sends a typed
//! [`RelayRequest`](inspector_protocols::RelayRequest) over an mpsc channel
//! together with a oneshot reply sender. The [`BackgroundHost`] task owns the
//! single snapshot slot, so last-write-wins needs no lock.

mod client;
mod host;
mod launcher;

pub use client::RelayClient;
pub use host::BackgroundHost;
pub use launcher::{ChannelLauncher, ViewerRequest};

use tokio::sync::oneshot;

use inspector_protocols::{RelayError, RelayRequest, RelayResponse};

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;

/// Request paired with the channel the host answers on.
pub(crate) struct Envelope {
    pub request: RelayRequest,
    pub reply: oneshot::Sender<Result<RelayResponse, RelayError>>,
}
