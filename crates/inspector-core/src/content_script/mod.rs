//! Per-page event loop.
//!
//! [`ContentScript`] owns the page, the selection machine, the snapshot
//! builder and a relay client. Every page event goes through
//! [`ContentScript::handle_event`]. Grace delays are spawned sleeps that hand
//! the capture back on an internal channel; [`ContentScript::run`] and
//! [`ContentScript::settle`] pick them up when they come due, so no event
//! waits on a grace delay.

mod event;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use inspector_config::Config;
use inspector_protocols::{selector_label, CaptureError, NodeHandle, Page, TreeNode};

use crate::error::InspectorError;
use crate::notices::NoticeFactory;
use crate::relay::RelayClient;
use crate::selection::{PendingCapture, SelectionMachine, SelectionSettings, SelectionState};
use crate::snapshot::truncate::truncate;
use crate::snapshot::{CaptureLimits, SnapshotBuilder};

pub use event::{EventOutcome, KeyEvent, PageEvent};

#[cfg(test)]
#[path = "content_script_tests.rs"]
mod tests;

pub struct ContentScript<P: Page> {
    page: P,
    machine: SelectionMachine,
    builder: SnapshotBuilder,
    relay: RelayClient,
    notices: NoticeFactory,
    due_tx: mpsc::UnboundedSender<PendingCapture>,
    due_rx: mpsc::UnboundedReceiver<PendingCapture>,
    /// Captures still waiting out their grace delay.
    pending: usize,
}

impl<P: Page> ContentScript<P> {
    pub fn new(page: P, relay: RelayClient) -> Self {
        Self::from_config(page, relay, &Config::default())
    }

    pub fn from_config(page: P, relay: RelayClient, config: &Config) -> Self {
        let notices = NoticeFactory::from(&config.notices);
        let (due_tx, due_rx) = mpsc::unbounded_channel();
        Self {
            page,
            machine: SelectionMachine::new(SelectionSettings::from(&config.inspect), notices),
            builder: SnapshotBuilder::new(CaptureLimits::from(&config.capture)),
            relay,
            notices,
            due_tx,
            due_rx,
            pending: 0,
        }
    }

    pub fn with_builder(mut self, builder: SnapshotBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn machine(&self) -> &SelectionMachine {
        &self.machine
    }

    pub fn state(&self) -> SelectionState {
        self.machine.state()
    }

    pub fn is_inspect_mode(&self) -> bool {
        self.machine.is_inspect_mode()
    }

    pub fn toggle_inspect_mode(&mut self) -> bool {
        self.machine.toggle_inspect_mode(&mut self.page)
    }

    pub fn pending_captures(&self) -> usize {
        self.pending
    }

    /// Process events until every sender is dropped and no capture is still
    /// waiting out its grace delay, then hand the script back.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<PageEvent>) -> Self {
        let mut open = true;
        while open || self.pending > 0 {
            tokio::select! {
                event = events.recv(), if open => match event {
                    Some(event) => {
                        self.handle_event(event).await;
                    }
                    None => {
                        debug!("Content script queue closed");
                        open = false;
                    }
                },
                Some(pending) = self.due_rx.recv(), if self.pending > 0 => {
                    self.fire(pending).await;
                }
            }
        }
        self
    }

    /// Wait for every pending capture to come due and run it.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            match self.due_rx.recv().await {
                Some(pending) => self.fire(pending).await,
                None => break,
            }
        }
    }

    pub async fn handle_event(&mut self, event: PageEvent) -> EventOutcome {
        match event {
            PageEvent::ToggleInspect => {
                self.toggle_inspect_mode();
                EventOutcome::PASS
            }
            PageEvent::Key(key) if key.is_toggle() => {
                self.toggle_inspect_mode();
                EventOutcome::CONSUMED
            }
            PageEvent::Key(key) if key.is_escape() => {
                if self.machine.cancel(&mut self.page) {
                    EventOutcome::CONSUMED
                } else {
                    EventOutcome::PASS
                }
            }
            PageEvent::Key(_) => EventOutcome::PASS,
            PageEvent::Click { x, y } => {
                if !self.machine.is_inspect_mode() {
                    return EventOutcome::PASS;
                }
                if let Some(pending) = self.machine.click(&mut self.page, x, y) {
                    self.schedule(pending).await;
                }
                EventOutcome::CONSUMED
            }
            PageEvent::ContextMenu { x, y } => {
                let outcome = self.machine.context_menu(&mut self.page, x, y);
                if let Some(pending) = outcome.capture {
                    self.schedule(pending).await;
                }
                EventOutcome {
                    prevent_default: outcome.prevent_default,
                }
            }
            PageEvent::ContextMenuInvoked => {
                match self.machine.live_selection(&self.page) {
                    Ok(target) => report(self.open_inspector(target).await),
                    Err(e) => self.show_failure(&e.into()),
                }
                EventOutcome::PASS
            }
        }
    }

    /// Capture `target` and relay it to the background host.
    ///
    /// The outline is removed and the machine returns to idle whatever the
    /// outcome; failures are also shown to the user as a notice.
    pub async fn open_inspector(&mut self, target: NodeHandle) -> Result<(), InspectorError> {
        let result = self.capture_and_send(target).await;
        self.machine.finish_capture(&mut self.page, target);

        if let Err(e) = &result {
            if matches!(e, InspectorError::Capture(CaptureError::StaleReference))
                && self.machine.selected() == Some(target)
            {
                self.machine.clear_selection();
            }
            self.show_failure(e);
        }
        result
    }

    /// Switch the inspector to an element picked from a snapshot's tree.
    pub async fn recapture(&mut self, node: &TreeNode) -> Result<(), InspectorError> {
        let Some(target) = self.resolve(node) else {
            let err = InspectorError::from(CaptureError::InvalidTarget(format!(
                "no live element matches {}",
                selector_label(&node.tag_name, &node.id, &node.class_name)
            )));
            self.show_failure(&err);
            return Err(err);
        };
        self.machine.select_directly(&mut self.page, target);
        self.open_inspector(target).await
    }

    /// Find the live element a tree node was captured from.
    ///
    /// Matches by id when the node has one, otherwise by tag, class and
    /// (budgeted) text content.
    pub fn resolve(&self, node: &TreeNode) -> Option<NodeHandle> {
        let tag = node.tag_name.to_uppercase();
        let text_limit = self.builder.limits().tree_text;

        self.page.elements().into_iter().find(|handle| {
            if !node.id.is_empty() {
                return self.page.id(*handle).is_ok_and(|id| id == node.id);
            }
            self.page.tag_name(*handle).is_some_and(|t| t == tag)
                && self
                    .page
                    .class_name(*handle)
                    .is_ok_and(|class| class == node.class_name)
                && self
                    .page
                    .text_content(*handle)
                    .is_ok_and(|text| truncate(&text, text_limit).0 == node.text_content)
        })
    }

    async fn capture_and_send(&mut self, target: NodeHandle) -> Result<(), InspectorError> {
        let snapshot = self.builder.capture(&self.page, target)?;
        let label = snapshot.selector_label();
        self.relay.send(snapshot).await?;
        info!("Relayed snapshot of {}", label);
        Ok(())
    }

    async fn schedule(&mut self, pending: PendingCapture) {
        if pending.delay.is_zero() {
            report(self.open_inspector(pending.target).await);
            return;
        }

        self.pending += 1;
        let due = self.due_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(pending.delay).await;
            if due.send(pending).is_err() {
                debug!("Content script gone before capture of {}", pending.target);
            }
        });
    }

    async fn fire(&mut self, pending: PendingCapture) {
        self.pending = self.pending.saturating_sub(1);
        debug!("Grace period over for {}", pending.target);
        report(self.open_inspector(pending.target).await);
    }

    fn show_failure(&mut self, error: &InspectorError) {
        let notice = match error {
            InspectorError::Capture(CaptureError::StaleReference) => self.notices.stale_selection(),
            InspectorError::Capture(CaptureError::NoSelection) => self.notices.nothing_selected(),
            InspectorError::Capture(CaptureError::InvalidTarget(_)) => self.notices.capture_failed(),
            InspectorError::Relay(e) if e.requires_reload() => self.notices.context_invalidated(),
            InspectorError::Relay(_) => self.notices.capture_failed(),
        };
        self.page.show_notice(notice);
    }
}

fn report(result: Result<(), InspectorError>) {
    match result {
        Ok(()) => {}
        Err(InspectorError::Relay(e)) if e.requires_reload() => {
            warn!("Background host unreachable, snapshot discarded: {}", e);
        }
        Err(e) => error!("Inspector failed: {}", e),
    }
}
