//! Selection state machine.

use std::time::Duration;

use tracing::{debug, info, warn};

use inspector_config::InspectConfig;
use inspector_protocols::{
    selector_label, CaptureError, Cursor, Document, NodeHandle, Page, PageSurface,
};

use super::state::{CaptureTrigger, ContextMenuOutcome, PendingCapture, SelectionState};
use crate::notices::NoticeFactory;

/// Timing and decoration used while selecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSettings {
    pub click_grace: Duration,
    pub context_menu_grace: Duration,
    pub outline: String,
    pub banner: String,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self::from(&InspectConfig::default())
    }
}

impl From<&InspectConfig> for SelectionSettings {
    fn from(config: &InspectConfig) -> Self {
        Self {
            click_grace: config.click_grace(),
            context_menu_grace: config.context_menu_grace(),
            outline: config.outline.clone(),
            banner: config.banner.clone(),
        }
    }
}

/// Owns inspect mode and the current selection for one page.
///
/// Every transition takes the page explicitly; the machine never holds it.
/// The interceptor and banner exist exactly while the state is
/// [`SelectionState::InspectArmed`].
#[derive(Debug, Clone)]
pub struct SelectionMachine {
    state: SelectionState,
    selected: Option<NodeHandle>,
    settings: SelectionSettings,
    notices: NoticeFactory,
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new(SelectionSettings::default(), NoticeFactory::default())
    }
}

impl SelectionMachine {
    pub fn new(settings: SelectionSettings, notices: NoticeFactory) -> Self {
        Self {
            state: SelectionState::Idle,
            selected: None,
            settings,
            notices,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Whether the next click will be intercepted.
    pub fn is_inspect_mode(&self) -> bool {
        self.state == SelectionState::InspectArmed
    }

    /// The current selection, which may since have been detached.
    pub fn selected(&self) -> Option<NodeHandle> {
        self.selected
    }

    pub fn settings(&self) -> &SelectionSettings {
        &self.settings
    }

    /// Arm inspect mode, or disarm it when already armed. Returns the new mode.
    pub fn toggle_inspect_mode<P: Page>(&mut self, page: &mut P) -> bool {
        if self.is_inspect_mode() {
            self.disarm(page);
            self.selected = None;
            info!("Inspect mode off");
        } else {
            page.set_cursor(Cursor::Crosshair);
            page.show_banner(&self.settings.banner);
            page.install_interceptor();
            self.state = SelectionState::InspectArmed;
            info!("Inspect mode on");
        }
        self.is_inspect_mode()
    }

    /// Escape: leave inspect mode if armed. Returns whether anything changed.
    pub fn cancel<P: Page>(&mut self, page: &mut P) -> bool {
        if !self.is_inspect_mode() {
            return false;
        }
        self.toggle_inspect_mode(page);
        true
    }

    /// Primary click on the interceptor at viewport coordinates.
    ///
    /// Stays armed when nothing selectable is under the point.
    pub fn click<P: Page>(&mut self, page: &mut P, x: f64, y: f64) -> Option<PendingCapture> {
        if !self.is_inspect_mode() {
            return None;
        }
        let target = hit_through_interceptor(page, x, y)?;

        let pending = self.select(page, target, self.settings.click_grace, CaptureTrigger::Click);
        page.show_notice(self.notices.selected(&label_of(page, target)));
        Some(pending)
    }

    /// Right-click at viewport coordinates.
    ///
    /// While armed the element under the interceptor is selected with the
    /// shorter grace delay. Otherwise an earlier selection is reopened at
    /// once, and with no selection the native menu is left alone.
    pub fn context_menu<P: Page>(&mut self, page: &mut P, x: f64, y: f64) -> ContextMenuOutcome {
        if self.is_inspect_mode() {
            let capture = hit_through_interceptor(page, x, y).map(|target| {
                self.select(
                    page,
                    target,
                    self.settings.context_menu_grace,
                    CaptureTrigger::ContextMenu,
                )
            });
            return ContextMenuOutcome {
                prevent_default: true,
                capture,
            };
        }

        match self.selected {
            Some(selected) => {
                self.state = SelectionState::Captured;
                ContextMenuOutcome {
                    prevent_default: true,
                    capture: Some(PendingCapture {
                        target: selected,
                        delay: Duration::ZERO,
                        trigger: CaptureTrigger::Direct,
                    }),
                }
            }
            None => ContextMenuOutcome::default(),
        }
    }

    /// Select `target` without going through inspect mode.
    pub fn select_directly<P: Page>(&mut self, page: &mut P, target: NodeHandle) -> PendingCapture {
        self.select(page, target, Duration::ZERO, CaptureTrigger::Recapture)
    }

    /// Check that the selection can still be captured, dropping it when stale.
    pub fn live_selection<P: Page>(&mut self, page: &P) -> Result<NodeHandle, CaptureError> {
        let selected = self.selected.ok_or(CaptureError::NoSelection)?;
        if !page.is_connected(selected) {
            warn!("Selected element {} was removed from the page", selected);
            self.selected = None;
            return Err(CaptureError::StaleReference);
        }
        Ok(selected)
    }

    /// Forget the selection without touching the page.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Capture finished (or failed): remove the outline and return to idle.
    ///
    /// The state is left alone when `target` is no longer the selection, so
    /// an earlier capture coming due cannot end a newer one.
    pub fn finish_capture<P: Page>(&mut self, page: &mut P, target: NodeHandle) {
        if let Err(e) = page.set_outline(target, None) {
            debug!("Could not remove outline from {}: {}", target, e);
        }
        if self.state == SelectionState::Captured && self.selected == Some(target) {
            self.state = SelectionState::Idle;
        }
    }

    fn select<P: Page>(
        &mut self,
        page: &mut P,
        target: NodeHandle,
        delay: Duration,
        trigger: CaptureTrigger,
    ) -> PendingCapture {
        self.selected = Some(target);
        if let Err(e) = page.set_outline(target, Some(&self.settings.outline)) {
            debug!("Could not outline {}: {}", target, e);
        }
        self.disarm(page);
        self.state = SelectionState::Captured;
        info!("Selected {} via {:?}", label_of(page, target), trigger);

        PendingCapture {
            target,
            delay,
            trigger,
        }
    }

    /// Remove the interceptor, banner and crosshair.
    fn disarm<P: PageSurface>(&mut self, page: &mut P) {
        page.remove_interceptor();
        page.hide_banner();
        page.set_cursor(Cursor::Default);
        self.state = SelectionState::Idle;
    }
}

/// Hit-test at a point with the interceptor made transparent.
fn hit_through_interceptor<P: Page>(page: &mut P, x: f64, y: f64) -> Option<NodeHandle> {
    page.set_interceptor_pointer_events(false);
    let hit = page.element_from_point(x, y);
    page.set_interceptor_pointer_events(true);

    let target = hit.filter(|t| page.tag_name(*t).is_some());
    if target.is_none() {
        debug!("Nothing selectable at ({}, {})", x, y);
    }
    target
}

fn label_of<D: Document>(page: &D, node: NodeHandle) -> String {
    selector_label(
        &page.tag_name(node).unwrap_or_default(),
        &page.id(node).unwrap_or_default(),
        &page.class_name(node).unwrap_or_default(),
    )
}
