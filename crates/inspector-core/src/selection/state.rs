//! Selection states and transition results.

use std::fmt;
use std::time::Duration;

use inspector_protocols::NodeHandle;

/// Where the page is in the select-then-capture flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Normal browsing.
    #[default]
    Idle,
    /// The next click is intercepted for selection.
    InspectArmed,
    /// An element was selected and its capture is pending.
    Captured,
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::InspectArmed => write!(f, "inspect-armed"),
            Self::Captured => write!(f, "captured"),
        }
    }
}

/// What led to a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureTrigger {
    /// Primary click while armed.
    Click,
    /// Right-click while armed.
    ContextMenu,
    /// Right-click with an earlier selection still live.
    Direct,
    /// The viewer asked for a neighboring element.
    Recapture,
}

/// A capture the caller must run once `delay` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCapture {
    pub target: NodeHandle,
    pub delay: Duration,
    pub trigger: CaptureTrigger,
}

/// Result of a right-click.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContextMenuOutcome {
    /// Suppress the browser's native context menu.
    pub prevent_default: bool,
    pub capture: Option<PendingCapture>,
}
