//! On-page notices shown by the content script.

use std::time::Duration;

use inspector_config::NoticeConfig;
use inspector_protocols::{Notice, NoticeKind};

/// Builds the user-facing notices with configured dismiss times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeFactory {
    success: Duration,
    error: Duration,
    warning: Duration,
}

impl Default for NoticeFactory {
    fn default() -> Self {
        Self::from(&NoticeConfig::default())
    }
}

impl From<&NoticeConfig> for NoticeFactory {
    fn from(config: &NoticeConfig) -> Self {
        Self {
            success: config.success(),
            error: config.error(),
            warning: config.warning(),
        }
    }
}

impl NoticeFactory {
    /// Element picked, inspector about to open.
    pub fn selected(&self, label: &str) -> Notice {
        Notice::new(NoticeKind::Success, format!("Selected: {}", label), self.success)
            .with_detail("Opening inspector...")
    }

    /// Snapshot could not be built.
    pub fn capture_failed(&self) -> Notice {
        Notice::new(NoticeKind::Error, "Error inspecting element", self.error)
            .with_detail("Try selecting a different element")
    }

    /// Selected element disappeared before capture.
    pub fn stale_selection(&self) -> Notice {
        Notice::new(NoticeKind::Warning, "Selected element is gone", self.warning)
            .with_detail("The page changed. Select the element again")
    }

    /// Background host unreachable.
    pub fn context_invalidated(&self) -> Notice {
        Notice::new(NoticeKind::Warning, "Extension Reloaded", self.warning)
            .with_detail("Please refresh the page and try again")
    }

    /// Context-menu entry used with nothing selected.
    pub fn nothing_selected(&self) -> Notice {
        Notice::new(
            NoticeKind::Info,
            "Please first click on an element while in inspect mode, then right-click to open Element Inspector.",
            self.warning,
        )
    }
}
