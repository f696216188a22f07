//! Page events routed into the content script.

/// Something that happened on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The control surface asked to flip inspect mode.
    ToggleInspect,
    Key(KeyEvent),
    /// Primary click at viewport coordinates.
    Click { x: f64, y: f64 },
    /// Right-click at viewport coordinates.
    ContextMenu { x: f64, y: f64 },
    /// The "Element Inspector" context-menu entry was chosen.
    ContextMenuInvoked,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Ctrl+Shift+I, or Cmd+Shift+I on macOS.
    pub fn is_toggle(&self) -> bool {
        (self.ctrl || self.meta) && self.shift && self.key.eq_ignore_ascii_case("i")
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape"
    }
}

/// What the host should do with the original browser event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const PASS: Self = Self {
        prevent_default: false,
    };
    pub const CONSUMED: Self = Self {
        prevent_default: true,
    };
}
