//! Page chrome side effects.

use std::time::Duration;

use crate::dom::{Document, NodeHandle};
use crate::error::DomError;

/// Mouse cursor shown over the page body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient, auto-dismissing message drawn over the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: Option<String>,
    pub dismiss_after: Duration,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, dismiss_after: Duration) -> Self {
        Self {
            kind,
            title: title.into(),
            detail: None,
            dismiss_after,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Mutations the inspector performs on the page while selecting.
///
/// None of these touch the page's own content except [`set_outline`](Self::set_outline),
/// which writes an inline style the inspector later removes.
pub trait PageSurface {
    fn set_cursor(&mut self, cursor: Cursor);

    fn show_banner(&mut self, text: &str);

    fn hide_banner(&mut self);

    /// Install the full-viewport transparent click interceptor above all content.
    fn install_interceptor(&mut self);

    fn remove_interceptor(&mut self);

    /// Toggle whether the interceptor takes part in hit testing.
    fn set_interceptor_pointer_events(&mut self, enabled: bool);

    fn set_outline(&mut self, node: NodeHandle, outline: Option<&str>) -> Result<(), DomError>;

    fn show_notice(&mut self, notice: Notice);
}

/// A page the inspector can both read and decorate.
pub trait Page: Document + PageSurface {}

impl<T: Document + PageSurface> Page for T {}
