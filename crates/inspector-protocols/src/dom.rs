//! Read-only DOM access.
//!
//! [`Document`] is the seam between the inspector and whatever hosts the page.
//! Every getter that can run page code (and therefore fail) returns a
//! `Result`, so that callers can degrade one field at a time.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomError;
use crate::types::Rect;

/// Non-owning reference to a node in a [`Document`].
///
/// A handle may outlive the node it points at; use
/// [`Document::is_connected`] before trusting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeHandle(pub u64);

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read access to a live page.
pub trait Document {
    /// Upper-case tag name, or `None` when the node is not an element.
    fn tag_name(&self, node: NodeHandle) -> Option<String>;

    fn id(&self, node: NodeHandle) -> Result<String, DomError>;

    /// Class attribute as a plain string (SVG animated strings resolved).
    fn class_name(&self, node: NodeHandle) -> Result<String, DomError>;

    /// Attributes in source order.
    fn attributes(&self, node: NodeHandle) -> Result<Vec<(String, String)>, DomError>;

    fn inner_html(&self, node: NodeHandle) -> Result<String, DomError>;

    fn outer_html(&self, node: NodeHandle) -> Result<String, DomError>;

    fn text_content(&self, node: NodeHandle) -> Result<String, DomError>;

    /// Viewport-relative border box after layout.
    fn bounding_client_rect(&self, node: NodeHandle) -> Result<Rect, DomError>;

    /// Every resolved style property the page reports, custom properties included.
    fn computed_style(&self, node: NodeHandle) -> Result<Vec<(String, String)>, DomError>;

    fn parent_element(&self, node: NodeHandle) -> Option<NodeHandle>;

    /// Element children in document order.
    fn children(&self, node: NodeHandle) -> Vec<NodeHandle>;

    /// Whether the node is still reachable from the document root.
    fn is_connected(&self, node: NodeHandle) -> bool;

    /// Topmost element under a viewport point that accepts pointer events.
    fn element_from_point(&self, x: f64, y: f64) -> Option<NodeHandle>;

    /// All connected elements in document order.
    fn elements(&self) -> Vec<NodeHandle>;

    /// Read a global script property (e.g. `window.gsap`).
    fn global(&self, name: &str) -> Result<Option<Value>, DomError>;
}
