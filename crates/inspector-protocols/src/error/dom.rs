//! DOM access errors.

use thiserror::Error;

use crate::dom::NodeHandle;

/// Failure reading a single field from the page.
///
/// The snapshot builder converts these into per-field sentinels; they never
/// abort a whole capture.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("Node {0} is not attached to the document")]
    Detached(NodeHandle),

    #[error("Node {0} is not an element")]
    NotAnElement(NodeHandle),

    #[error("Property {property} unavailable: {message}")]
    PropertyUnavailable { property: String, message: String },

    #[error("Script error: {0}")]
    Script(String),
}

impl DomError {
    /// Shorthand for a failing property getter.
    pub fn unavailable(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PropertyUnavailable {
            property: property.into(),
            message: message.into(),
        }
    }
}
