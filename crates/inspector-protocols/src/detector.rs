//! Third-party animation library probing.

use crate::dom::Document;
use crate::error::DomError;
use crate::types::LibraryInfo;

/// Best-effort probe for an animation library loaded in the page.
///
/// Implementations only report presence and declared version; they never
/// introspect running animations. Errors are swallowed by the caller.
pub trait AnimationLibraryDetector: Send + Sync {
    /// Display name of the library, e.g. `"GSAP"`.
    fn library(&self) -> &str;

    fn detect(&self, document: &dyn Document) -> Result<Option<LibraryInfo>, DomError>;
}
