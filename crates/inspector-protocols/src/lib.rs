//! # Inspector Protocols
//!
//! Shared definitions for the element inspector. Contains only data types,
//! message shapes and the traits that separate the inspector from the host
//! browser - no implementations.
//!
//! ## Core Traits
//!
//! - [`Document`] - Read-only access to a page's DOM and layout
//! - [`PageSurface`] - Side effects on the page chrome (cursor, banner, interceptor, notices)
//! - [`AnimationLibraryDetector`] - Pluggable probe for third-party animation libraries
//! - [`ViewerLauncher`] - Opens a new viewer surface from the background context

pub mod detector;
pub mod dom;
pub mod error;
pub mod launcher;
pub mod message;
pub mod surface;
pub mod types;

pub use detector::AnimationLibraryDetector;
pub use dom::{Document, NodeHandle};
pub use error::{CaptureError, DomError, RelayError};
pub use launcher::ViewerLauncher;
pub use message::{ElementDataResponse, RelayRequest, RelayResponse};
pub use surface::{Cursor, Notice, NoticeKind, Page, PageSurface};
pub use types::*;
