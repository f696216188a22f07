//! # Inspector Core
//!
//! Everything that runs inside the inspector's contexts.
//!
//! ## Components
//!
//! - [`SnapshotBuilder`] - Captures an element's markup, style, layout, tree and animations
//! - [`SelectionMachine`] - Inspect mode and the current selection
//! - [`BackgroundHost`] / [`RelayClient`] - Single-slot relay between contexts
//! - [`Viewer`] - Pulls the stored snapshot and exports it
//! - [`ContentScript`] - Per-page event loop tying the pieces together
//! - [`MemoryPage`] - Arena DOM implementing the page traits
//!
//! ## Flow
//!
//! Toggle arms the machine and installs the click interceptor. The next click
//! is hit-tested through the interceptor, the element is outlined, and after a
//! grace delay the builder captures it. The relay hands the snapshot to the
//! background host, which stores it and asks for a viewer.

pub mod content_script;
pub mod error;
pub mod notices;
pub mod page;
pub mod relay;
pub mod selection;
pub mod snapshot;
pub mod viewer;

pub use content_script::{ContentScript, EventOutcome, KeyEvent, PageEvent};
pub use error::InspectorError;
pub use notices::NoticeFactory;
pub use page::{ElementSpec, MemoryPage, NodeSpec, PageFixture};
pub use relay::{BackgroundHost, ChannelLauncher, RelayClient, ViewerRequest};
pub use selection::{
    CaptureTrigger, ContextMenuOutcome, PendingCapture, SelectionMachine, SelectionSettings,
    SelectionState,
};
pub use snapshot::{CaptureLimits, GsapDetector, SnapshotBuilder};
pub use viewer::{Overview, Viewer, ViewerState};
