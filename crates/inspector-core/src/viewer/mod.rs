//! Viewer adapter.
//!
//! The viewer pulls the stored snapshot once when opened and again on
//! refresh. Rendering is left to the host; this module exposes the loaded
//! state, a short overview and JSON export.

mod export;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use inspector_protocols::{ElementSnapshot, RelayError};

use crate::relay::RelayClient;

pub use export::{export_file_name, export_json, ExportError};

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;

/// What the viewer currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerState {
    Loaded(Box<ElementSnapshot>),
    /// Nothing was captured yet. Shown as "No element data available".
    NoData,
}

/// One viewer tab.
pub struct Viewer {
    client: RelayClient,
    state: ViewerState,
}

impl Viewer {
    /// Open a viewer and fetch the stored snapshot.
    pub async fn open(client: RelayClient) -> Result<Self, RelayError> {
        let mut viewer = Self {
            client,
            state: ViewerState::NoData,
        };
        viewer.refresh().await?;
        Ok(viewer)
    }

    /// Fetch again, as on a reload of the viewer tab.
    pub async fn refresh(&mut self) -> Result<&ViewerState, RelayError> {
        self.state = match self.client.fetch().await? {
            Some(snapshot) => {
                debug!("Viewer loaded {}", snapshot.selector_label());
                ViewerState::Loaded(Box::new(snapshot))
            }
            None => {
                debug!("Viewer has no element data");
                ViewerState::NoData
            }
        };
        Ok(&self.state)
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn snapshot(&self) -> Option<&ElementSnapshot> {
        match &self.state {
            ViewerState::Loaded(snapshot) => Some(&**snapshot),
            ViewerState::NoData => None,
        }
    }

    pub fn overview(&self) -> Option<Overview> {
        self.snapshot().map(Overview::from)
    }

    /// Write the loaded snapshot to `dir` and return the file path.
    pub fn export_to(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let snapshot = self.snapshot().ok_or(ExportError::NoData)?;
        let now = Utc::now();
        let json = export_json(snapshot, now)?;

        std::fs::create_dir_all(dir)?;
        let path = dir.join(export_file_name(now));
        std::fs::write(&path, json)?;

        info!("Exported snapshot to {}", path.display());
        Ok(path)
    }
}

/// Header summary of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub label: String,
    pub width: i64,
    pub height: i64,
    pub top: i64,
    pub left: i64,
    pub property_count: usize,
    pub child_count: usize,
    pub sibling_count: usize,
    pub has_parent: bool,
    pub animation_count: usize,
}

impl From<&ElementSnapshot> for Overview {
    fn from(snapshot: &ElementSnapshot) -> Self {
        let d = &snapshot.dimensions;
        let tree = &snapshot.dom_tree;
        let animations = &snapshot.animations;
        Self {
            label: snapshot.selector_label(),
            width: d.width.round() as i64,
            height: d.height.round() as i64,
            top: d.top.round() as i64,
            left: d.left.round() as i64,
            property_count: snapshot.css_properties.len(),
            child_count: tree.current.as_ref().map_or(0, |c| c.children.len()),
            sibling_count: tree.siblings.len(),
            has_parent: tree.parent.is_some(),
            animation_count: animations.css.len() + animations.gsap.len() + animations.other.len(),
        }
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        writeln!(
            f,
            "  {}x{} at ({}, {})",
            self.width, self.height, self.left, self.top
        )?;
        writeln!(f, "  {} CSS properties", self.property_count)?;
        writeln!(
            f,
            "  {} children, {} siblings, parent: {}",
            self.child_count,
            self.sibling_count,
            if self.has_parent { "yes" } else { "no" }
        )?;
        write!(f, "  {} animations", self.animation_count)
    }
}
