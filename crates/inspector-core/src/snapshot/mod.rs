//! DOM snapshot builder.
//!
//! [`SnapshotBuilder::capture`] turns a live element into an
//! [`ElementSnapshot`]. The builder only reads from the [`Document`]; a field
//! whose getter fails is replaced by a sentinel and recorded in
//! `field_errors`, so one hostile property never costs the whole snapshot.

mod animation;
mod tree;
pub(crate) mod truncate;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use inspector_config::CaptureConfig;
use inspector_protocols::{
    AnimationLibraryDetector, CaptureError, Dimensions, Document, DomError, DomTree, ElementInfo,
    ElementSnapshot, NodeHandle,
};

pub use animation::GsapDetector;

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

/// Placeholder stored in `cssProperties` when the computed style is unreadable.
pub const CSS_ERROR_KEY: &str = "error";
pub const CSS_ERROR_VALUE: &str = "Could not retrieve CSS properties";

/// Size budgets applied while capturing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureLimits {
    pub inner_html: usize,
    pub outer_html: usize,
    pub text: usize,
    pub tree_text: usize,
    pub tree_depth: usize,
    pub parent_depth: usize,
    pub sibling_depth: usize,
    pub max_siblings: usize,
}

impl Default for CaptureLimits {
    fn default() -> Self {
        Self::from(&CaptureConfig::default())
    }
}

impl From<&CaptureConfig> for CaptureLimits {
    fn from(config: &CaptureConfig) -> Self {
        Self {
            inner_html: config.inner_html_limit,
            outer_html: config.outer_html_limit,
            text: config.text_limit,
            tree_text: config.tree_text_limit,
            tree_depth: config.tree_depth,
            parent_depth: config.parent_depth,
            sibling_depth: config.sibling_depth,
            max_siblings: config.max_siblings,
        }
    }
}

/// Captures element snapshots.
#[derive(Clone)]
pub struct SnapshotBuilder {
    limits: CaptureLimits,
    detectors: Vec<Arc<dyn AnimationLibraryDetector>>,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self::new(CaptureLimits::default())
    }
}

impl SnapshotBuilder {
    /// Builder with the built-in GSAP detector registered.
    pub fn new(limits: CaptureLimits) -> Self {
        Self {
            limits,
            detectors: vec![Arc::new(GsapDetector)],
        }
    }

    /// Builder with no animation library detectors.
    pub fn without_detectors(limits: CaptureLimits) -> Self {
        Self {
            limits,
            detectors: Vec::new(),
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn AnimationLibraryDetector>) -> Self {
        self.detectors.push(detector);
        self
    }

    pub fn limits(&self) -> &CaptureLimits {
        &self.limits
    }

    /// Capture `element` as it is right now.
    pub fn capture(
        &self,
        document: &dyn Document,
        element: NodeHandle,
    ) -> Result<ElementSnapshot, CaptureError> {
        let tag_name = document
            .tag_name(element)
            .ok_or_else(|| CaptureError::InvalidTarget(format!("node {} has no tag", element)))?;

        if !document.is_connected(element) {
            return Err(CaptureError::StaleReference);
        }

        let mut errors = FieldErrors::default();
        let limits = &self.limits;
        let mut truncated = Vec::new();

        let mut budgeted = |field: &str, value: Result<String, DomError>, limit: usize| {
            let (kept, cut) = truncate::truncate(&errors.take(field, value), limit);
            if cut {
                truncated.push(field.to_string());
            }
            kept
        };

        let inner_html = budgeted("innerHTML", document.inner_html(element), limits.inner_html);
        let outer_html = budgeted("outerHTML", document.outer_html(element), limits.outer_html);
        let text_content = budgeted("textContent", document.text_content(element), limits.text);

        let info = ElementInfo {
            tag_name,
            id: errors.take("id", document.id(element)),
            class_name: errors.take("className", document.class_name(element)),
            inner_html,
            outer_html,
            text_content,
            attributes: errors
                .take("attributes", document.attributes(element))
                .into_iter()
                .collect(),
            truncated,
        };

        let dimensions = Dimensions::from(
            errors.take("dimensions", document.bounding_client_rect(element)),
        );

        let style: Option<BTreeMap<String, String>> = match document.computed_style(element) {
            Ok(properties) => Some(properties.into_iter().collect()),
            Err(e) => {
                warn!("Computed style unavailable for {}: {}", element, e);
                errors.record("cssProperties", &e);
                None
            }
        };
        let css_properties = style.clone().unwrap_or_else(|| {
            BTreeMap::from([(CSS_ERROR_KEY.to_string(), CSS_ERROR_VALUE.to_string())])
        });

        let dom_tree = self.dom_tree(document, element);
        let animations = animation::detect_animations(document, style.as_ref(), &self.detectors);

        let snapshot = ElementSnapshot {
            element: info,
            dimensions,
            css_properties,
            dom_tree,
            animations,
            timestamp: chrono::Utc::now().timestamp_millis(),
            field_errors: errors.into_inner(),
        };

        debug!(
            "Captured {} ({} properties, {} field errors)",
            snapshot.selector_label(),
            snapshot.css_properties.len(),
            snapshot.field_errors.len()
        );

        Ok(snapshot)
    }

    fn dom_tree(&self, document: &dyn Document, element: NodeHandle) -> DomTree {
        let limits = &self.limits;
        let parent = document.parent_element(element);

        let siblings = parent
            .map(|p| {
                document
                    .children(p)
                    .into_iter()
                    .filter(|sibling| *sibling != element)
                    .filter_map(|sibling| {
                        tree::build_tree(document, sibling, limits.sibling_depth, limits.tree_text)
                    })
                    .take(limits.max_siblings)
                    .collect()
            })
            .unwrap_or_default();

        DomTree {
            current: tree::build_tree(document, element, limits.tree_depth, limits.tree_text),
            parent: parent
                .and_then(|p| tree::build_tree(document, p, limits.parent_depth, limits.tree_text)),
            siblings,
        }
    }
}

/// Per-field failures collected during one capture.
#[derive(Debug, Default)]
struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Unwrap `value`, recording the failure and substituting the default.
    fn take<T: Default>(&mut self, field: &str, value: Result<T, DomError>) -> T {
        value.unwrap_or_else(|e| {
            self.record(field, &e);
            T::default()
        })
    }

    fn record(&mut self, field: &str, error: &DomError) {
        self.0.insert(field.to_string(), error.to_string());
    }

    fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}
