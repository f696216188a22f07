//! Element snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::animation::AnimationReport;
use super::geometry::Dimensions;
use super::tree::DomTree;

/// Identity and markup of the captured element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementInfo {
    pub tag_name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(rename = "innerHTML", default)]
    pub inner_html: String,
    #[serde(rename = "outerHTML", default)]
    pub outer_html: String,
    #[serde(default)]
    pub text_content: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Names of the string fields that were cut to their budget.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub truncated: Vec<String>,
}

/// Immutable description of one element at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    pub element: ElementInfo,
    pub dimensions: Dimensions,
    pub css_properties: BTreeMap<String, String>,
    pub dom_tree: DomTree,
    pub animations: AnimationReport,
    /// Capture time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Fields that could not be read, with the reason.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, String>,
}

impl ElementSnapshot {
    /// CSS-like label such as `button#save.btn.primary`.
    pub fn selector_label(&self) -> String {
        selector_label(
            &self.element.tag_name,
            &self.element.id,
            &self.element.class_name,
        )
    }
}

/// Build a `tag#id.class` label from raw parts.
pub fn selector_label(tag_name: &str, id: &str, class_name: &str) -> String {
    let mut label = tag_name.to_lowercase();
    if !id.is_empty() {
        label.push('#');
        label.push_str(id);
    }
    for class in class_name.split_whitespace() {
        label.push('.');
        label.push_str(class);
    }
    label
}
