//! Detected animations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Animation or transition declared in the element's resolved style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CssAnimation {
    #[serde(rename_all = "camelCase")]
    Animation {
        name: String,
        duration: String,
        timing: String,
        delay: String,
        iteration: String,
        direction: String,
        fill_mode: String,
    },
    Transition {
        property: String,
        duration: String,
        timing: String,
        delay: String,
    },
}

/// Presence of a third-party animation library in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryInfo {
    pub detected: bool,
    pub library: String,
    pub version: String,
}

/// Everything the animation probe found for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnimationReport {
    #[serde(default)]
    pub css: Vec<CssAnimation>,
    #[serde(default)]
    pub gsap: Vec<LibraryInfo>,
    #[serde(default)]
    pub other: Vec<Value>,
}

impl AnimationReport {
    pub fn is_empty(&self) -> bool {
        self.css.is_empty() && self.gsap.is_empty() && self.other.is_empty()
    }
}
