//! Animation detection.
//!
//! Reads declared animations straight from the resolved style and asks each
//! registered [`AnimationLibraryDetector`] whether its library is present.
//! Nothing here inspects running animation instances.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use inspector_protocols::{
    AnimationLibraryDetector, AnimationReport, CssAnimation, Document, DomError, LibraryInfo,
};

/// Detects GSAP through its `window.gsap` global.
#[derive(Debug, Clone, Copy, Default)]
pub struct GsapDetector;

impl AnimationLibraryDetector for GsapDetector {
    fn library(&self) -> &str {
        "GSAP"
    }

    fn detect(&self, document: &dyn Document) -> Result<Option<LibraryInfo>, DomError> {
        let gsap = match document.global("gsap")? {
            None | Some(Value::Null) | Some(Value::Bool(false)) => return Ok(None),
            Some(value) => value,
        };

        let version = gsap
            .get("version")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .unwrap_or("Unknown")
            .to_string();

        Ok(Some(LibraryInfo {
            detected: true,
            library: self.library().to_string(),
            version,
        }))
    }
}

/// Build the animation report for one element.
///
/// `style` is `None` when the computed style could not be read; library
/// probing still runs in that case.
pub(crate) fn detect_animations(
    document: &dyn Document,
    style: Option<&BTreeMap<String, String>>,
    detectors: &[Arc<dyn AnimationLibraryDetector>],
) -> AnimationReport {
    let mut report = AnimationReport {
        css: style.map(css_animations).unwrap_or_default(),
        ..Default::default()
    };

    for detector in detectors {
        match detector.detect(document) {
            Ok(Some(info)) if detector.library().eq_ignore_ascii_case("gsap") => {
                report.gsap.push(info);
            }
            Ok(Some(info)) => match serde_json::to_value(&info) {
                Ok(value) => report.other.push(value),
                Err(e) => debug!("Dropping {} detection: {}", detector.library(), e),
            },
            Ok(None) => {}
            Err(e) => debug!("{} detection failed: {}", detector.library(), e),
        }
    }

    report
}

fn css_animations(style: &BTreeMap<String, String>) -> Vec<CssAnimation> {
    let get = |name: &str| style.get(name).cloned().unwrap_or_default();
    let mut found = Vec::new();

    let animation_name = get("animation-name");
    if !animation_name.is_empty() && animation_name != "none" {
        found.push(CssAnimation::Animation {
            name: animation_name,
            duration: get("animation-duration"),
            timing: get("animation-timing-function"),
            delay: get("animation-delay"),
            iteration: get("animation-iteration-count"),
            direction: get("animation-direction"),
            fill_mode: get("animation-fill-mode"),
        });
    }

    let transition_property = get("transition-property");
    if !transition_property.is_empty() && transition_property != "none" {
        found.push(CssAnimation::Transition {
            property: transition_property,
            duration: get("transition-duration"),
            timing: get("transition-timing-function"),
            delay: get("transition-delay"),
        });
    }

    found
}
