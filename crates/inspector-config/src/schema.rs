//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inspect: InspectConfig,

    #[serde(default)]
    pub capture: CaptureConfig,

    #[serde(default)]
    pub relay: RelayConfig,

    #[serde(default)]
    pub notices: NoticeConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Selection behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    /// Delay between a primary-click selection and the capture.
    #[serde(default = "default_click_grace_ms")]
    pub click_grace_ms: u64,

    /// Delay between a right-click selection and the capture.
    #[serde(default = "default_context_menu_grace_ms")]
    pub context_menu_grace_ms: u64,

    /// Inline outline applied to the selected element.
    #[serde(default = "default_outline")]
    pub outline: String,

    #[serde(default = "default_banner")]
    pub banner: String,
}

impl InspectConfig {
    pub fn click_grace(&self) -> Duration {
        Duration::from_millis(self.click_grace_ms)
    }

    pub fn context_menu_grace(&self) -> Duration {
        Duration::from_millis(self.context_menu_grace_ms)
    }
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            click_grace_ms: default_click_grace_ms(),
            context_menu_grace_ms: default_context_menu_grace_ms(),
            outline: default_outline(),
            banner: default_banner(),
        }
    }
}

fn default_click_grace_ms() -> u64 {
    1000
}

fn default_context_menu_grace_ms() -> u64 {
    500
}

fn default_outline() -> String {
    "3px solid #ff6b35".to_string()
}

fn default_banner() -> String {
    "Inspect Mode Active - Click any element to inspect it".to_string()
}

/// Snapshot size budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    #[serde(default = "default_html_limit")]
    pub inner_html_limit: usize,

    #[serde(default = "default_html_limit")]
    pub outer_html_limit: usize,

    #[serde(default = "default_text_limit")]
    pub text_limit: usize,

    #[serde(default = "default_tree_text_limit")]
    pub tree_text_limit: usize,

    #[serde(default = "default_tree_depth")]
    pub tree_depth: usize,

    #[serde(default = "default_parent_depth")]
    pub parent_depth: usize,

    #[serde(default = "default_sibling_depth")]
    pub sibling_depth: usize,

    #[serde(default = "default_max_siblings")]
    pub max_siblings: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            inner_html_limit: default_html_limit(),
            outer_html_limit: default_html_limit(),
            text_limit: default_text_limit(),
            tree_text_limit: default_tree_text_limit(),
            tree_depth: default_tree_depth(),
            parent_depth: default_parent_depth(),
            sibling_depth: default_sibling_depth(),
            max_siblings: default_max_siblings(),
        }
    }
}

fn default_html_limit() -> usize {
    1000
}

fn default_text_limit() -> usize {
    200
}

fn default_tree_text_limit() -> usize {
    100
}

fn default_tree_depth() -> usize {
    3
}

fn default_parent_depth() -> usize {
    2
}

fn default_sibling_depth() -> usize {
    1
}

fn default_max_siblings() -> usize {
    10
}

/// Page-to-background relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_response_timeout_ms")]
    pub response_timeout_ms: u64,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl RelayConfig {
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            response_timeout_ms: default_response_timeout_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_response_timeout_ms() -> u64 {
    5000
}

fn default_channel_capacity() -> usize {
    32
}

/// Auto-dismiss durations for on-page notices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_success_ms")]
    pub success_ms: u64,

    #[serde(default = "default_error_ms")]
    pub error_ms: u64,

    #[serde(default = "default_warning_ms")]
    pub warning_ms: u64,
}

impl NoticeConfig {
    pub fn success(&self) -> Duration {
        Duration::from_millis(self.success_ms)
    }

    pub fn error(&self) -> Duration {
        Duration::from_millis(self.error_ms)
    }

    pub fn warning(&self) -> Duration {
        Duration::from_millis(self.warning_ms)
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            success_ms: default_success_ms(),
            error_ms: default_error_ms(),
            warning_ms: default_warning_ms(),
        }
    }
}

fn default_success_ms() -> u64 {
    2000
}

fn default_error_ms() -> u64 {
    3000
}

fn default_warning_ms() -> u64 {
    5000
}

/// Viewer export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_directory")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

fn default_export_directory() -> String {
    "~/Downloads".to_string()
}
