//! Configuration validation.

use crate::schema::Config;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Grace delays above this produce a warning.
const LONG_GRACE_MS: u64 = 10_000;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_inspect(config, &mut result);
        Self::validate_capture(config, &mut result);
        Self::validate_relay(config, &mut result);
        Self::validate_export(config, &mut result);

        result
    }

    fn validate_inspect(config: &Config, result: &mut ValidationResult) {
        let inspect = &config.inspect;

        for (path, value) in [
            ("inspect.click_grace_ms", inspect.click_grace_ms),
            ("inspect.context_menu_grace_ms", inspect.context_menu_grace_ms),
        ] {
            if value > LONG_GRACE_MS {
                result.add_warning(ValidationWarning::new(
                    path,
                    "grace delay is longer than 10 seconds, captures will feel unresponsive",
                ));
            }
        }

        if inspect.outline.trim().is_empty() {
            result.add_warning(ValidationWarning::new(
                "inspect.outline",
                "outline is empty, selected elements will not be highlighted",
            ));
        }
    }

    fn validate_capture(config: &Config, result: &mut ValidationResult) {
        let capture = &config.capture;

        for (path, value) in [
            ("capture.inner_html_limit", capture.inner_html_limit),
            ("capture.outer_html_limit", capture.outer_html_limit),
            ("capture.text_limit", capture.text_limit),
            ("capture.tree_text_limit", capture.tree_text_limit),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(path, "budget must be greater than 0"));
            }
        }

        for (path, value) in [
            ("capture.tree_depth", capture.tree_depth),
            ("capture.parent_depth", capture.parent_depth),
            ("capture.sibling_depth", capture.sibling_depth),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(
                    path,
                    "depth must be at least 1 or the tree is always empty",
                ));
            }
        }

        if capture.tree_depth > 8 {
            result.add_warning(ValidationWarning::new(
                "capture.tree_depth",
                "deep trees make snapshots large",
            ));
        }

        if capture.max_siblings == 0 {
            result.add_warning(ValidationWarning::new(
                "capture.max_siblings",
                "siblings will never be captured",
            ));
        }
    }

    fn validate_relay(config: &Config, result: &mut ValidationResult) {
        if config.relay.response_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "relay.response_timeout_ms",
                "response_timeout_ms must be greater than 0",
            ));
        }

        if config.relay.channel_capacity == 0 {
            result.add_error(ValidationError::new(
                "relay.channel_capacity",
                "channel_capacity must be greater than 0",
            ));
        }
    }

    fn validate_export(config: &Config, result: &mut ValidationResult) {
        if config.export.directory.trim().is_empty() {
            result.add_error(ValidationError::new(
                "export.directory",
                "Export directory cannot be empty",
            ));
        }
    }
}
