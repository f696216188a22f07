//! Configuration loader.

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/Downloads`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.inspect.click_grace_ms, 1000);
        assert_eq!(config.capture.max_siblings, 10);
    }

    #[test]
    fn test_load_inspect_section() {
        let content = r#"
            [inspect]
            click_grace_ms = 0
            context_menu_grace_ms = 250
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.inspect.click_grace_ms, 0);
        assert_eq!(config.inspect.context_menu_grace_ms, 250);
        assert_eq!(config.inspect.outline, "3px solid #ff6b35");
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [capture]
            inner_html_limit = 500
            tree_depth = 4

            [relay]
            response_timeout_ms = 1500

            [notices]
            warning_ms = 8000

            [export]
            directory = "/tmp/exports"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.capture.inner_html_limit, 500);
        assert_eq!(config.capture.outer_html_limit, 1000);
        assert_eq!(config.capture.tree_depth, 4);
        assert_eq!(config.relay.response_timeout_ms, 1500);
        assert_eq!(config.notices.warning_ms, 8000);
        assert_eq!(config.export.directory, "/tmp/exports");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[capture]").unwrap();
        writeln!(file, "max_siblings = 3").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.capture.max_siblings, 3);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/inspector.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/inspector.toml")).unwrap();
        assert_eq!(config.relay.channel_capacity, 32);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("INSPECTOR_TEST_EXPORT_DIR", "/data/out");
        }
        let content = "[export]\ndirectory = \"${INSPECTOR_TEST_EXPORT_DIR}\"";
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.export.directory, "/data/out");
        unsafe {
            std::env::remove_var("INSPECTOR_TEST_EXPORT_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_INSPECTOR_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/Downloads");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/Downloads"));
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/usr/local"), "/usr/local");
    }
}
