use crate::core::catalog::Catalog;
use crate::core::session::DEFAULT_WELCOME;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AssistError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ASSISTANT_NAME: &str = "Recycling Assistant";
pub const DEFAULT_THINKING_DELAY_MS: u64 = 1500;
pub const MAX_THINKING_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub assistant: AssistantSection,
    pub catalog: Option<CatalogSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSection {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_welcome")]
    pub welcome_message: String,
    #[serde(default = "default_delay")]
    pub thinking_delay_ms: u64,
}

impl Default for AssistantSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            welcome_message: default_welcome(),
            thinking_delay_ms: default_delay(),
        }
    }
}

fn default_name() -> String {
    DEFAULT_ASSISTANT_NAME.to_string()
}

fn default_welcome() -> String {
    DEFAULT_WELCOME.to_string()
}

fn default_delay() -> u64 {
    DEFAULT_THINKING_DELAY_MS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default)]
    pub json: bool,
}

impl AssistantConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content, &path.display().to_string())?;

        // Relative catalog paths are resolved against the config file's directory.
        if let (Some(catalog), Some(dir)) = (config.catalog.as_mut(), path.parent()) {
            if Path::new(&catalog.path).is_relative() && !dir.as_os_str().is_empty() {
                catalog.path = dir.join(&catalog.path).display().to_string();
            }
        }

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, source_name: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| AssistError::TomlParseError {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AssistError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().map(|l| l.json).unwrap_or(false)
    }

    pub fn set_catalog_path(&mut self, path: impl Into<String>) {
        self.catalog = Some(CatalogSection { path: path.into() });
    }

    /// Loads the configured catalog file, or the built-in data when none is set.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match self.catalog_path() {
            Some(path) => {
                tracing::info!("Loading catalog from {}", path);
                Catalog::from_file(path)
            }
            None => {
                tracing::info!("Using built-in catalog");
                Ok(Catalog::builtin())
            }
        }
    }
}

impl ConfigProvider for AssistantConfig {
    fn assistant_name(&self) -> &str {
        &self.assistant.name
    }

    fn welcome_message(&self) -> &str {
        &self.assistant.welcome_message
    }

    fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.assistant.thinking_delay_ms)
    }

    fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_ref().map(|c| c.path.as_str())
    }
}

impl Validate for AssistantConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("assistant.name", &self.assistant.name)?;
        validate_non_empty_string("assistant.welcome_message", &self.assistant.welcome_message)?;
        validate_range(
            "assistant.thinking_delay_ms",
            self.assistant.thinking_delay_ms,
            0,
            MAX_THINKING_DELAY_MS,
        )?;
        if let Some(catalog) = &self.catalog {
            validate_path("catalog.path", &catalog.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AssistantConfig::from_toml_str("").unwrap();

        assert_eq!(config.assistant_name(), DEFAULT_ASSISTANT_NAME);
        assert_eq!(config.welcome_message(), DEFAULT_WELCOME);
        assert_eq!(config.thinking_delay(), Duration::from_millis(1500));
        assert!(config.catalog_path().is_none());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[assistant]
name = "EcoBot"
welcome_message = "Welcome back!"
thinking_delay_ms = 0

[catalog]
path = "/etc/recycle/catalog.toml"

[logging]
json = true
"#;

        let config = AssistantConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.assistant_name(), "EcoBot");
        assert_eq!(config.welcome_message(), "Welcome back!");
        assert!(config.thinking_delay().is_zero());
        assert_eq!(config.catalog_path(), Some("/etc/recycle/catalog.toml"));
        assert!(config.json_logs());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RECYCLE_ASSIST_TEST_NAME", "Env Assistant");

        let toml_content = r#"
[assistant]
name = "${RECYCLE_ASSIST_TEST_NAME}"
welcome_message = "${RECYCLE_ASSIST_TEST_UNSET_VAR}"
"#;

        let config = AssistantConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.assistant.name, "Env Assistant");
        assert_eq!(
            config.assistant.welcome_message,
            "${RECYCLE_ASSIST_TEST_UNSET_VAR}"
        );

        std::env::remove_var("RECYCLE_ASSIST_TEST_NAME");
    }

    #[test]
    fn test_config_validation() {
        let config = AssistantConfig::from_toml_str(
            r#"
[assistant]
thinking_delay_ms = 60000
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AssistantConfig::from_toml_str(
            r#"
[assistant]
name = "   "
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AssistantConfig::from_toml_str("[assistant\nname = ").unwrap_err();
        assert!(matches!(err, AssistError::TomlParseError { .. }));
    }

    #[test]
    fn test_config_from_file_resolves_relative_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("assist.toml");
        std::fs::write(&config_path, "[catalog]\npath = \"catalog.toml\"\n").unwrap();

        let config = AssistantConfig::from_file(&config_path).unwrap();
        assert_eq!(
            config.catalog_path(),
            Some(dir.path().join("catalog.toml").display().to_string().as_str())
        );
    }

    #[test]
    fn test_load_catalog_from_configured_file() {
        let mut catalog_file = NamedTempFile::new().unwrap();
        catalog_file
            .write_all(Catalog::builtin().to_toml_string().unwrap().as_bytes())
            .unwrap();

        let mut config = AssistantConfig::default();
        config.set_catalog_path(catalog_file.path().display().to_string());

        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 5);
    }
}
