//! Configuration management for mdstyle.
//!
//! Parses `mdstyle.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [render]
//! gfm = true
//!
//! [preview]
//! view = "code"
//! debounce_ms = 100
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdstyle.toml";

/// Upper bound for `preview.debounce_ms`.
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override GFM parsing.
    pub gfm: Option<bool>,
    /// Override the initially active view.
    pub view: Option<ViewMode>,
    /// Override file watcher debounce.
    pub debounce_ms: Option<u64>,
}

/// Which artifact of a render is shown.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Rendered, styled document.
    #[default]
    Preview,
    /// Generated HTML source.
    Code,
}

impl ViewMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preview => "preview",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preview" => Ok(Self::Preview),
            "code" => Ok(Self::Code),
            other => Err(ConfigError::Validation(format!(
                "unknown view '{other}', expected 'preview' or 'code'"
            ))),
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Markdown rendering configuration.
    pub render: RenderConfig,
    /// Preview configuration.
    pub preview: PreviewConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Markdown rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists,
    /// footnotes, definition lists).
    pub gfm: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

/// Preview configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Initially active view.
    pub view: ViewMode,
    /// Debounce for file change events, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            view: ViewMode::Preview,
            debounce_ms: 100,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdstyle.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(gfm) = settings.gfm {
            self.render.gfm = gfm;
        }
        if let Some(view) = settings.view {
            self.preview.view = view;
        }
        if let Some(debounce_ms) = settings.debounce_ms {
            self.preview.debounce_ms = debounce_ms;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(ConfigError::Validation(format!(
                "preview.debounce_ms cannot exceed {MAX_DEBOUNCE_MS}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.render.gfm);
        assert_eq!(config.preview.view, ViewMode::Preview);
        assert_eq!(config.preview.debounce_ms, 100);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.render.gfm);
        assert_eq!(config.preview.view, ViewMode::Preview);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[render]
gfm = false

[preview]
view = "code"
debounce_ms = 250
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.render.gfm);
        assert_eq!(config.preview.view, ViewMode::Code);
        assert_eq!(config.preview.debounce_ms, 250);
    }

    #[test]
    fn test_parse_unknown_view_fails() {
        let result: Result<Config, _> = toml::from_str("[preview]\nview = \"split\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_view_mode_from_str() {
        assert_eq!("code".parse::<ViewMode>().unwrap(), ViewMode::Code);
        assert_eq!(" Preview ".parse::<ViewMode>().unwrap(), ViewMode::Preview);
        assert!("split".parse::<ViewMode>().is_err());
        assert_eq!(ViewMode::Code.to_string(), "code");
    }

    #[test]
    fn test_cli_settings_override() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings {
            gfm: Some(false),
            view: Some(ViewMode::Code),
            debounce_ms: None,
        });
        assert!(!config.render.gfm);
        assert_eq!(config.preview.view, ViewMode::Code);
        assert_eq!(config.preview.debounce_ms, 100);
    }

    #[test]
    fn test_validate_debounce_limit() {
        let mut config = Config::default();
        config.preview.debounce_ms = MAX_DEBOUNCE_MS + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("debounce_ms"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[preview]\nview = \"code\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.preview.view, ViewMode::Code);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/mdstyle.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[preview]\ndebounce_ms = 999999\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_cli_settings_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            debounce_ms: Some(MAX_DEBOUNCE_MS + 1),
            ..CliSettings::default()
        };
        let result = Config::load(Some(&path), Some(&settings));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(CONFIG_FILENAME));
    }
}
