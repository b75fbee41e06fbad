use std::fs;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::ui::MenuStyle;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("`shells` must list at least one shell")]
    NoShells,

    #[error("invalid border color {0:?}")]
    InvalidColor(String),
}

/// User configuration from config.yaml
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Runtime binary to drive
    pub runtime: String,
    /// Shells tried in order by the Shell action
    pub shells: Vec<String>,
    /// ANSI index ("36") or color name
    pub border_color: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            shells: vec!["/bin/bash".to_string(), "/bin/sh".to_string()],
            border_color: "36".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// `<config_dir>/dockmenu/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dockmenu").join("config.yaml"))
    }

    /// Load an explicit config file, or the default one if it exists.
    ///
    /// A missing default file yields the defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path, source })?;
        config.style()?;
        if config.shells.is_empty() {
            return Err(ConfigError::NoShells);
        }
        Ok(config)
    }

    /// Rendering style built from this config
    pub fn style(&self) -> Result<MenuStyle, ConfigError> {
        let border = self
            .border_color
            .parse::<Color>()
            .map_err(|_| ConfigError::InvalidColor(self.border_color.clone()))?;
        Ok(MenuStyle { border })
    }

    /// Where logs go: the configured file or `<cache_dir>/dockmenu/dockmenu.log`
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("dockmenu").join("dockmenu.log")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "{}\n").unwrap();

        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "runtime: podman\nshells: [/bin/ash]\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.runtime, "podman");
        assert_eq!(config.shells, ["/bin/ash"]);
        assert_eq!(config.border_color, "36");
    }

    #[test]
    fn test_default_shells_fall_back_to_sh() {
        assert_eq!(Config::default().shells, ["/bin/bash", "/bin/sh"]);
    }

    #[test]
    fn test_empty_shell_list_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "shells: []\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::NoShells)));
    }

    #[test]
    fn test_border_color_tokens() {
        let mut config = Config::default();
        assert_eq!(config.style().unwrap().border, Color::Indexed(36));

        config.border_color = "magenta".into();
        assert_eq!(config.style().unwrap().border, Color::Magenta);

        config.border_color = "not-a-color".into();
        assert!(matches!(config.style(), Err(ConfigError::InvalidColor(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.yaml")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "runtime: [unterminated\n").unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_explicit_log_file_wins() {
        let config = Config {
            log_file: Some(PathBuf::from("/tmp/dockmenu-test.log")),
            ..Config::default()
        };
        assert_eq!(config.log_path(), Some(PathBuf::from("/tmp/dockmenu-test.log")));
    }
}
