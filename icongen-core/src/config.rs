use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_CONFIG_FILE: &str = "icongen.toml";
pub const DEFAULT_SOURCE: &str = "app_icon.svg";
pub const DEFAULT_INKSCAPE_BINARY: &str = "inkscape";

#[derive(Debug, PartialEq, Eq, Clone, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct AppConfig {
    pub inkscape_binary: PathBuf,
    /// SVG file all icons are rendered from, relative to the project directory
    pub source: PathBuf,
    /// upper bound for a single conversion; unbounded if unset
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
    /// exit with an error status if any icon fails to convert
    pub strict: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            inkscape_binary: PathBuf::from(DEFAULT_INKSCAPE_BINARY),
            source: PathBuf::from(DEFAULT_SOURCE),
            timeout: None,
            strict: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("invalid configuration string")]
    InvalidConfigString(String, #[source] eyre::Report),
    #[error("invalid configuration file {}", .0.display())]
    InvalidConfigFile(PathBuf, #[source] eyre::Report),
    #[error("i/o error reading configuration file {}", .0.display())]
    IoError(PathBuf, #[source] std::io::Error),
}

impl AppConfig {
    pub fn parse(s: &str) -> Result<AppConfig, ConfigLoadError> {
        toml::from_str(s).map_err(|e| ConfigLoadError::InvalidConfigString(s.to_owned(), e.into()))
    }

    pub async fn parse_file(p: &Path) -> Result<AppConfig, ConfigLoadError> {
        let config_string = tokio::fs::read_to_string(p)
            .await
            .map_err(|e| ConfigLoadError::IoError(p.to_owned(), e))?;
        toml::from_str(&config_string)
            .map_err(|e| ConfigLoadError::InvalidConfigFile(p.to_owned(), e.into()))
    }

    /// Loads the file if it exists, falling back to the defaults otherwise.
    pub async fn parse_file_or_default(p: &Path) -> Result<AppConfig, ConfigLoadError> {
        match tokio::fs::metadata(p).await {
            Ok(_) => Self::parse_file(p).await,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no configuration file at {}, using defaults", p.display());
                Ok(AppConfig::default())
            }
            Err(e) => Err(ConfigLoadError::IoError(p.to_owned(), e)),
        }
    }
}
