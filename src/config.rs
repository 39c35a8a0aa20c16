use crate::cli::Cli;
use icongen_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use std::{path::PathBuf, time::Duration};

/// Effective settings for a run, after applying command-line flags on top of the configuration
/// file.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Settings {
    pub directory: PathBuf,
    pub source: PathBuf,
    pub inkscape_binary: PathBuf,
    pub timeout: Option<Duration>,
    pub strict: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: AppConfig) -> Self {
        Settings {
            directory: cli.directory.clone(),
            source: cli.source.clone().unwrap_or(config.source),
            inkscape_binary: cli.inkscape.clone().unwrap_or(config.inkscape_binary),
            timeout: cli.timeout.or(config.timeout),
            strict: cli.strict || config.strict,
        }
    }
}

/// Loads the configuration named on the command line, or the default file in the project
/// directory if there is one.
pub async fn load(cli: &Cli) -> eyre::Result<AppConfig> {
    let config = match &cli.config {
        Some(path) => AppConfig::parse_file(path).await?,
        None => AppConfig::parse_file_or_default(&cli.directory.join(DEFAULT_CONFIG_FILE)).await?,
    };
    Ok(config)
}
