use std::{path::PathBuf, time::Duration};

#[cfg(test)]
use std::ffi::OsString;

/// Renders the app icon SVG into every PNG size the Android and iOS app projects need.
#[derive(clap::Parser, Debug)]
#[command(name = "icongen", version)]
pub struct Cli {
    /// Sets a custom configuration file path [default: <DIRECTORY>/icongen.toml]
    #[arg(short, long, env = "ICONGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sets the SVG file to render [default: app_icon.svg]
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Sets the Inkscape binary to use [default: inkscape]
    #[arg(long, env = "ICONGEN_INKSCAPE")]
    pub inkscape: Option<PathBuf>,

    /// Runs as if started in this directory
    #[arg(short = 'C', long, default_value = ".")]
    pub directory: PathBuf,

    /// Aborts a single conversion after this long, e.g. "30s"
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Exits with an error status if any icon fails to convert
    #[arg(long)]
    pub strict: bool,

    /// Increases log output, can be repeated
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Prints the icons that would be generated and exits
    #[arg(long)]
    pub list: bool,
}

/// Parses `args` with every `env` fallback removed.
#[cfg(test)]
pub(crate) fn parse_without_env<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    use clap::{CommandFactory, FromArgMatches};

    let matches = Cli::command()
        .mut_arg("config", |arg| arg.env(None::<&'static str>))
        .mut_arg("inkscape", |arg| arg.env(None::<&'static str>))
        .try_get_matches_from(args)?;
    Cli::from_arg_matches(&matches)
}
