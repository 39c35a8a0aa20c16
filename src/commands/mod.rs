use crate::{cli::Cli, config, config::Settings, console::Console};
use icongen_core::{generator::Generator, icons::IconSet, inkscape::Inkscape};
use std::process::ExitCode;
use termcolor::WriteColor;

/// How a run ended, as far as the exit status is concerned.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Status {
    /// All preconditions were met. Individual icons may still have failed.
    Completed,
    /// The source file or Inkscape was missing; nothing was converted.
    PreconditionFailed,
    /// Some icons failed and strict mode was requested.
    ConversionsFailed,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Completed => ExitCode::SUCCESS,
            Status::PreconditionFailed => ExitCode::from(1),
            Status::ConversionsFailed => ExitCode::from(2),
        }
    }
}

pub async fn run(cli: Cli) -> eyre::Result<Status> {
    let mut console = Console::stdout();
    if cli.list {
        console.icon_table(&IconSet::app_icons())?;
        return Ok(Status::Completed);
    }

    let config = config::load(&cli).await?;
    let settings = Settings::resolve(&cli, config);
    tracing::debug!(?settings, "resolved settings");
    generate(&settings, IconSet::app_icons(), &mut console).await
}

pub async fn generate(
    settings: &Settings,
    icons: IconSet,
    console: &mut Console<impl WriteColor>,
) -> eyre::Result<Status> {
    let inkscape = Inkscape::new(&settings.inkscape_binary);
    let generator = Generator::new(&inkscape, icons, &settings.directory, &settings.source)
        .with_timeout(settings.timeout);

    match generator.run(&mut *console).await {
        Ok(summary) => {
            console.summary(&summary)?;
            if settings.strict && !summary.all_succeeded() {
                Ok(Status::ConversionsFailed)
            } else {
                Ok(Status::Completed)
            }
        }
        Err(err) => {
            tracing::debug!("precondition failed: {:?}", err);
            console.precondition_failed(&err)?;
            Ok(Status::PreconditionFailed)
        }
    }
}
