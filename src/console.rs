use icongen_core::{
    generator::{Conversion, PreconditionError, Progress, Summary},
    icons::{IconSet, Platform},
};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Human-readable progress output for a run.
pub struct Console<W> {
    out: W,
}

impl Console<StandardStream> {
    pub fn stdout() -> Self {
        Console::new(StandardStream::stdout(ColorChoice::Auto))
    }
}

impl<W: WriteColor> Console<W> {
    pub fn new(out: W) -> Self {
        Console { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_color(&mut self, text: &str, fg_color: Color) -> io::Result<()> {
        self.out
            .set_color(ColorSpec::new().set_fg(Some(fg_color)).set_bold(true))?;
        let result = self.out.write_all(text.as_bytes());
        self.out.reset().ok();
        result
    }

    pub fn header(&mut self, icons: &IconSet, inkscape_version: Option<&str>) -> io::Result<()> {
        write!(self.out, "Generating {} app icons", icons.len())?;
        if let Some(version) = inkscape_version {
            write!(self.out, " with {}", version)?;
        }
        writeln!(self.out, "...")
    }

    pub fn conversion(&mut self, conversion: &Conversion) -> io::Result<()> {
        let spec = conversion.spec;
        match &conversion.result {
            Ok(()) => {
                self.write_color("[ok]", Color::Green)?;
                writeln!(self.out, " {} ({}x{})", spec.path, spec.size, spec.size)
            }
            Err(err) => {
                self.write_color("[failed]", Color::Red)?;
                writeln!(self.out, " {}: {}", spec.path, err)
            }
        }
    }

    pub fn summary(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Done! Generated {}/{} icons",
            summary.succeeded, summary.total
        )?;
        writeln!(self.out)?;
        if summary.all_succeeded() {
            self.write_color("Next steps:", Color::Green)?;
            writeln!(self.out)?;
            writeln!(self.out, "  1. Run 'flutter clean' to clear cached build output")?;
            writeln!(self.out, "  2. Run 'flutter run' to rebuild the app")?;
            writeln!(self.out, "  3. Check the new app icon")
        } else {
            self.write_color("Warning:", Color::Yellow)?;
            writeln!(
                self.out,
                " {} icon(s) failed to generate, check the errors above",
                summary.failed()
            )
        }
    }

    pub fn precondition_failed(&mut self, err: &PreconditionError) -> io::Result<()> {
        self.write_color("Error:", Color::Red)?;
        match err {
            PreconditionError::SourceMissing(path) => {
                writeln!(self.out, " can't find {}", path.display())?;
                writeln!(
                    self.out,
                    "  Make sure to run icongen from the project root directory"
                )
            }
            PreconditionError::ToolMissing(path, _) => {
                writeln!(
                    self.out,
                    " Inkscape is required to convert SVG to PNG, but '{}' could not be run",
                    path.display()
                )?;
                writeln!(self.out, "  macOS: brew install inkscape")?;
                writeln!(self.out, "  Ubuntu: sudo apt install inkscape")?;
                writeln!(self.out, "  Windows: download from https://inkscape.org/")
            }
        }
    }

    pub fn icon_table(&mut self, icons: &IconSet) -> io::Result<()> {
        for platform in [Platform::Android, Platform::Ios] {
            self.write_color(platform.label(), Color::Cyan)?;
            writeln!(self.out)?;
            for spec in icons.for_platform(platform) {
                writeln!(self.out, "  {:>4}  {}", spec.size, spec.path)?;
            }
        }
        Ok(())
    }
}

impl<W: WriteColor> Progress for Console<W> {
    fn started(&mut self, icons: &IconSet, inkscape_version: Option<&str>) {
        if let Err(err) = self.header(icons, inkscape_version) {
            tracing::warn!("failed to write progress: {}", err);
        }
    }

    fn converted(&mut self, conversion: &Conversion) {
        if let Err(err) = self.conversion(conversion) {
            tracing::warn!("failed to write progress: {}", err);
        }
    }
}
