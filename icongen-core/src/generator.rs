use crate::{
    icons::{IconSet, IconSpec},
    inkscape::{self, Inkscape},
};
use std::{
    path::{Component, Path, PathBuf},
    time::Duration,
};

/// Conditions that stop a run before the first conversion.
#[derive(Debug, thiserror::Error)]
pub enum PreconditionError {
    #[error("source file {} not found", .0.display())]
    SourceMissing(PathBuf),
    #[error("inkscape at '{}' is not usable", .0.display())]
    ToolMissing(PathBuf, #[source] inkscape::Error),
}

/// Failure of a single icon; the run carries on with the next one.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("failed to create directory {}", .0.display())]
    CreateDirectory(PathBuf, #[source] std::io::Error),
    #[error(transparent)]
    Inkscape(#[from] inkscape::Error),
    #[error("{0}")]
    ConversionFailed(String),
}

#[derive(Debug)]
pub struct Conversion {
    pub spec: &'static IconSpec,
    pub output: PathBuf,
    pub result: Result<(), ConversionError>,
}

impl Conversion {
    pub fn success(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct Summary {
    pub total: usize,
    pub succeeded: usize,
}

impl Summary {
    pub fn failed(&self) -> usize {
        self.total - self.succeeded
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.total
    }

    fn record(&mut self, conversion: &Conversion) {
        self.total += 1;
        if conversion.success() {
            self.succeeded += 1;
        }
    }
}

/// Receives progress notifications while icons are generated.
pub trait Progress {
    fn started(&mut self, _icons: &IconSet, _inkscape_version: Option<&str>) {}

    fn converted(&mut self, _conversion: &Conversion) {}
}

impl Progress for () {}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn started(&mut self, icons: &IconSet, inkscape_version: Option<&str>) {
        (**self).started(icons, inkscape_version)
    }

    fn converted(&mut self, conversion: &Conversion) {
        (**self).converted(conversion)
    }
}

// a directory of "." or "" leaves `path` as given
fn in_dir(dir: &Path, path: &Path) -> PathBuf {
    if dir.components().all(|c| c == Component::CurDir) {
        path.to_owned()
    } else {
        dir.join(path)
    }
}

#[derive(Debug)]
pub struct Generator<'a> {
    inkscape: &'a Inkscape,
    icons: IconSet,
    project_dir: PathBuf,
    source: PathBuf,
    timeout: Option<Duration>,
}

impl<'a> Generator<'a> {
    pub fn new(
        inkscape: &'a Inkscape,
        icons: IconSet,
        project_dir: impl Into<PathBuf>,
        source: impl AsRef<Path>,
    ) -> Self {
        let project_dir = project_dir.into();
        let source = in_dir(&project_dir, source.as_ref());
        Generator {
            inkscape,
            icons,
            project_dir,
            source,
            timeout: None,
        }
    }

    pub fn with_timeout(self, timeout: Option<Duration>) -> Self {
        Self { timeout, ..self }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Where `spec` ends up inside the project directory.
    pub fn output_path(&self, spec: &IconSpec) -> PathBuf {
        in_dir(&self.project_dir, spec.path())
    }

    pub async fn check_source(&self) -> Result<(), PreconditionError> {
        match tokio::fs::metadata(&self.source).await {
            Ok(metadata) if metadata.is_file() => Ok(()),
            _ => Err(PreconditionError::SourceMissing(self.source.clone())),
        }
    }

    pub async fn check_inkscape(&self) -> Result<Option<String>, PreconditionError> {
        self.inkscape
            .version_string()
            .await
            .map_err(|e| PreconditionError::ToolMissing(self.inkscape.path().to_owned(), e))
    }

    /// Checks the source file and Inkscape, then converts every icon in order.
    #[tracing::instrument(level = "debug", skip_all, fields(source = %self.source.display()))]
    pub async fn run(&self, mut progress: impl Progress) -> Result<Summary, PreconditionError> {
        self.check_source().await?;
        let version = self.check_inkscape().await?;
        tracing::info!(
            "using {}",
            version.as_deref().unwrap_or("inkscape of unknown version")
        );

        progress.started(&self.icons, version.as_deref());
        Ok(self.generate(progress).await)
    }

    /// Converts every icon without checking preconditions. Failed icons are reported through
    /// `progress` and counted, they never stop the run.
    pub async fn generate(&self, mut progress: impl Progress) -> Summary {
        let mut summary = Summary::default();
        for spec in self.icons.iter() {
            let output = self.output_path(spec);
            let result = self.convert(spec, &output).await;
            if let Err(err) = &result {
                tracing::warn!("failed to generate {}: {}", spec.path, err);
            }

            let conversion = Conversion {
                spec,
                output,
                result,
            };
            summary.record(&conversion);
            progress.converted(&conversion);
        }
        tracing::info!("generated {}/{} icons", summary.succeeded, summary.total);
        summary
    }

    #[tracing::instrument(level = "debug", skip_all, fields(path = spec.path, size = spec.size))]
    async fn convert(&self, spec: &IconSpec, output: &Path) -> Result<(), ConversionError> {
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ConversionError::CreateDirectory(parent.to_owned(), e))?;
        }

        let process_output = self
            .inkscape
            .export_png(&self.source, output, spec.size)?
            .output_with_timeout(self.timeout)
            .await?;
        if process_output.status.success() {
            Ok(())
        } else {
            Err(ConversionError::ConversionFailed(
                process_output.error_detail(),
            ))
        }
    }
}
