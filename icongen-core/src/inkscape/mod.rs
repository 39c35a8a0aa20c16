use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};
use tokio::process::Command;

pub use process::*;

mod process;
mod util;

#[derive(Debug, Default, Copy, Clone)]
pub enum Output {
    #[default]
    Null,
    Capture,
}

impl From<Output> for Stdio {
    fn from(v: Output) -> Self {
        match v {
            Output::Null => Stdio::null(),
            Output::Capture => Stdio::piped(),
        }
    }
}

#[derive(Debug, Default, Copy, Clone)]
pub struct Options {
    pub stdout: Output,
    pub stderr: Output,
}

impl Options {
    pub fn capture_output() -> Options {
        Options {
            stdout: Output::Capture,
            stderr: Output::Capture,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to start inkscape process")]
    FailedToStartInkscapeProcess(#[source] std::io::Error),
    #[error("error reading from subprocess output")]
    SubprocessIoError(#[source] std::io::Error),
    #[error("error getting subprocess status")]
    SubprocessStatusError(#[source] std::io::Error),
    #[error("error killing process")]
    SubprocessTerminateError(#[source] std::io::Error),
    #[error("{}", .0.message())]
    InkscapeError(ExitStatus),
    #[error("inkscape did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Handle to an Inkscape binary used for SVG to PNG exports.
#[derive(Debug, Clone)]
pub struct Inkscape {
    path: PathBuf,
}

impl Inkscape {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Inkscape { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run(
        &self,
        args: &[impl AsRef<OsStr>],
        options: &Options,
    ) -> Result<InkscapeProcess, Error> {
        let mut cmd = Command::new(&self.path);
        cmd.stdin(Stdio::null())
            .stdout(options.stdout)
            .stderr(options.stderr)
            .kill_on_drop(true);
        for arg in args {
            cmd.arg(arg.as_ref());
        }

        tracing::debug!(command = ?cmd.as_std(), "starting inkscape");
        let child = cmd.spawn().map_err(Error::FailedToStartInkscapeProcess)?;
        Ok(InkscapeProcess { child })
    }

    pub fn export_png(&self, svg: &Path, png: &Path, size: u32) -> Result<InkscapeProcess, Error> {
        self.run(&export_png_args(svg, png, size), &Options::capture_output())
    }
}

/// Arguments for a square PNG export of `svg` into `png`.
pub fn export_png_args(svg: &Path, png: &Path, size: u32) -> Vec<OsString> {
    let mut export_filename = OsString::from("--export-filename=");
    export_filename.push(png);
    vec![
        OsString::from("--export-type=png"),
        export_filename,
        OsString::from(format!("--export-width={}", size)),
        OsString::from(format!("--export-height={}", size)),
        svg.as_os_str().to_owned(),
    ]
}
