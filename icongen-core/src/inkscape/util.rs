use super::{Error, Inkscape, Options, Output};
use tokio::io::{AsyncBufReadExt, BufReader};

impl Inkscape {
    /// Runs `inkscape --version`. Fails if the binary can't be started or exits with an error;
    /// the version line itself is optional since some builds print nothing useful.
    pub async fn version_string(&self) -> Result<Option<String>, Error> {
        let mut process = self.run(
            &["--version"],
            &Options {
                stdout: Output::Capture,
                ..Default::default()
            },
        )?;
        let mut version = None;
        if let Some(stdout) = process.stdout().take() {
            let mut lines = BufReader::new(stdout).lines();
            while let Some(line) = lines
                .next_line()
                .await
                .map_err(Error::SubprocessIoError)?
            {
                if version.is_none() {
                    version = version_line(&line).map(|v| v.to_string());
                }
            }
        }
        process.check_wait().await?;
        Ok(version)
    }
}

fn version_line(line: &str) -> Option<&str> {
    Some(line.trim()).filter(|s| !s.is_empty())
}
