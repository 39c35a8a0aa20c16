use super::Error;
use std::time::Duration;
use tokio::{
    io::{AsyncRead, AsyncReadExt},
    process::{Child, ChildStdout},
};

const TERMINATE_GRACE_PERIOD: Duration = Duration::from_secs(5);

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum ExitStatus {
    Successful,
    Failed(Option<i32>),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        self == &ExitStatus::Successful
    }

    pub fn check_status(&self) -> Result<(), Error> {
        match self {
            ExitStatus::Successful => Ok(()),
            ExitStatus::Failed(_) => Err(Error::InkscapeError(*self)),
        }
    }

    pub fn message(&self) -> String {
        match self {
            ExitStatus::Successful => "inkscape exited successfully".to_owned(),
            ExitStatus::Failed(Some(code)) => {
                format!("inkscape exited with error status {}", code)
            }
            ExitStatus::Failed(None) => "inkscape exited with unknown error status".to_owned(),
        }
    }
}

/// Exit status and captured output of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Describes a failed run: the exit status plus whatever the tool wrote to stderr.
    pub fn error_detail(&self) -> String {
        let stderr = String::from_utf8_lossy(&self.stderr);
        let stderr = stderr.trim();
        if stderr.is_empty() {
            self.status.message()
        } else {
            format!("{}: {}", self.status.message(), stderr)
        }
    }
}

async fn read_pipe(pipe: Option<impl AsyncRead + Unpin>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

#[cfg(unix)]
fn ask_to_terminate(child: &mut Child) -> Result<(), Error> {
    // no PID means the child has already been reaped
    if let Some(pid) = child.id() {
        unsafe { libc::kill(pid as i32, libc::SIGTERM) };
    }
    Ok(())
}

#[cfg(not(unix))]
fn ask_to_terminate(child: &mut Child) -> Result<(), Error> {
    child
        .start_kill()
        .map_err(Error::SubprocessTerminateError)?;
    Ok(())
}

#[derive(Debug)]
pub struct InkscapeProcess {
    pub(crate) child: Child,
}

impl InkscapeProcess {
    pub fn stdout(&mut self) -> &mut Option<ChildStdout> {
        &mut self.child.stdout
    }

    pub async fn wait(&mut self) -> Result<ExitStatus, Error> {
        let proc_status = self
            .child
            .wait()
            .await
            .map_err(Error::SubprocessStatusError)?;
        if proc_status.success() {
            Ok(ExitStatus::Successful)
        } else {
            Ok(ExitStatus::Failed(proc_status.code()))
        }
    }

    pub async fn check_wait(&mut self) -> Result<(), Error> {
        self.wait().await?.check_status()
    }

    /// Drains both output pipes, then waits for the process to exit. Pipes that were not
    /// captured yield empty buffers.
    pub async fn output(&mut self) -> Result<ProcessOutput, Error> {
        let (stdout, stderr) = tokio::join!(
            read_pipe(self.child.stdout.take()),
            read_pipe(self.child.stderr.take())
        );
        let stdout = stdout.map_err(Error::SubprocessIoError)?;
        let stderr = stderr.map_err(Error::SubprocessIoError)?;

        let status = self.wait().await?;
        Ok(ProcessOutput {
            status,
            stdout,
            stderr,
        })
    }

    /// Like [`output`](Self::output), but terminates the process and fails with
    /// [`Error::TimedOut`] if it runs longer than `timeout`.
    pub async fn output_with_timeout(
        &mut self,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput, Error> {
        let timeout = match timeout {
            Some(timeout) => timeout,
            None => return self.output().await,
        };
        match tokio::time::timeout(timeout, self.output()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_secs = timeout.as_secs_f64(),
                    "inkscape did not finish in time"
                );
                self.terminate(TERMINATE_GRACE_PERIOD).await?;
                Err(Error::TimedOut(timeout))
            }
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(pid = self.child.id(), grace_period_secs = grace_period.as_secs_f64()))]
    pub async fn terminate(&mut self, grace_period: Duration) -> Result<(), Error> {
        tracing::debug!("trying to terminate gracefully");
        ask_to_terminate(&mut self.child)?;
        match tokio::time::timeout(grace_period, self.wait()).await {
            Ok(result) => {
                tracing::debug!("process terminated before timeout");
                result?;
            }
            Err(_) => {
                tracing::debug!("process did not terminate before timeout, killing it instead");
                self.child
                    .kill()
                    .await
                    .map_err(Error::SubprocessTerminateError)?;
            }
        };
        Ok(())
    }
}
