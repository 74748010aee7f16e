//! External commands
//!
//! The command runs through `sh -c` and only its first line is read. The
//! pipe is closed once that line arrives, so a command that keeps writing
//! gets `SIGPIPE` instead of stalling the tick. A command that prints
//! nothing and never exits still holds up the tick and any pending
//! shutdown.

use sbar_core::traits::{Arity, Metric, required_arg};
use sbar_core::{Error, Result};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::debug;

/// Longest first line kept from a command, in bytes
pub const MAX_LINE_BYTES: u64 = 1024;

/// `run_command`: first line of a shell command's standard output
pub struct CommandMetric;

#[async_trait::async_trait]
impl Metric for CommandMetric {
    async fn sample(&self, arg: Option<&str>) -> Result<String> {
        let cmd = required_arg(self.name(), arg)?;
        let failed = |e: std::io::Error| {
            Error::metric_io(format!("Failed to get command output for {}", cmd), &e)
        };

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(cmd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(failed)?;

        let mut buf = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            // Dropping the reader closes our end of the pipe
            let mut reader = BufReader::new(stdout).take(MAX_LINE_BYTES);
            reader.read_until(b'\n', &mut buf).await.map_err(failed)?;
        }

        // The exit status is not checked; only stdout matters
        let status = child.wait().await.map_err(failed)?;
        debug!("run_command {:?} exited with {}", cmd, status);

        first_line(&buf).ok_or_else(|| Error::metric(format!("Command produced no output: {}", cmd)))
    }

    fn arity(&self) -> Arity {
        Arity::WithArg
    }

    fn name(&self) -> &'static str {
        "run_command"
    }
}

fn first_line(stdout: &[u8]) -> Option<String> {
    let line = stdout.split(|&b| b == b'\n').next().unwrap_or_default();
    if line.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(line).into_owned())
}
