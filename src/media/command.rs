use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Output;

use tokio::process::Command;
use tracing::debug;

use crate::error::{AutoclipError, Result};

/// Argument-list builder for an ffmpeg or ffprobe invocation.
///
/// Arguments are passed straight to the process, never through a shell.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    program: &'static str,
    args: Vec<OsString>,
}

impl FfmpegCommand {
    /// An ffmpeg call that overwrites its output and only reports errors.
    pub fn ffmpeg() -> Self {
        Self {
            program: "ffmpeg",
            args: Vec::new(),
        }
        .args(["-y", "-hide_banner", "-loglevel", "error"])
    }

    pub fn ffprobe() -> Self {
        Self {
            program: "ffprobe",
            args: Vec::new(),
        }
        .args(["-v", "error"])
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn input(self, path: &Path) -> Self {
        self.arg("-i").arg(path)
    }

    /// Seek to `start` and keep `duration` seconds, both with millisecond precision.
    pub fn range(self, start: f64, duration: f64) -> Self {
        self.arg("-ss")
            .arg(format!("{start:.3}"))
            .arg("-t")
            .arg(format!("{duration:.3}"))
    }

    pub fn program(&self) -> &'static str {
        self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    async fn execute(&self) -> Result<Output> {
        debug!(
            "Running {} {}",
            self.program,
            self.args
                .iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        Command::new(self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| AutoclipError::Media(format!("Failed to run {}: {e}", self.program)))
    }

    /// Run to completion, treating a non-zero exit as a failure of `stage`.
    pub async fn run(&self, stage: &str) -> Result<()> {
        let output = self.execute().await?;
        check_status(self.program, stage, &output)?;
        Ok(())
    }

    /// Run to completion and return stdout.
    pub async fn stdout(&self, stage: &str) -> Result<String> {
        let output = self.execute().await?;
        check_status(self.program, stage, &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn check_status(program: &str, stage: &str, output: &Output) -> Result<()> {
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    Err(AutoclipError::Media(format!(
        "{stage}: {program} exited with {}: {}",
        output.status,
        stderr.trim()
    )))
}

/// Check that a tool is installed and answers `-version`.
pub async fn check_tool(program: &str) -> Result<()> {
    let output = Command::new(program)
        .arg("-version")
        .output()
        .await
        .map_err(|e| {
            AutoclipError::Media(format!(
                "{program} not found. Please install FFmpeg and ensure it's in your PATH. Error: {e}"
            ))
        })?;

    if !output.status.success() {
        return Err(AutoclipError::Media(format!("{program} check failed")));
    }

    debug!("{} is available", program);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &FfmpegCommand) -> Vec<String> {
        cmd.get_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_ffmpeg_defaults() {
        let cmd = FfmpegCommand::ffmpeg();
        assert_eq!(cmd.program(), "ffmpeg");
        assert_eq!(args_of(&cmd), ["-y", "-hide_banner", "-loglevel", "error"]);
    }

    #[test]
    fn test_range_and_input() {
        let cmd = FfmpegCommand::ffmpeg()
            .range(9.5, 60.25)
            .input(Path::new("/videos/my file.mp4"));
        let args = args_of(&cmd);
        assert_eq!(
            &args[4..],
            ["-ss", "9.500", "-t", "60.250", "-i", "/videos/my file.mp4"]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_media_error() {
        let cmd = FfmpegCommand {
            program: "definitely-not-a-real-binary-autoclip",
            args: Vec::new(),
        };
        match cmd.run("probe").await {
            Err(AutoclipError::Media(msg)) => assert!(msg.contains("Failed to run")),
            other => panic!("expected media error, got {other:?}"),
        }
    }
}
