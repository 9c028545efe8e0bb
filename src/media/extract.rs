use std::path::Path;

use tracing::{debug, info};

use super::command::FfmpegCommand;
use crate::error::{AutoclipError, Result};

/// Extract the audio track as mono 16 kHz MP3 at 32 kbit/s.
///
/// The low bitrate keeps an hour of speech well under the transcription
/// upload limit.
pub async fn extract_audio(input: &Path, output: &Path) -> Result<()> {
    if !input.exists() {
        return Err(AutoclipError::FileNotFound(input.display().to_string()));
    }

    info!("Extracting audio from {}", input.display());

    audio_command(input, output).run("audio extraction").await?;

    if !output.exists() {
        return Err(AutoclipError::Media(
            "Output file was not created".to_string(),
        ));
    }

    info!("Audio extracted to {}", output.display());
    Ok(())
}

fn audio_command(input: &Path, output: &Path) -> FfmpegCommand {
    FfmpegCommand::ffmpeg()
        .input(input)
        .args(["-vn", "-ac", "1", "-ar", "16000", "-b:a", "32k"])
        .arg(output)
}

/// Cut `[start, end]` out of `input`, re-encoded to H.264 video and AAC audio.
pub async fn extract_subclip(input: &Path, start: f64, end: f64, output: &Path) -> Result<()> {
    let duration = end - start;
    if duration <= 0.0 {
        return Err(AutoclipError::Media(format!(
            "Empty clip range {start:.2}s..{end:.2}s"
        )));
    }

    debug!(
        "Extracting subclip: start={:.3}, duration={:.3}",
        start, duration
    );

    subclip_command(input, start, duration, output)
        .run("clip extraction")
        .await
}

fn subclip_command(input: &Path, start: f64, duration: f64, output: &Path) -> FfmpegCommand {
    FfmpegCommand::ffmpeg()
        .range(start, duration)
        .input(input)
        .args(["-c:v", "libx264", "-c:a", "aac", "-movflags", "+faststart"])
        .arg(output)
}
