pub mod caption;
pub mod command;
pub mod extract;
pub mod probe;
pub mod vertical;

pub use caption::burn_subtitles;
pub use command::{check_tool, FfmpegCommand};
pub use extract::{extract_audio, extract_subclip};
pub use probe::{parse_probe_output, probe_video};
pub use vertical::{create_vertical_version, vertical_crop, vertical_filter, CropWindow};

use crate::config::CaptionStyle;
use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Stream properties of a video file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Duration in seconds.
    pub duration: f64,
    /// Rotation in degrees, normalised to `0..360`.
    pub rotation: i32,
}

impl VideoInfo {
    /// Taller than wide, either in pixels or through rotation metadata.
    pub fn is_vertical(&self) -> bool {
        self.height > self.width || matches!(self.rotation, 90 | 270)
    }
}

/// The video operations the clip renderer needs.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<VideoInfo>;
    async fn extract_subclip(&self, input: &Path, start: f64, end: f64, output: &Path)
        -> Result<()>;
    async fn burn_subtitles(
        &self,
        input: &Path,
        srt: &Path,
        output: &Path,
        style: CaptionStyle,
    ) -> Result<()>;
    async fn make_vertical(&self, input: &Path, output: &Path) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// [`MediaEngine`] backed by the ffmpeg and ffprobe executables.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ffmpeg;

impl Ffmpeg {
    /// Verify both executables are on `PATH`.
    pub async fn check(&self) -> Result<()> {
        check_tool("ffmpeg").await?;
        check_tool("ffprobe").await
    }
}

#[async_trait]
impl MediaEngine for Ffmpeg {
    async fn probe(&self, path: &Path) -> Result<VideoInfo> {
        probe_video(path).await
    }

    async fn extract_subclip(
        &self,
        input: &Path,
        start: f64,
        end: f64,
        output: &Path,
    ) -> Result<()> {
        extract_subclip(input, start, end, output).await
    }

    async fn burn_subtitles(
        &self,
        input: &Path,
        srt: &Path,
        output: &Path,
        style: CaptionStyle,
    ) -> Result<()> {
        burn_subtitles(input, srt, output, style).await
    }

    async fn make_vertical(&self, input: &Path, output: &Path) -> Result<()> {
        create_vertical_version(input, output).await
    }

    fn name(&self) -> &'static str {
        "ffmpeg"
    }
}
