pub mod naming;

pub use naming::{beautify_title, sanitize_filename, ClipPaths};

use crate::analyze::Moment;
use crate::config::CaptionStyle;
use crate::error::{AutoclipError, Result};
use crate::media::MediaEngine;
use crate::subtitle::{entries_from_words, write_srt};
use crate::transcribe::{join_words, slice_words, Transcript, Word};
use naming::file_name;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Lead-in added before each moment's start, in seconds.
pub const PRE_ROLL_SECS: f64 = 0.5;
/// Shortest window worth rendering after clamping, in seconds.
pub const MIN_RENDER_SECS: f64 = 5.0;

/// Record of one rendered clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipMetadata {
    pub project_folder: String,
    pub clip_file: String,
    pub start: f64,
    pub end: f64,
    pub reason: String,
    pub viral_score: u8,
    pub caption_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub burn_captions: bool,
    pub caption_style: CaptionStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            burn_captions: true,
            caption_style: CaptionStyle::default(),
        }
    }
}

/// Pad and clamp a moment to the video, or `None` if too little is left.
pub fn clamp_window(moment: &Moment, video_duration: f64) -> Option<(f64, f64)> {
    let start = (moment.start - PRE_ROLL_SECS).max(0.0);
    let end = moment.end.min(video_duration);

    if start >= video_duration || end - start < MIN_RENDER_SECS {
        return None;
    }
    Some((start, end))
}

pub struct ClipRenderer<'a> {
    engine: &'a dyn MediaEngine,
    options: RenderOptions,
}

impl<'a> ClipRenderer<'a> {
    pub fn new(engine: &'a dyn MediaEngine, options: RenderOptions) -> Self {
        Self { engine, options }
    }

    /// Render every moment in order and return metadata for the clips that
    /// made it through.
    ///
    /// Only a failure to read the source video is returned as an error.
    pub async fn render_all(
        &self,
        video: &Path,
        moments: &[Moment],
        title_prefix: &str,
        project_folder: &Path,
        transcript: Option<&Transcript>,
    ) -> Result<Vec<ClipMetadata>> {
        let source = self.engine.probe(video).await?;
        let safe_prefix = sanitize_filename(title_prefix);
        let folder_name = file_name(project_folder);
        let mut clips = Vec::with_capacity(moments.len());

        for (i, moment) in moments.iter().enumerate() {
            let index = i + 1;

            let Some((start, end)) = clamp_window(moment, source.duration) else {
                warn!("Skipping clip {}: invalid or too short.", index);
                continue;
            };

            info!(
                "Processing clip {}: start={:.2}, end={:.2}, duration={:.2}s",
                index,
                start,
                end,
                end - start
            );

            let paths = ClipPaths::new(project_folder, &safe_prefix, index);
            match self
                .render_clip(video, source.is_vertical(), (start, end), &paths, transcript)
                .await
            {
                Ok(words) => clips.push(ClipMetadata {
                    project_folder: folder_name.clone(),
                    clip_file: file_name(&paths.vertical),
                    start: moment.start,
                    end: moment.end,
                    reason: moment.reason.clone(),
                    viral_score: moment.viral_score,
                    caption_text: join_words(&words),
                }),
                Err(e) => error!("Error processing clip {}: {}", index, e),
            }
        }

        info!("Rendered {} of {} clip(s)", clips.len(), moments.len());
        Ok(clips)
    }

    /// Produce the files for one clip and return the words captioned in it.
    async fn render_clip(
        &self,
        video: &Path,
        source_is_vertical: bool,
        (start, end): (f64, f64),
        paths: &ClipPaths,
        transcript: Option<&Transcript>,
    ) -> Result<Vec<Word>> {
        self.engine
            .extract_subclip(video, start, end, &paths.raw)
            .await?;
        debug!("Extracted raw clip to: {}", paths.raw.display());

        let words = slice_words(transcript, start, end);

        let final_clip = if self.options.burn_captions && !words.is_empty() {
            write_srt(&paths.srt, &entries_from_words(&words, start))?;
            self.engine
                .burn_subtitles(
                    &paths.raw,
                    &paths.srt,
                    &paths.captioned,
                    self.options.caption_style,
                )
                .await?;
            &paths.captioned
        } else {
            debug!("No captions for {}, using raw clip", paths.raw.display());
            &paths.raw
        };

        if source_is_vertical {
            tokio::fs::copy(final_clip, &paths.vertical)
                .await
                .map_err(|e| {
                    AutoclipError::Media(format!("copying vertical clip: {e}"))
                })?;
            debug!("Copied vertical clip: {}", paths.vertical.display());
        } else {
            self.engine
                .make_vertical(final_clip, &paths.vertical)
                .await?;
        }

        Ok(words)
    }
}
