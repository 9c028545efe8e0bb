use crate::analyze::{attach_text, select_moments, CompletionClient, Highlight};
use crate::download::Project;
use crate::error::Result;
use crate::media::MediaEngine;
use crate::render::{beautify_title, ClipMetadata, ClipRenderer, RenderOptions};
use crate::transcribe::{transcribe_video, Transcriber, Transcript};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// File the transcript is saved to inside the project folder.
pub const TRANSCRIPT_FILE: &str = "transcript.json";
/// File the clip list is saved to inside the project folder.
pub const CLIPS_FILE: &str = "clips.json";

/// Configuration for the clip generation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on moments requested from the model.
    pub max_moments: usize,
    pub render: RenderOptions,
    /// Show progress spinners.
    pub show_progress: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_moments: 10,
            render: RenderOptions::default(),
            show_progress: true,
        }
    }
}

/// The external services a pipeline run talks to.
pub struct Services<'a> {
    pub transcriber: &'a dyn Transcriber,
    pub llm: &'a dyn CompletionClient,
    pub media: &'a dyn MediaEngine,
}

#[derive(Debug, Clone)]
pub struct PipelineStats {
    pub total_time: Duration,
    pub transcription_time: Duration,
    pub analysis_time: Duration,
    pub render_time: Duration,
    pub words: usize,
    pub moments_found: usize,
}

#[derive(Debug)]
pub struct PipelineResult {
    pub project: Project,
    pub highlights: Vec<Highlight>,
    pub clips: Vec<ClipMetadata>,
    /// Where the clip list was written.
    pub clips_file: PathBuf,
    pub stats: PipelineStats,
}

fn stage_spinner(show: bool, message: &'static str) -> Option<ProgressBar> {
    if !show {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(spinner);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}

/// Run transcription, moment selection and rendering for a staged project.
///
/// A `transcript` supplied by the caller skips transcription. Only a failed
/// transcription or an unreadable source video aborts the run; bad model
/// output just means fewer (or no) clips.
pub async fn generate_clips(
    project: Project,
    transcript: Option<Transcript>,
    services: &Services<'_>,
    config: &PipelineConfig,
) -> Result<PipelineResult> {
    let start_time = Instant::now();

    // Stage 1: transcript
    let transcription_start = Instant::now();
    let transcript = match transcript {
        Some(t) => {
            info!("Stage 1/3: Using provided transcript ({} words)", t.len());
            t
        }
        None => {
            info!("Stage 1/3: Transcribing {}", project.video_path.display());
            let pb = stage_spinner(config.show_progress, "Transcribing audio...");
            let t = transcribe_video(services.transcriber, &project.video_path).await?;
            if let Some(pb) = pb {
                pb.finish_with_message(format!("✓ Transcribed {} words", t.len()));
            }
            if let Err(e) = t.save(&project.folder.join(TRANSCRIPT_FILE)) {
                warn!("Could not save transcript: {}", e);
            }
            t
        }
    };
    let transcription_time = transcription_start.elapsed();

    // Stage 2: moments
    info!("Stage 2/3: Finding viral moments with {}", services.llm.name());
    let analysis_start = Instant::now();
    let pb = stage_spinner(config.show_progress, "Analyzing transcript...");
    let moments = select_moments(services.llm, &transcript.text(), config.max_moments).await;
    if let Some(pb) = pb {
        pb.finish_with_message(format!("✓ Found {} moment(s)", moments.len()));
    }
    let analysis_time = analysis_start.elapsed();

    if moments.is_empty() {
        warn!("No viral moments found");
    }

    // Stage 3: clips
    info!("Stage 3/3: Rendering {} clip(s)", moments.len());
    let render_start = Instant::now();
    let pb = stage_spinner(config.show_progress, "Rendering clips...");
    let renderer = ClipRenderer::new(services.media, config.render);
    let clips = renderer
        .render_all(
            &project.video_path,
            &moments,
            &project.sanitized_title,
            &project.folder,
            Some(&transcript),
        )
        .await?;
    if let Some(pb) = pb {
        pb.finish_with_message(format!("✓ Rendered {} clip(s)", clips.len()));
    }
    let render_time = render_start.elapsed();

    let clips_file = project.folder.join(CLIPS_FILE);
    write_clips(&clips_file, &clips)?;

    let stats = PipelineStats {
        total_time: start_time.elapsed(),
        transcription_time,
        analysis_time,
        render_time,
        words: transcript.len(),
        moments_found: moments.len(),
    };

    Ok(PipelineResult {
        highlights: attach_text(moments, Some(&transcript)),
        project,
        clips,
        clips_file,
        stats,
    })
}

/// Save the clip list as pretty-printed JSON.
pub fn write_clips(path: &Path, clips: &[ClipMetadata]) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(clips)?)?;
    info!("Wrote {} clip record(s) to {:?}", clips.len(), path);
    Ok(())
}

/// Print a summary of the pipeline results.
pub fn print_summary(result: &PipelineResult) {
    println!();
    println!(
        "{}",
        style(format!("  {}", beautify_title(&result.project.sanitized_title))).bold()
    );
    println!("  Project:    {}", result.project.folder.display());
    println!("  Words:      {}", result.stats.words);
    println!(
        "  Clips:      {} of {} moment(s)",
        result.clips.len(),
        result.stats.moments_found
    );
    println!();

    for clip in &result.clips {
        println!(
            "  {} {} ({:.1}s - {:.1}s)",
            style(format!("[{:>3}]", clip.viral_score)).cyan(),
            clip.clip_file,
            clip.start,
            clip.end
        );
        println!("        {}", style(&clip.reason).dim());
    }

    println!();
    println!("  Timing:");
    println!(
        "    Transcribe:  {:.2}s",
        result.stats.transcription_time.as_secs_f64()
    );
    println!(
        "    Analyze:     {:.2}s",
        result.stats.analysis_time.as_secs_f64()
    );
    println!(
        "    Render:      {:.2}s",
        result.stats.render_time.as_secs_f64()
    );
    println!(
        "    Total:       {:.2}s",
        result.stats.total_time.as_secs_f64()
    );
    println!();
}
