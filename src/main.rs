use anyhow::{Context, Result};
use autoclip::analyze::OpenAiClient;
use autoclip::config::{CaptionStyle, Config};
use autoclip::media::Ffmpeg;
use autoclip::render::RenderOptions;
use autoclip::transcribe::{Transcript, WhisperClient};
use autoclip::{
    download_video, generate_clips, print_summary, stage_local_video, PipelineConfig, Project,
    Services,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "autoclip")]
#[command(version, about = "Turn long videos into captioned vertical short clips")]
#[command(
    long_about = "Transcribe a video with OpenAI Whisper, let a chat model pick the most shareable moments, and render each one as a captioned 9:16 clip."
)]
struct Cli {
    /// Local video file
    #[arg(required_unless_present = "url", conflicts_with = "url")]
    input: Option<PathBuf>,

    /// Download the video from this URL with yt-dlp
    #[arg(short, long)]
    url: Option<String>,

    /// Reuse a saved transcript (JSON word list) instead of transcribing
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// Maximum number of moments to request
    #[arg(short, long)]
    max_moments: Option<usize>,

    /// Skip burning captions into the clips
    #[arg(long)]
    no_captions: bool,

    /// Caption style: professional, fun, minimal, red_alert
    #[arg(short, long)]
    style: Option<String>,

    /// Directory under which project folders are created
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Only fetch and stage the video
    #[arg(long)]
    download_only: bool,

    /// Disable progress spinners
    #[arg(long)]
    no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Fold command-line overrides into the loaded configuration.
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(max) = cli.max_moments {
        config.max_moments = max;
    }
    if let Some(ref style) = cli.style {
        config.caption_style = CaptionStyle::from_name(style);
    }
    if let Some(ref dir) = cli.output_dir {
        config.output_dir = dir.clone();
    }
    config
}

async fn stage_project(cli: &Cli, config: &Config) -> Result<Project> {
    match (&cli.url, &cli.input) {
        (Some(url), _) => download_video(url, &config.output_dir)
            .await
            .context("Failed to download video"),
        (None, Some(input)) => stage_local_video(input, &config.output_dir)
            .await
            .context("Failed to stage input video"),
        (None, None) => anyhow::bail!("Provide an input file or --url"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = apply_overrides(
        Config::load().context("Failed to load configuration")?,
        &cli,
    );

    if cli.download_only {
        let project = stage_project(&cli, &config).await?;
        info!("Video ready at {}", project.video_path.display());
        return Ok(());
    }

    config.validate().context("Configuration validation failed")?;

    let media = Ffmpeg;
    media.check().await.context("ffmpeg is required")?;

    let transcript = match cli.transcript {
        Some(ref path) => Some(
            Transcript::load(path)
                .with_context(|| format!("Failed to read transcript {}", path.display()))?,
        ),
        None => None,
    };

    let api_key = config.api_key()?.to_string();
    let transcriber = WhisperClient::new(api_key.clone())
        .with_base_url(&config.base_url)
        .with_model(&config.transcription_model);
    let llm = OpenAiClient::new(api_key)
        .with_base_url(&config.base_url)
        .with_model(&config.model);

    let project = stage_project(&cli, &config).await?;

    info!("Project:  {}", project.folder.display());
    info!("Model:    {}", llm.model());
    info!("Style:    {}", config.caption_style);
    info!("Captions: {}", if cli.no_captions { "off" } else { "on" });

    let pipeline_config = PipelineConfig {
        max_moments: config.max_moments,
        render: RenderOptions {
            burn_captions: !cli.no_captions,
            caption_style: config.caption_style,
        },
        show_progress: !cli.no_progress,
    };
    let services = Services {
        transcriber: &transcriber,
        llm: &llm,
        media: &media,
    };

    let result = generate_clips(project, transcript, &services, &pipeline_config)
        .await
        .context("Clip generation failed")?;

    print_summary(&result);
    info!("Clip list written to {}", result.clips_file.display());

    Ok(())
}
