pub mod analyze;
pub mod config;
pub mod download;
pub mod error;
pub mod media;
pub mod pipeline;
pub mod render;
pub mod subtitle;
pub mod transcribe;

pub use config::{CaptionStyle, Config};
pub use download::{download_video, stage_local_video, Project};
pub use error::{AutoclipError, Result};
pub use pipeline::{
    generate_clips, print_summary, PipelineConfig, PipelineResult, PipelineStats, Services,
};
