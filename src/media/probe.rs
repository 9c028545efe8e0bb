use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::command::FfmpegCommand;
use super::VideoInfo;
use crate::error::{AutoclipError, Result};

/// Read dimensions, duration and rotation of the first video stream.
pub async fn probe_video(path: &Path) -> Result<VideoInfo> {
    if !path.exists() {
        return Err(AutoclipError::FileNotFound(path.display().to_string()));
    }

    let stdout = FfmpegCommand::ffprobe()
        .args([
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height:stream_tags=rotate:stream_side_data=rotation:format=duration",
            "-of",
            "json",
        ])
        .arg(path)
        .stdout("probe")
        .await?;

    let info = parse_probe_output(&stdout)?;
    info!(
        "Video loaded: {}x{} | {:.2}s | Rotation: {}° | {}",
        info.width,
        info.height,
        info.duration,
        info.rotation,
        if info.is_vertical() { "vertical" } else { "horizontal" }
    );

    Ok(info)
}

/// Parse ffprobe's JSON report into a [`VideoInfo`].
pub fn parse_probe_output(json: &str) -> Result<VideoInfo> {
    let report: ProbeReport = serde_json::from_str(json)?;
    debug!("ffprobe report: {:?}", report);

    let stream = report
        .streams
        .into_iter()
        .next()
        .ok_or_else(|| AutoclipError::Media("No video stream found".to_string()))?;

    let width = stream
        .width
        .ok_or_else(|| AutoclipError::Media("Video stream has no width".to_string()))?;
    let height = stream
        .height
        .ok_or_else(|| AutoclipError::Media("Video stream has no height".to_string()))?;

    let duration = report
        .format
        .and_then(|f| f.duration)
        .and_then(|d| d.trim().parse::<f64>().ok())
        .ok_or_else(|| AutoclipError::Media("Could not read video duration".to_string()))?;

    // Older muxers tag rotation, newer ones store it in the display matrix.
    let rotation = stream
        .tags
        .and_then(|t| t.rotate)
        .and_then(|r| r.trim().parse::<i32>().ok())
        .or_else(|| {
            stream
                .side_data_list
                .unwrap_or_default()
                .into_iter()
                .find_map(|s| s.rotation)
        })
        .unwrap_or(0)
        .rem_euclid(360);

    Ok(VideoInfo {
        width,
        height,
        duration,
        rotation,
    })
}

#[derive(Debug, Deserialize)]
struct ProbeReport {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
    tags: Option<ProbeTags>,
    side_data_list: Option<Vec<ProbeSideData>>,
}

#[derive(Debug, Deserialize)]
struct ProbeTags {
    rotate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeSideData {
    rotation: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}
