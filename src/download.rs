use crate::error::{AutoclipError, Result};
use crate::render::sanitize_filename;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::process::Command;
use tracing::{debug, info};

/// Name of the source video inside every project folder.
pub const FULL_VIDEO_NAME: &str = "full_video.mp4";

/// A source video staged for processing.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Human-readable title, as given by the site or the file name.
    pub title: String,
    pub sanitized_title: String,
    pub folder: PathBuf,
    pub video_path: PathBuf,
}

impl Project {
    fn for_title(title: &str, output_dir: &Path) -> Self {
        let sanitized_title = sanitize_filename(title);
        let folder = output_dir.join(format!("project_{sanitized_title}"));
        Self {
            title: title.to_string(),
            video_path: folder.join(FULL_VIDEO_NAME),
            sanitized_title,
            folder,
        }
    }
}

/// Download `url` with yt-dlp and move it into a fresh project folder.
pub async fn download_video(url: &str, output_dir: &Path) -> Result<Project> {
    let staging = output_dir.join(".download");
    fs::create_dir_all(&staging).await?;

    info!("Downloading {}", url);
    let output = Command::new("yt-dlp")
        .arg(url)
        .args(["-f", "bestvideo+bestaudio/best"])
        .args(["--merge-output-format", "mp4"])
        .args(["--print", "after_move:title"])
        .args(["--print", "after_move:filepath"])
        .arg("-o")
        .arg(staging.join("%(title)s.%(ext)s"))
        .output()
        .await
        .map_err(|e| AutoclipError::Download(format!("Failed to run yt-dlp: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AutoclipError::Download(format!(
            "yt-dlp exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let (title, downloaded) = parse_download_output(&stdout)?;
    debug!("Downloaded video path: {}", downloaded.display());

    if !downloaded.exists() {
        return Err(AutoclipError::Download(
            "Downloaded video not found!".to_string(),
        ));
    }

    let project = Project::for_title(&title, output_dir);
    fs::create_dir_all(&project.folder).await?;
    fs::rename(&downloaded, &project.video_path).await?;

    info!("Saved \"{}\" to {}", project.title, project.video_path.display());
    Ok(project)
}

/// Copy a local video into a fresh project folder named after the file.
pub async fn stage_local_video(path: &Path, output_dir: &Path) -> Result<Project> {
    if !path.exists() {
        return Err(AutoclipError::FileNotFound(path.display().to_string()));
    }

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());

    let project = Project::for_title(&title, output_dir);
    fs::create_dir_all(&project.folder).await?;
    fs::copy(path, &project.video_path).await?;

    info!("Staged {} as {}", path.display(), project.video_path.display());
    Ok(project)
}

/// Split yt-dlp's `title` and `filepath` lines.
fn parse_download_output(stdout: &str) -> Result<(String, PathBuf)> {
    let lines: Vec<&str> = stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    match lines.as_slice() {
        [.., title, path] => Ok((title.to_string(), PathBuf::from(*path))),
        _ => Err(AutoclipError::Download(format!(
            "Unexpected yt-dlp output: {}",
            stdout.trim()
        ))),
    }
}
