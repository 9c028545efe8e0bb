use std::path::Path;

use tracing::info;

use super::command::FfmpegCommand;
use super::probe::probe_video;
use crate::error::Result;

/// Height of every vertical output.
pub const TARGET_HEIGHT: u32 = 1080;

/// Horizontal crop applied to a landscape frame, spanning the full height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropWindow {
    pub x1: f64,
    pub width: f64,
}

impl CropWindow {
    pub fn x2(&self) -> f64 {
        self.x1 + self.width
    }
}

/// Centered 9:16 crop for a frame, or `None` when it is already narrower
/// than it is tall and only needs scaling.
pub fn vertical_crop(width: u32, height: u32) -> Option<CropWindow> {
    if width < height {
        return None;
    }

    let w = f64::from(width);
    let crop_width = (f64::from(height) * 9.0 / 16.0).min(w);
    Some(CropWindow {
        x1: w / 2.0 - crop_width / 2.0,
        width: crop_width,
    })
}

/// ffmpeg filter chain that turns a `width`x`height` frame into a vertical one.
pub fn vertical_filter(width: u32, height: u32) -> String {
    let scale = format!("scale=-2:{TARGET_HEIGHT}");
    match vertical_crop(width, height) {
        Some(crop) => {
            // libx264 wants even, non-zero dimensions.
            let crop_w = ((crop.width as u32) & !1).max(2);
            let x = crop.x1.max(0.0).round() as u32;
            format!("crop={crop_w}:{height}:{x}:0,{scale}")
        }
        None => scale,
    }
}

/// Re-encode `input` as a 1080px-high vertical clip.
pub async fn create_vertical_version(input: &Path, output: &Path) -> Result<()> {
    let info = probe_video(input).await?;

    if vertical_crop(info.width, info.height).is_some() {
        info!("Cropping {}x{} clip to 9:16", info.width, info.height);
    } else {
        info!("Clip already vertical, resizing height to {}", TARGET_HEIGHT);
    }

    FfmpegCommand::ffmpeg()
        .input(input)
        .arg("-vf")
        .arg(vertical_filter(info.width, info.height))
        .args([
            "-c:v", "libx264", "-preset", "ultrafast", "-r", "24", "-c:a", "aac",
        ])
        .arg(output)
        .run("vertical reorientation")
        .await?;

    info!("Cropped and saved vertical video: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_crop_is_centered() {
        let crop = vertical_crop(1920, 1080).unwrap();
        assert!((crop.width - 607.5).abs() < 1e-9);
        assert!((crop.x1 - (960.0 - 607.5 / 2.0)).abs() < 1e-9);
        assert!((crop.x2() - (960.0 + 607.5 / 2.0)).abs() < 1e-9);
    }

    #[test]
    fn test_square_crop() {
        let crop = vertical_crop(1000, 1000).unwrap();
        assert!((crop.width - 562.5).abs() < 1e-9);
        assert!((crop.x1 - 218.75).abs() < 1e-9);
    }

    #[test]
    fn test_portrait_is_scale_only() {
        assert_eq!(vertical_crop(1080, 1920), None);
        assert_eq!(vertical_filter(1080, 1920), "scale=-2:1080");
    }

    #[test]
    fn test_landscape_filter() {
        assert_eq!(vertical_filter(1920, 1080), "crop=606:1080:656:0,scale=-2:1080");
    }

    #[test]
    fn test_tiny_frame_keeps_nonzero_crop() {
        // 3 * 9/16 = 1.6875 would round down to an empty crop.
        assert_eq!(vertical_filter(4, 3), "crop=2:3:1:0,scale=-2:1080");
        assert_eq!(vertical_filter(2, 2), "crop=2:2:0:0,scale=-2:1080");
    }
}
