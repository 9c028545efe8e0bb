pub mod chunked;
pub mod srt;
pub mod words;

pub use chunked::{entries_from_text, WORDS_PER_CHUNK};
pub use srt::{format_timestamp, SrtFormatter};
pub use words::entries_from_words;

use crate::error::Result;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// One caption, timed relative to the start of its clip.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleEntry {
    pub index: usize,
    pub start: Duration,
    pub end: Duration,
    pub text: String,
}

/// Seconds to a [`Duration`], flooring negative offsets at zero and
/// saturating ones too large to represent.
pub(crate) fn clip_offset(seconds: f64) -> Duration {
    if seconds.is_nan() || seconds <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX)
}

/// Write entries to `path` as an SRT file.
pub fn write_srt(path: &Path, entries: &[SubtitleEntry]) -> Result<()> {
    std::fs::write(path, SrtFormatter.format(entries))?;
    info!("SRT file saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_offset() {
        assert_eq!(clip_offset(1.25), Duration::from_millis(1250));
        assert_eq!(clip_offset(-0.3), Duration::ZERO);
        assert_eq!(clip_offset(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_clip_offset_saturates() {
        assert_eq!(clip_offset(1e20), Duration::MAX);
        assert_eq!(clip_offset(f64::INFINITY), Duration::MAX);
        assert_eq!(clip_offset(f64::NEG_INFINITY), Duration::ZERO);
    }

    #[test]
    fn test_write_srt() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("clip.srt");
        let entries = vec![SubtitleEntry {
            index: 1,
            start: Duration::ZERO,
            end: Duration::from_millis(800),
            text: "Hi".to_string(),
        }];

        write_srt(&path, &entries).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "1\n00:00:00,000 --> 00:00:00,800\nHi\n");
    }
}
