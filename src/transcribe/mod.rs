pub mod slice;
pub mod whisper;

pub use slice::{join_words, slice_text, slice_words};
pub use whisper::WhisperClient;

use crate::error::{AutoclipError, Result};
use crate::media::extract_audio;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, info};

/// A single timed word, in seconds from the start of the media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub start: f64,
    pub end: f64,
    #[serde(alias = "word")]
    pub text: String,
}

impl Word {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Word-level transcript of a whole video, ordered by start time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    pub words: Vec<Word>,
}

impl Transcript {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Plain text of the transcript, words joined by single spaces.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Load a transcript previously saved as a JSON word list.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(AutoclipError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// A timed segment as reported by a recognition engine, optionally broken
/// down into words.
#[derive(Debug, Clone)]
pub struct EngineSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub words: Option<Vec<Word>>,
}

/// Flatten engine segments into words.
///
/// A segment without word timing becomes one word spanning the segment.
pub fn words_from_segments(segments: Vec<EngineSegment>) -> Transcript {
    let mut words = Vec::new();

    for segment in segments {
        match segment.words {
            Some(seg_words) if !seg_words.is_empty() => words.extend(seg_words),
            _ => words.push(Word::new(
                segment.start,
                segment.end,
                segment.text.trim(),
            )),
        }
    }

    Transcript::new(words)
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file into timed words.
    async fn transcribe(&self, audio: &Path) -> Result<Transcript>;
    fn name(&self) -> &'static str;
}

/// Extract the audio of `video` to a scratch directory and transcribe it.
///
/// The scratch directory is removed when this returns, on success or error.
pub async fn transcribe_video(transcriber: &dyn Transcriber, video: &Path) -> Result<Transcript> {
    if !video.exists() {
        return Err(AutoclipError::FileNotFound(video.display().to_string()));
    }

    let temp_dir = TempDir::new()?;
    let audio_path = temp_dir.path().join("audio.mp3");
    debug!("Using temp directory: {:?}", temp_dir.path());

    extract_audio(video, &audio_path).await?;

    info!("Transcribing with {}", transcriber.name());
    let transcript = transcriber.transcribe(&audio_path).await?;
    info!("Transcription done: {} words", transcript.len());

    Ok(transcript)
}
