use super::client::CompletionClient;
use super::response::{lenient_score, parse_json, ParseOutcome};
use crate::transcribe::{slice_text, Transcript};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Shortest moment accepted from the model, in seconds.
pub const MIN_MOMENT_SECS: f64 = 35.0;
/// Longest moment accepted from the model, in seconds.
pub const MAX_MOMENT_SECS: f64 = 90.0;

const MOMENT_TEMPERATURE: f32 = 0.4;

/// Shown instead of caption text when no transcript words fall in a moment.
pub const NO_TRANSCRIPT_TEXT: &str = "Transcript not available.";

/// A candidate clip window with the model's judgement of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default, deserialize_with = "lenient_score")]
    pub viral_score: u8,
}

impl Moment {
    pub fn new(start: f64, end: f64, reason: impl Into<String>, viral_score: u8) -> Self {
        Self {
            start,
            end,
            reason: reason.into(),
            viral_score,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the window length is within the selectable 35–90 s range.
    pub fn has_valid_duration(&self) -> bool {
        (MIN_MOMENT_SECS..=MAX_MOMENT_SECS).contains(&self.duration())
    }
}

/// A selected moment together with the transcript text it covers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    #[serde(flatten)]
    pub moment: Moment,
    pub text: String,
}

pub fn build_prompt(transcript_text: &str, max_moments: usize) -> String {
    format!(
        r#"You are a world-class social media video editor.

Given the following transcript from a long video:

---
{transcript_text}
---

Your job:
- Find the best VIRAL-WORTHY MOMENTS.
- For each moment, provide:
    - "start" time (in seconds)
    - "end" time (in seconds)
    - "reason" (1 line explaining why it could go viral)
    - "viral_score" (an integer from 0 to 100, where 100 = most viral potential)

Rules:
- Each moment should be between 30 and 90 seconds long.
- Only find clear, complete thoughts (don't cut in middle of sentences).
- Return no more than {max_moments} moments total.
- FORMAT your entire output as a clean JSON array, NO commentary.

Example format:
[
  {{"start": 12, "end": 47, "reason": "Funny joke about cats", "viral_score": 85}},
  {{"start": 150, "end": 200, "reason": "Inspiring quote about persistence", "viral_score": 90}}
]"#
    )
}

/// Parse the model's answer, keeping only moments of valid length.
pub fn parse_moments(raw: &str, max_moments: usize) -> ParseOutcome<Vec<Moment>> {
    parse_json::<Vec<Moment>>(raw).map(|moments| {
        moments
            .into_iter()
            .filter(|moment| {
                let keep = moment.has_valid_duration();
                if !keep {
                    warn!(
                        "Skipping invalid clip: {:.2}s - {:?}",
                        moment.duration(),
                        moment
                    );
                }
                keep
            })
            .take(max_moments)
            .collect()
    })
}

/// Ask the model for up to `max_moments` moments, in the order it returns them.
///
/// Request or parse failures yield an empty list.
pub async fn select_moments(
    client: &dyn CompletionClient,
    transcript_text: &str,
    max_moments: usize,
) -> Vec<Moment> {
    let prompt = build_prompt(transcript_text, max_moments);

    let raw = match client.complete(&prompt, MOMENT_TEMPERATURE).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Error during viral moment analysis: {}", e);
            return Vec::new();
        }
    };
    debug!("Moment analysis response: {}", raw);

    match parse_moments(&raw, max_moments) {
        ParseOutcome::Parsed(moments) => {
            info!("Model proposed {} valid moment(s)", moments.len());
            moments
        }
        ParseOutcome::Fallback(reason) => {
            warn!("Discarding moment analysis: {}", reason);
            Vec::new()
        }
    }
}

/// Pair each moment with the transcript text inside its window.
pub fn attach_text(moments: Vec<Moment>, transcript: Option<&Transcript>) -> Vec<Highlight> {
    moments
        .into_iter()
        .map(|moment| {
            let text = slice_text(transcript, moment.start, moment.end);
            Highlight {
                text: if text.is_empty() {
                    NO_TRANSCRIPT_TEXT.to_string()
                } else {
                    text
                },
                moment,
            }
        })
        .collect()
}
