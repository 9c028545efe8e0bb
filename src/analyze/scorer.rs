// Legacy path: score fixed-length transcript chunks one by one.

use super::client::CompletionClient;
use super::moments::Moment;
use super::response::{lenient_score, parse_json, ParseOutcome};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, warn};

const SCORE_TEMPERATURE: f32 = 0.7;

pub const EMPTY_SEGMENT_REASON: &str = "Empty transcript, skipped.";
pub const FAILED_SCORE_REASON: &str = "AI error or empty.";
pub const MISSING_REASON: &str = "No reason provided.";

/// A fixed-length slice of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSegment {
    #[serde(flatten)]
    pub segment: Segment,
    pub viral_score: u8,
    pub reason: String,
}

impl From<ScoredSegment> for Moment {
    fn from(scored: ScoredSegment) -> Self {
        Moment::new(
            scored.segment.start,
            scored.segment.end,
            scored.reason,
            scored.viral_score,
        )
    }
}

#[derive(Debug, Deserialize)]
struct ScoreReply {
    #[serde(default, deserialize_with = "lenient_score")]
    viral_score: u8,
    reason: Option<String>,
}

/// Split `full_text` into chunks of `segment_duration` seconds.
///
/// Words are spread evenly: each chunk gets
/// `ceil(words / (video_duration / segment_duration))` of them.
pub fn segment_transcript(full_text: &str, segment_duration: f64, video_duration: f64) -> Vec<Segment> {
    let words: Vec<&str> = full_text.split_whitespace().collect();
    if words.is_empty() || segment_duration <= 0.0 || video_duration <= 0.0 {
        return Vec::new();
    }

    let segment_count = video_duration / segment_duration;
    let words_per_segment = ((words.len() as f64 / segment_count).ceil() as usize).max(1);

    words
        .chunks(words_per_segment)
        .enumerate()
        .map(|(i, chunk)| {
            let start = i as f64 * segment_duration;
            Segment {
                start,
                end: (start + segment_duration).min(video_duration),
                text: chunk.join(" "),
            }
        })
        .collect()
}

pub fn build_prompt(text: &str) -> String {
    format!(
        r#"You're an expert social media video editor.

Please rate the following video excerpt for its VIRAL potential on a scale from 0 to 100.

Also explain in 1 short sentence WHY it's likely (or unlikely) to go viral.

Return ONLY strict JSON like this:

{{
  "viral_score": 85,
  "reason": "It is emotional and surprising."
}}

Here is the excerpt:
"""
{text}
""""#
    )
}

/// Read a `{"viral_score", "reason"}` reply.
pub fn parse_score(raw: &str) -> ParseOutcome<(u8, String)> {
    parse_json::<ScoreReply>(raw).map(|reply| {
        let reason = reply
            .reason
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| MISSING_REASON.to_string());
        (reply.viral_score, reason)
    })
}

/// Score one segment. Never fails: problems become a zero score.
pub async fn score_segment(client: &dyn CompletionClient, segment: Segment) -> ScoredSegment {
    if segment.text.trim().is_empty() {
        return ScoredSegment {
            segment,
            viral_score: 0,
            reason: EMPTY_SEGMENT_REASON.to_string(),
        };
    }

    let outcome = match client
        .complete(&build_prompt(&segment.text), SCORE_TEMPERATURE)
        .await
    {
        Ok(raw) => {
            debug!("Score response: {}", raw);
            parse_score(&raw)
        }
        Err(e) => ParseOutcome::Fallback(e.to_string()),
    };

    let (viral_score, reason) = outcome.unwrap_or_else(|why| {
        warn!(
            "Error scoring segment {:.1}-{:.1}s: {}",
            segment.start, segment.end, why
        );
        (0, FAILED_SCORE_REASON.to_string())
    });

    ScoredSegment {
        segment,
        viral_score,
        reason,
    }
}

/// Score every segment in order, then sort by score, highest first.
///
/// Ties keep their input order.
pub async fn score_segments(
    client: &dyn CompletionClient,
    segments: Vec<Segment>,
) -> Vec<ScoredSegment> {
    let mut scored = Vec::with_capacity(segments.len());
    for segment in segments {
        scored.push(score_segment(client, segment).await);
    }

    scored.sort_by_key(|s| Reverse(s.viral_score));
    scored
}
