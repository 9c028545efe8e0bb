pub mod client;
pub mod moments;
pub mod response;
pub mod scorer;

pub use client::{CompletionClient, OpenAiClient};
pub use moments::{attach_text, select_moments, Highlight, Moment};
pub use response::{parse_json, strip_code_fences, ParseOutcome};
pub use scorer::{score_segments, segment_transcript, ScoredSegment, Segment};
