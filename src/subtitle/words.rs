use super::{clip_offset, SubtitleEntry};
use crate::transcribe::Word;

/// One entry per word, shifted so `clip_start` becomes zero.
///
/// Timings are taken as-is; overlapping or out-of-order words stay that way.
pub fn entries_from_words(words: &[Word], clip_start: f64) -> Vec<SubtitleEntry> {
    words
        .iter()
        .enumerate()
        .map(|(i, word)| SubtitleEntry {
            index: i + 1,
            start: clip_offset(word.start - clip_start),
            end: clip_offset(word.end - clip_start),
            text: word.text.trim().to_string(),
        })
        .collect()
}
