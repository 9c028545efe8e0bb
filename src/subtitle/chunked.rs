use super::{clip_offset, SubtitleEntry};
use tracing::debug;

/// Words per caption when no word timing is available.
pub const WORDS_PER_CHUNK: usize = 7;

/// Spread `text` evenly over a window of `window_duration` seconds.
///
/// The text is cut into chunks of [`WORDS_PER_CHUNK`] words, each shown for
/// an equal share of the window. Returns `None` when there is nothing to
/// caption.
pub fn entries_from_text(text: &str, window_duration: f64) -> Option<Vec<SubtitleEntry>> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        debug!("Empty caption text, skipping subtitle generation");
        return None;
    }

    let chunks: Vec<String> = words
        .chunks(WORDS_PER_CHUNK)
        .map(|chunk| chunk.join(" "))
        .collect();
    let seconds_per_chunk = window_duration / chunks.len() as f64;

    let entries = chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| {
            let start = i as f64 * seconds_per_chunk;
            let end = (start + seconds_per_chunk).min(window_duration);
            SubtitleEntry {
                index: i + 1,
                start: clip_offset(start),
                end: clip_offset(end),
                text: chunk,
            }
        })
        .collect();

    Some(entries)
}
