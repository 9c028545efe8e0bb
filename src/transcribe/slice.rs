use super::{Transcript, Word};

/// Words overlapping `[clip_start, clip_end]`, in transcript order.
///
/// Overlap is strict: a word that ends exactly at `clip_start` or begins
/// exactly at `clip_end` is left out, as are words with blank text.
pub fn slice_words(transcript: Option<&Transcript>, clip_start: f64, clip_end: f64) -> Vec<Word> {
    let Some(transcript) = transcript else {
        return Vec::new();
    };

    transcript
        .words
        .iter()
        .filter(|w| w.start < clip_end && w.end > clip_start && !w.text.trim().is_empty())
        .cloned()
        .collect()
}

/// Space-joined text of the words overlapping `[clip_start, clip_end]`.
pub fn slice_text(transcript: Option<&Transcript>, clip_start: f64, clip_end: f64) -> String {
    join_words(&slice_words(transcript, clip_start, clip_end))
}

pub fn join_words(words: &[Word]) -> String {
    words
        .iter()
        .map(|w| w.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transcript {
        Transcript::new(vec![
            Word::new(0.0, 1.0, "before"),
            Word::new(1.0, 2.0, "edge"),
            Word::new(1.5, 2.5, "straddle"),
            Word::new(3.0, 4.0, "inside"),
            Word::new(4.0, 4.5, "   "),
            Word::new(4.5, 5.5, "tail"),
            Word::new(5.0, 6.0, "after"),
        ])
    }

    #[test]
    fn test_strict_overlap() {
        let words = slice_words(Some(&sample()), 2.0, 5.0);
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, ["straddle", "inside", "tail"]);
    }

    #[test]
    fn test_no_retiming() {
        let words = slice_words(Some(&sample()), 2.0, 5.0);
        assert_eq!(words[0].start, 1.5);
        assert_eq!(words[0].end, 2.5);
    }

    #[test]
    fn test_absent_transcript() {
        assert!(slice_words(None, 0.0, 100.0).is_empty());
        assert_eq!(slice_text(None, 0.0, 100.0), "");
    }

    #[test]
    fn test_window_without_words() {
        assert!(slice_words(Some(&sample()), 10.0, 20.0).is_empty());
    }

    #[test]
    fn test_every_overlapping_word_once() {
        let transcript = sample();
        let (start, end) = (0.5, 4.2);
        let words = slice_words(Some(&transcript), start, end);
        for word in &transcript.words {
            let expected = word.start < end && word.end > start && !word.text.trim().is_empty();
            let count = words.iter().filter(|w| *w == word).count();
            assert_eq!(count, usize::from(expected), "word {:?}", word);
        }
    }

    #[test]
    fn test_slice_text() {
        assert_eq!(slice_text(Some(&sample()), 2.9, 4.1), "inside");
    }
}
