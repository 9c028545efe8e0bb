// SRT subtitle format
use super::SubtitleEntry;
use std::time::Duration;

pub struct SrtFormatter;

impl SrtFormatter {
    pub fn format(&self, entries: &[SubtitleEntry]) -> String {
        entries
            .iter()
            .map(|entry| {
                format!(
                    "{}\n{} --> {}\n{}\n",
                    entry.index,
                    format_timestamp(entry.start),
                    format_timestamp(entry.end),
                    entry.text.trim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format as `HH:MM:SS,mmm`.
pub fn format_timestamp(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = d.subsec_millis();
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Duration::ZERO), "00:00:00,000");
        assert_eq!(
            format_timestamp(Duration::from_millis(1500)),
            "00:00:01,500"
        );
        assert_eq!(
            format_timestamp(Duration::from_secs(3661) + Duration::from_millis(123)),
            "01:01:01,123"
        );
    }

    #[test]
    fn test_srt_format() {
        let entries = vec![
            SubtitleEntry {
                index: 1,
                start: Duration::from_millis(1500),
                end: Duration::from_millis(4000),
                text: "Hello,".to_string(),
            },
            SubtitleEntry {
                index: 2,
                start: Duration::from_millis(4500),
                end: Duration::from_millis(7000),
                text: " world! ".to_string(),
            },
        ];

        let output = SrtFormatter.format(&entries);

        assert_eq!(
            output,
            "1\n00:00:01,500 --> 00:00:04,000\nHello,\n\n2\n00:00:04,500 --> 00:00:07,000\nworld!\n"
        );
    }
}
