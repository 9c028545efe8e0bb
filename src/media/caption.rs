use std::path::Path;

use tracing::info;

use super::command::FfmpegCommand;
use crate::config::CaptionStyle;
use crate::error::Result;

/// Burn an SRT file into `input` using the given caption style.
pub async fn burn_subtitles(
    input: &Path,
    srt: &Path,
    output: &Path,
    style: CaptionStyle,
) -> Result<()> {
    burn_command(input, srt, output, style)
        .run("subtitle burn")
        .await?;
    info!("Subtitles burned to {}", output.display());
    Ok(())
}

fn burn_command(input: &Path, srt: &Path, output: &Path, style: CaptionStyle) -> FfmpegCommand {
    FfmpegCommand::ffmpeg()
        .input(input)
        .arg("-vf")
        .arg(subtitles_filter(srt, style))
        .args(["-c:a", "copy", "-movflags", "+faststart"])
        .arg(output)
}

/// Build the `subtitles=` filter expression for `srt`.
///
/// ffmpeg unescapes a `-vf` value twice: once when splitting the filtergraph
/// and once when splitting the filter's options. Values are escaped for both.
pub fn subtitles_filter(srt: &Path, style: CaptionStyle) -> String {
    format!(
        "subtitles=filename={}:force_style={}",
        escape_filter_value(&srt.to_string_lossy()),
        escape_filter_value(&style.force_style())
    )
}

fn escape_filter_value(value: &str) -> String {
    backslash_escape(&backslash_escape(value, OPTION_SPECIAL), GRAPH_SPECIAL)
}

const OPTION_SPECIAL: &[char] = &['\\', '\'', ':'];
const GRAPH_SPECIAL: &[char] = &['\\', '\'', '[', ']', ',', ';'];

fn backslash_escape(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtitles_filter() {
        let filter = subtitles_filter(Path::new("/clips/demo_clip_1.srt"), CaptionStyle::Fun);
        assert_eq!(
            filter,
            r"subtitles=filename=/clips/demo_clip_1.srt:force_style=FontName=Comic Sans MS\,FontSize=11\,PrimaryColour=&H0000FFFF\,OutlineColour=&H80000000\,BorderStyle=1\,Outline=3\,Shadow=1"
        );
    }

    #[test]
    fn test_filter_escapes_quotes() {
        let filter = subtitles_filter(Path::new("/tmp/it's.srt"), CaptionStyle::Minimal);
        // ' -> \' at option level, then each of \ and ' escaped again.
        assert!(filter.starts_with(r"subtitles=filename=/tmp/it\\\'s.srt:"));
    }

    #[test]
    fn test_filter_escapes_separators_in_path() {
        let filter = subtitles_filter(
            Path::new("C:/out dir/a,b;[c]/clip.srt"),
            CaptionStyle::Professional,
        );
        assert!(filter.starts_with(r"subtitles=filename=C\\:/out dir/a\,b\;\[c\]/clip.srt:"));
    }

    #[test]
    fn test_backslash_escape_levels() {
        assert_eq!(backslash_escape(r"a\b:c", OPTION_SPECIAL), r"a\\b\:c");
        assert_eq!(
            escape_filter_value(r"this 'is' a \test"),
            r"this \\\'is\\\' a \\\\test"
        );
    }

    #[test]
    fn test_burn_command_copies_audio() {
        let cmd = burn_command(
            Path::new("raw.mp4"),
            Path::new("clip.srt"),
            Path::new("captioned.mp4"),
            CaptionStyle::Professional,
        );
        let args: Vec<String> = cmd
            .get_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(args.windows(2).any(|w| w == ["-c:a", "copy"]));
        assert_eq!(args.last().map(String::as_str), Some("captioned.mp4"));
    }
}
