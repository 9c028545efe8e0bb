use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Make a title safe for file names: drop path and quoting characters,
/// turn spaces into underscores and lowercase the rest.
pub fn sanitize_filename(name: &str) -> String {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    let unsafe_chars = UNSAFE.get_or_init(|| Regex::new(r#"[\\/*?:"<>|']"#).expect("valid regex"));

    unsafe_chars
        .replace_all(name, "")
        .replace(' ', "_")
        .to_lowercase()
}

/// Turn a sanitized title back into something readable.
pub fn beautify_title(title: &str) -> String {
    title
        .replace('_', " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Files produced for one clip, named by title prefix and 1-based index.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPaths {
    pub raw: PathBuf,
    pub srt: PathBuf,
    pub captioned: PathBuf,
    pub vertical: PathBuf,
}

impl ClipPaths {
    pub fn new(project_folder: &Path, prefix: &str, index: usize) -> Self {
        let stem = format!("{prefix}_clip_{index}");
        Self {
            raw: project_folder.join(format!("{stem}_raw.mp4")),
            srt: project_folder.join(format!("{stem}.srt")),
            captioned: project_folder.join(format!("{stem}_captioned.mp4")),
            vertical: project_folder.join(format!("{stem}_vertical.mp4")),
        }
    }
}

/// Base name of `path` as a string.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
