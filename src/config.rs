use crate::error::{AutoclipError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Named caption look used when burning subtitles into a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptionStyle {
    #[default]
    Professional,
    Fun,
    Minimal,
    RedAlert,
}

/// Font and colour parameters behind a [`CaptionStyle`].
///
/// Colours are in the ASS `&HAABBGGRR` notation expected by ffmpeg's
/// `force_style` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleParams {
    pub font_name: &'static str,
    pub font_size: u32,
    pub primary_colour: &'static str,
    pub outline_colour: &'static str,
    pub border_style: u8,
    pub outline: u8,
    pub shadow: bool,
}

impl CaptionStyle {
    pub const ALL: [CaptionStyle; 4] = [
        CaptionStyle::Professional,
        CaptionStyle::Fun,
        CaptionStyle::Minimal,
        CaptionStyle::RedAlert,
    ];

    /// Look up a style by name, falling back to `professional` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "professional" => CaptionStyle::Professional,
            "fun" => CaptionStyle::Fun,
            "minimal" => CaptionStyle::Minimal,
            "red_alert" | "red-alert" => CaptionStyle::RedAlert,
            other => {
                warn!("Unknown caption style '{}', using professional", other);
                CaptionStyle::Professional
            }
        }
    }

    pub fn params(&self) -> StyleParams {
        match self {
            CaptionStyle::Professional => StyleParams {
                font_name: "Arial",
                font_size: 11,
                primary_colour: "&H00FFFFFF",
                outline_colour: "&H80000000",
                border_style: 1,
                outline: 3,
                shadow: true,
            },
            CaptionStyle::Fun => StyleParams {
                font_name: "Comic Sans MS",
                font_size: 11,
                primary_colour: "&H0000FFFF",
                outline_colour: "&H80000000",
                border_style: 1,
                outline: 3,
                shadow: true,
            },
            CaptionStyle::Minimal => StyleParams {
                font_name: "Helvetica",
                font_size: 12,
                primary_colour: "&H00FFFFFF",
                outline_colour: "&H00000000",
                border_style: 1,
                outline: 0,
                shadow: false,
            },
            CaptionStyle::RedAlert => StyleParams {
                font_name: "Impact",
                font_size: 11,
                primary_colour: "&H000000FF",
                outline_colour: "&H80000000",
                border_style: 1,
                outline: 4,
                shadow: true,
            },
        }
    }

    /// Render the style as an ffmpeg `force_style` value.
    pub fn force_style(&self) -> String {
        let p = self.params();
        format!(
            "FontName={},FontSize={},PrimaryColour={},OutlineColour={},BorderStyle={},Outline={},Shadow={}",
            p.font_name,
            p.font_size,
            p.primary_colour,
            p.outline_colour,
            p.border_style,
            p.outline,
            u8::from(p.shadow)
        )
    }
}

impl std::fmt::Display for CaptionStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptionStyle::Professional => write!(f, "professional"),
            CaptionStyle::Fun => write!(f, "fun"),
            CaptionStyle::Minimal => write!(f, "minimal"),
            CaptionStyle::RedAlert => write!(f, "red_alert"),
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Chat model used for moment selection and scoring.
    pub model: String,
    pub transcription_model: String,
    /// Directory under which project folders are created.
    pub output_dir: PathBuf,
    pub caption_style: CaptionStyle,
    pub max_moments: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: "gpt-4o".to_string(),
            transcription_model: "whisper-1".to_string(),
            output_dir: PathBuf::from("static/clips"),
            caption_style: CaptionStyle::default(),
            max_moments: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                let contents = std::fs::read_to_string(&config_path)?;
                match toml::from_str::<Config>(&contents) {
                    Ok(file_config) => config = file_config,
                    Err(e) => warn!("Ignoring invalid config file {:?}: {}", config_path, e),
                }
            }
        }

        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.openai_api_key = Some(key);
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(model) = std::env::var("AUTOCLIP_MODEL") {
            config.model = model;
        }
        if let Ok(dir) = std::env::var("AUTOCLIP_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Ok(style) = std::env::var("AUTOCLIP_CAPTION_STYLE") {
            config.caption_style = CaptionStyle::from_name(&style);
        }
        if let Ok(max) = std::env::var("AUTOCLIP_MAX_MOMENTS") {
            if let Ok(m) = max.parse() {
                config.max_moments = m;
            }
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.openai_api_key.is_none() {
            return Err(AutoclipError::Config(
                "OPENAI_API_KEY not set. Export it with: export OPENAI_API_KEY=sk-...".to_string(),
            ));
        }

        if self.max_moments == 0 {
            return Err(AutoclipError::Config(
                "max_moments must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// The API key, or a configuration error when it is missing.
    pub fn api_key(&self) -> Result<&str> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            AutoclipError::Config(
                "OpenAI API key not set. Set OPENAI_API_KEY environment variable.".to_string(),
            )
        })
    }

    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("autoclip").join("config.toml"))
    }
}
