use std::fmt;

pub const DEFAULT_MP3_BITRATE: &str = "192k";
pub const DEFAULT_MP4_QUALITY: &str = "Best";
pub const DEFAULT_CODEC: &str = "original";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    #[default]
    SoundCloud,
    YouTube,
    TikTok,
    Instagram,
    Twitter,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::SoundCloud => "SoundCloud",
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::Twitter => "Twitter",
        }
    }

    /// Video platforms without quality tiers get the codec options directly.
    fn has_plain_video(self) -> bool {
        matches!(
            self,
            Platform::TikTok | Platform::Instagram | Platform::Twitter
        )
    }

    /// Platforms that only accept specific link shapes show a URL hint.
    fn needs_url_hint(self) -> bool {
        matches!(self, Platform::Instagram | Platform::Twitter)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format offered for the quality-tiered platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YtFormat {
    #[default]
    Mp3,
    Mp4,
}

impl YtFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            YtFormat::Mp3 => "mp3",
            YtFormat::Mp4 => "mp4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub url: String,
    pub platform: Platform,
    pub yt_format: YtFormat,
    pub mp3_bitrate: String,
    pub mp4_quality: String,
    pub codec_preference: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            url: String::new(),
            platform: Platform::default(),
            yt_format: YtFormat::default(),
            mp3_bitrate: DEFAULT_MP3_BITRATE.to_string(),
            mp4_quality: DEFAULT_MP4_QUALITY.to_string(),
            codec_preference: DEFAULT_CODEC.to_string(),
        }
    }
}

impl FormState {
    /// Multipart fields for `/start_download`. Hidden sections are still
    /// submitted, the backend ignores what does not apply.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        [
            ("url", self.url.trim()),
            ("platform", self.platform.as_str()),
            ("yt_format", self.yt_format.as_str()),
            ("mp3_bitrate", self.mp3_bitrate.as_str()),
            ("mp4_quality", self.mp4_quality.as_str()),
            ("codec_preference", self.codec_preference.as_str()),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
    }

    pub fn sections(&self) -> SectionVisibility {
        section_visibility(self.platform, self.yt_format)
    }
}

/// Which optional form sections are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionVisibility {
    pub url_hint: bool,
    pub youtube_options: bool,
    pub mp3_quality: bool,
    pub mp4_quality: bool,
    pub codec_options: bool,
}

pub fn section_visibility(platform: Platform, format: YtFormat) -> SectionVisibility {
    let mut sections = SectionVisibility {
        url_hint: platform.needs_url_hint(),
        ..SectionVisibility::default()
    };
    if platform == Platform::YouTube {
        sections.youtube_options = true;
        match format {
            YtFormat::Mp3 => sections.mp3_quality = true,
            YtFormat::Mp4 => {
                sections.mp4_quality = true;
                sections.codec_options = true;
            }
        }
    } else if platform.has_plain_video() {
        sections.codec_options = true;
    }
    sections
}

