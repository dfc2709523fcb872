use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use panel_core::{LinkColumn, Platform, YtFormat, DEFAULT_CODEC, DEFAULT_MP3_BITRATE,
    DEFAULT_MP4_QUALITY};

/// Terminal front end for the media download backend.
#[derive(Debug, Parser)]
#[command(name = "panel", version)]
pub struct Cli {
    /// Backend base URL; overrides the config file.
    #[arg(long, env = "PANEL_BACKEND_URL", global = true)]
    pub backend: Option<String>,

    /// Path of the RON config file.
    #[arg(long, env = "PANEL_CONFIG", default_value = "./panel.ron", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit a download job and follow it until it finishes
    Submit {
        /// Source URL of the media
        url: String,
        #[arg(long, value_enum, default_value = "soundcloud")]
        platform: CliPlatform,
        /// Output format (YouTube only)
        #[arg(long, value_enum, default_value = "mp3")]
        format: CliFormat,
        #[arg(long, default_value = DEFAULT_MP3_BITRATE)]
        mp3_bitrate: String,
        #[arg(long, default_value = DEFAULT_MP4_QUALITY)]
        mp4_quality: String,
        #[arg(long, default_value = DEFAULT_CODEC)]
        codec: String,
    },
    /// Show the download history
    History {
        /// Open the link in row N (zero-based)
        #[arg(long, conflicts_with = "copy")]
        open: Option<usize>,
        /// Copy the link in row N (zero-based) to the clipboard
        #[arg(long)]
        copy: Option<usize>,
        #[arg(long, value_enum, default_value = "result")]
        column: CliColumn,
    },
    /// Show download statistics
    Stats,
    /// Delete the download history
    ClearHistory {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliPlatform {
    #[value(name = "soundcloud")]
    SoundCloud,
    #[value(name = "youtube")]
    YouTube,
    #[value(name = "tiktok")]
    TikTok,
    Instagram,
    Twitter,
}

impl From<CliPlatform> for Platform {
    fn from(platform: CliPlatform) -> Self {
        match platform {
            CliPlatform::SoundCloud => Platform::SoundCloud,
            CliPlatform::YouTube => Platform::YouTube,
            CliPlatform::TikTok => Platform::TikTok,
            CliPlatform::Instagram => Platform::Instagram,
            CliPlatform::Twitter => Platform::Twitter,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliFormat {
    Mp3,
    Mp4,
}

impl From<CliFormat> for YtFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Mp3 => YtFormat::Mp3,
            CliFormat::Mp4 => YtFormat::Mp4,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliColumn {
    Source,
    Result,
}

impl From<CliColumn> for LinkColumn {
    fn from(column: CliColumn) -> Self {
        match column {
            CliColumn::Source => LinkColumn::Source,
            CliColumn::Result => LinkColumn::Result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_defaults_match_form_defaults() {
        let cli = Cli::try_parse_from(["panel", "submit", "https://soundcloud.com/a/b"]).unwrap();
        let Command::Submit {
            platform,
            format,
            mp3_bitrate,
            mp4_quality,
            codec,
            ..
        } = cli.command
        else {
            panic!("expected submit");
        };
        assert_eq!(Platform::from(platform), Platform::SoundCloud);
        assert_eq!(YtFormat::from(format), YtFormat::Mp3);
        assert_eq!(mp3_bitrate, "192k");
        assert_eq!(mp4_quality, "Best");
        assert_eq!(codec, "original");
    }

    #[test]
    fn open_and_copy_conflict() {
        assert!(Cli::try_parse_from(["panel", "history", "--open", "1", "--copy", "2"]).is_err());
        let cli = Cli::try_parse_from(["panel", "history", "--copy", "2", "--column", "source"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Command::History {
                copy: Some(2),
                column: CliColumn::Source,
                ..
            }
        ));
    }

    #[test]
    fn platform_names_are_lowercase() {
        let cli = Cli::try_parse_from([
            "panel", "submit", "https://youtu.be/x", "--platform", "youtube", "--format", "mp4",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Submit {
                platform: CliPlatform::YouTube,
                format: CliFormat::Mp4,
                ..
            }
        ));
    }
}
