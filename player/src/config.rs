//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    video: VideoConfig,
    #[serde(default)]
    audio: AudioConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VideoConfig {
    /// UDP port the video stream arrives on
    #[serde(default = "default_video_port")]
    port: u16,
    /// Output width after scaling
    #[serde(default = "default_width")]
    width: i32,
    /// Output height after scaling
    #[serde(default = "default_height")]
    height: i32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            port: default_video_port(),
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AudioConfig {
    /// Whether the audio branch is built at all
    #[serde(default = "default_true")]
    enabled: bool,
    /// UDP port the audio stream arrives on
    #[serde(default = "default_audio_port")]
    port: u16,
    /// Raw sample format expected on the wire
    #[serde(default = "default_audio_format")]
    format: String,
    #[serde(default = "default_audio_channels")]
    channels: i32,
    #[serde(default = "default_audio_rate")]
    rate: i32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: default_audio_port(),
            format: default_audio_format(),
            channels: default_audio_channels(),
            rate: default_audio_rate(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    level: Option<String>,
}

fn default_video_port() -> u16 {
    udplay_types::DEFAULT_VIDEO_PORT
}

fn default_audio_port() -> u16 {
    udplay_types::DEFAULT_AUDIO_PORT
}

fn default_width() -> i32 {
    udplay_types::DEFAULT_WIDTH
}

fn default_height() -> i32 {
    udplay_types::DEFAULT_HEIGHT
}

fn default_audio_format() -> String {
    udplay_types::DEFAULT_AUDIO_FORMAT.to_string()
}

fn default_audio_channels() -> i32 {
    udplay_types::DEFAULT_AUDIO_CHANNELS
}

fn default_audio_rate() -> i32 {
    udplay_types::DEFAULT_AUDIO_RATE
}

fn default_true() -> bool {
    true
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// UDP port for the video stream
    pub video_port: u16,
    /// Output video width
    pub width: i32,
    /// Output video height
    pub height: i32,
    /// Whether the audio branch is built
    pub audio_enabled: bool,
    /// UDP port for the audio stream
    pub audio_port: u16,
    /// Audio sample format (e.g. "S16LE")
    pub audio_format: String,
    /// Audio channel count
    pub audio_channels: i32,
    /// Audio sample rate in Hz
    pub audio_rate: i32,
    /// Log level (if set, used when RUST_LOG is not)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are searched in this order:
    /// 1. `.udplay.toml` in current directory
    /// 2. `config.toml` in user config directory (~/.config/udplay/ on Linux)
    pub fn from_figment(
        video_port: Option<u16>,
        audio_port: Option<u16>,
        width: Option<i32>,
        height: Option<i32>,
        video_only: bool,
    ) -> anyhow::Result<Self> {
        // Find config file paths
        let local_config = std::env::current_dir().ok().map(|d| d.join(".udplay.toml"));
        let user_config = directories::ProjectDirs::from("", "", "udplay")
            .map(|dirs| dirs.config_dir().join("config.toml"));

        // Build figment with priority: defaults < user config < local config < env vars < CLI args
        let mut figment = Figment::new();

        // 1. Start with defaults
        figment = figment.merge(Serialized::defaults(ConfigFile::default()));

        // 2. Merge user config file if it exists
        if let Some(ref path) = user_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // 3. Merge local config file if it exists
        if let Some(ref path) = local_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // 4. Merge environment variables (UDPLAY_* prefix)
        figment = figment.merge(
            Env::prefixed("UDPLAY_")
                .map(|key| key.as_str().replace("__", ".").into())
                .split("_"),
        );

        // 5. Merge CLI arguments (highest priority)
        if let Some(p) = video_port {
            figment = figment.merge(Serialized::default("video.port", p));
        }
        if let Some(p) = audio_port {
            figment = figment.merge(Serialized::default("audio.port", p));
        }
        if let Some(w) = width {
            figment = figment.merge(Serialized::default("video.width", w));
        }
        if let Some(h) = height {
            figment = figment.merge(Serialized::default("video.height", h));
        }
        if video_only {
            figment = figment.merge(Serialized::default("audio.enabled", false));
        }

        // Extract the configuration
        let config_file: ConfigFile = figment.extract()?;

        Ok(Self {
            video_port: config_file.video.port,
            width: config_file.video.width,
            height: config_file.video.height,
            audio_enabled: config_file.audio.enabled,
            audio_port: config_file.audio.port,
            audio_format: config_file.audio.format,
            audio_channels: config_file.audio.channels,
            audio_rate: config_file.audio.rate,
            log_level: config_file.logging.level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let file = ConfigFile::default();
        Self {
            video_port: file.video.port,
            width: file.video.width,
            height: file.video.height,
            audio_enabled: file.audio.enabled,
            audio_port: file.audio.port,
            audio_format: file.audio.format,
            audio_channels: file.audio.channels,
            audio_rate: file.audio.rate,
            log_level: file.logging.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn from_figment_defaults() {
        // Clear any env vars that might have been set by other tests
        std::env::remove_var("UDPLAY_VIDEO_PORT");
        std::env::remove_var("UDPLAY_AUDIO_PORT");
        std::env::remove_var("UDPLAY_AUDIO_ENABLED");

        // Run in a temp directory to avoid picking up a project .udplay.toml
        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(None, None, None, None, false).unwrap();

        // Restore (ignore errors)
        let _ = std::env::set_current_dir(original_dir);

        assert_eq!(config.video_port, udplay_types::DEFAULT_VIDEO_PORT);
        assert_eq!(config.audio_port, udplay_types::DEFAULT_AUDIO_PORT);
        assert_eq!(config.width, udplay_types::DEFAULT_WIDTH);
        assert_eq!(config.height, udplay_types::DEFAULT_HEIGHT);
        assert!(config.audio_enabled);
        assert_eq!(config.audio_format, "S16LE");
        assert_eq!(config.audio_channels, 2);
        assert_eq!(config.audio_rate, 44100);
    }

    #[test]
    #[serial]
    fn from_figment_cli_args_override() {
        std::env::remove_var("UDPLAY_VIDEO_PORT");
        std::env::remove_var("UDPLAY_AUDIO_PORT");

        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let config =
            Config::from_figment(Some(5000), Some(5002), Some(1280), Some(720), true).unwrap();

        let _ = std::env::set_current_dir(original_dir);

        assert_eq!(config.video_port, 5000);
        assert_eq!(config.audio_port, 5002);
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert!(!config.audio_enabled);
    }

    #[test]
    #[serial]
    fn from_figment_env_override() {
        let temp_dir = TempDir::new().unwrap();
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        std::env::set_var("UDPLAY_VIDEO_PORT", "6000");
        let config = Config::from_figment(None, None, None, None, false).unwrap();
        std::env::remove_var("UDPLAY_VIDEO_PORT");

        let _ = std::env::set_current_dir(original_dir);

        assert_eq!(config.video_port, 6000);
        // CLI beats env
        std::env::set_var("UDPLAY_VIDEO_PORT", "6000");
        let config = Config::from_figment(Some(7000), None, None, None, false).unwrap();
        std::env::remove_var("UDPLAY_VIDEO_PORT");
        assert_eq!(config.video_port, 7000);
    }

    #[test]
    #[serial]
    fn from_figment_config_file() {
        std::env::remove_var("UDPLAY_VIDEO_PORT");
        std::env::remove_var("UDPLAY_AUDIO_ENABLED");

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join(".udplay.toml");

        let config_content = r#"
[video]
port = 7777
width = 1280

[audio]
enabled = false
"#;
        fs::write(&config_file, config_content).unwrap();

        // Change to temp directory to make config file discoverable
        let original_dir = std::env::current_dir().unwrap();
        std::env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(None, None, None, None, false).unwrap();

        let _ = std::env::set_current_dir(original_dir);

        assert_eq!(config.video_port, 7777);
        assert_eq!(config.width, 1280);
        // Unset keys keep their defaults
        assert_eq!(config.height, udplay_types::DEFAULT_HEIGHT);
        assert!(!config.audio_enabled);
    }
}
