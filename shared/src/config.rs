//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for tool settings.
//! Settings are stored in TOML format in the platform-specific config directory.
//! Command-line flags always override what is stored here.

use binview_raster::PixelEncoding;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::export::ImageFormat;

/// File name of the configuration file inside [`config_dir`]
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Tool configuration.
///
/// Serialized to/from TOML. Every section and key is optional on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default raster geometry and encoding
    #[serde(default)]
    pub render: RenderConfig,
    /// Image output settings
    #[serde(default)]
    pub export: ExportConfig,
    /// Offset sweep settings
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Raster defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster width in pixels (default: 256)
    #[serde(default = "default_width")]
    pub width: u32,
    /// Upper bound for automatically sized rasters (default: 1024)
    #[serde(default = "default_max_height")]
    pub max_height: u32,
    /// Pixel encoding (default: rgb24)
    #[serde(default)]
    pub encoding: PixelEncoding,
}

/// Image export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output image format (default: png)
    #[serde(default)]
    pub format: ImageFormat,
    /// JPEG quality, 1-100 (default: 90)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    /// Directory for output files when no explicit path is given
    /// (default: current directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

/// Offset sweep settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Number of frames (default: 16)
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Bytes between frames (default: one full raster)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
    /// Delay between GIF frames in milliseconds (default: 100)
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u32,
}

fn default_width() -> u32 {
    256
}
fn default_max_height() -> u32 {
    1024
}
fn default_jpeg_quality() -> u8 {
    90
}
fn default_frames() -> u32 {
    16
}
fn default_frame_delay_ms() -> u32 {
    100
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            max_height: default_max_height(),
            encoding: PixelEncoding::default(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            jpeg_quality: default_jpeg_quality(),
            output_dir: None,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            step: None,
            frame_delay_ms: default_frame_delay_ms(),
        }
    }
}

impl ExportConfig {
    /// JPEG quality clamped to the encoder's accepted range
    pub fn clamped_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100)
    }
}

/// Errors from explicit config file access
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Binview\config`
/// On macOS: `~/Library/Application Support/io.binview.Binview`
/// On Linux: `~/.config/Binview`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.binview", "", "Binview")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Full path of the config file, if a config directory exists
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the platform config directory.
///
/// Returns default values if the file doesn't exist. A file that exists but
/// cannot be read or parsed is reported with a warning and also yields defaults.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if !path.exists() {
        return Config::default();
    }
    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{e}; using defaults");
            Config::default()
        }
    }
}

/// Loads the configuration from an explicit path.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Saves the configuration to an explicit path, creating parent directories.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.render.width, 256);
        assert_eq!(config.render.max_height, 1024);
        assert_eq!(config.render.encoding, PixelEncoding::Rgb24);
        assert_eq!(config.export.format, ImageFormat::Png);
        assert_eq!(config.export.jpeg_quality, 90);
        assert_eq!(config.sweep.frames, 16);
        assert_eq!(config.sweep.step, None);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [render]
            encoding = "mono1inv"

            [export]
            format = "jpeg"
            "#,
        )
        .unwrap();

        assert_eq!(config.render.encoding, PixelEncoding::Mono1Inv);
        assert_eq!(config.render.width, 256);
        assert_eq!(config.export.format, ImageFormat::Jpeg);
        assert_eq!(config.export.jpeg_quality, 90);
        assert_eq!(config.sweep, SweepConfig::default());
    }

    #[test]
    fn test_unknown_encoding_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[render]\nencoding = \"rgb565\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = Config::default();
        config.render.width = 320;
        config.render.encoding = PixelEncoding::Ega4;
        config.export.output_dir = Some(PathBuf::from("out"));
        config.sweep.step = Some(4096);

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_jpeg_quality_clamp() {
        let mut export = ExportConfig::default();
        export.jpeg_quality = 0;
        assert_eq!(export.clamped_jpeg_quality(), 1);
        export.jpeg_quality = 255;
        assert_eq!(export.clamped_jpeg_quality(), 100);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.sweep.frames = 4;
        save_to(&config, &path).unwrap();

        assert_eq!(load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[render\nwidth = ").unwrap();

        assert!(matches!(load_from(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            load_from(&dir.path().join("missing.toml")),
            Err(ConfigError::Read { .. })
        ));
    }
}
