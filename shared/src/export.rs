//! Raster export to image files
//!
//! - Single rasters: PNG (`png` crate, RGBA8), JPEG (`image`, RGB8, alpha
//!   dropped) or BMP (`image`, RGBA8)
//! - Offset sweeps: looping animated GIF (`gif` crate)

use binview_raster::{PixelEncoding, Raster};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output image container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
    Bmp,
}

impl ImageFormat {
    /// Canonical file extension (without dot)
    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
        }
    }

    /// Guess the format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()?.to_str()?.parse().ok()
    }
}

impl FromStr for ImageFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Bmp => "bmp",
        })
    }
}

/// Error type for image export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("GIF encoding failed: {0}")]
    Gif(#[from] gif::EncodingError),

    #[error("Unknown image format '{0}' (expected png, jpeg or bmp)")]
    UnknownFormat(String),

    #[error("Cannot export an empty {width}x{height} raster")]
    EmptyRaster { width: u32, height: u32 },

    #[error("Sweep has no frames to write")]
    NoFrames,

    #[error("Frame {index} is {actual:?}, expected {expected:?}")]
    FrameSizeMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("{width}x{height} exceeds the GIF size limit of 65535x65535")]
    TooLargeForGif { width: u32, height: u32 },
}

fn create_file(path: &Path) -> Result<BufWriter<File>, ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

fn check_not_empty(raster: &Raster) -> Result<(), ExportError> {
    if raster.pixel_count() == 0 {
        return Err(ExportError::EmptyRaster {
            width: raster.width(),
            height: raster.height(),
        });
    }
    Ok(())
}

/// Save a raster in the given format.
///
/// `jpeg_quality` is only used for JPEG and is clamped to 1-100.
pub fn save_raster(
    raster: &Raster,
    path: &Path,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<(), ExportError> {
    check_not_empty(raster)?;
    match format {
        ImageFormat::Png => save_png(raster, path)?,
        ImageFormat::Jpeg => save_jpeg(raster, path, jpeg_quality)?,
        ImageFormat::Bmp => save_bmp(raster, path)?,
    }
    tracing::info!(
        "Saved {}x{} {} to {}",
        raster.width(),
        raster.height(),
        format,
        path.display()
    );
    Ok(())
}

fn save_png(raster: &Raster, path: &Path) -> Result<(), ExportError> {
    let writer = create_file(path)?;

    let mut encoder = png::Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(raster.as_rgba())?;
    png_writer.finish()?;
    Ok(())
}

fn save_jpeg(raster: &Raster, path: &Path, quality: u8) -> Result<(), ExportError> {
    // JPEG has no alpha channel
    let rgb: Vec<u8> = raster
        .as_rgba()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut writer = create_file(path)?;
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    encoder.encode(
        &rgb,
        raster.width(),
        raster.height(),
        image::ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

fn save_bmp(raster: &Raster, path: &Path) -> Result<(), ExportError> {
    let mut writer = create_file(path)?;
    let mut encoder = image::codecs::bmp::BmpEncoder::new(&mut writer);
    encoder.encode(
        raster.as_rgba(),
        raster.width(),
        raster.height(),
        image::ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

/// Save a sequence of equally sized rasters as a looping animated GIF.
///
/// `delay_ms` is rounded down to GIF's 10 ms resolution.
pub fn save_sweep_gif(frames: &[Raster], path: &Path, delay_ms: u32) -> Result<(), ExportError> {
    let first = frames.first().ok_or(ExportError::NoFrames)?;
    check_not_empty(first)?;

    let expected = (first.width(), first.height());
    let (Ok(width), Ok(height)) = (u16::try_from(expected.0), u16::try_from(expected.1)) else {
        return Err(ExportError::TooLargeForGif {
            width: expected.0,
            height: expected.1,
        });
    };
    if let Some((index, frame)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| (f.width(), f.height()) != expected)
    {
        return Err(ExportError::FrameSizeMismatch {
            index,
            expected,
            actual: (frame.width(), frame.height()),
        });
    }

    let writer = create_file(path)?;
    let mut encoder = gif::Encoder::new(writer, width, height, &[])?;
    encoder.set_repeat(gif::Repeat::Infinite)?;

    // GIF delays are in centiseconds
    let delay = u16::try_from(delay_ms / 10).unwrap_or(u16::MAX);

    for raster in frames {
        let mut rgba = raster.as_rgba().to_vec();
        let mut frame = gif::Frame::from_rgba_speed(width, height, &mut rgba, 10);
        frame.delay = delay;
        encoder.write_frame(&frame)?;
    }

    tracing::info!(
        "Saved {} frame sweep ({}x{}) to {}",
        frames.len(),
        width,
        height,
        path.display()
    );
    Ok(())
}

/// Sanitize a name for use in filenames.
///
/// Lowercases alphanumerics, turns everything else into single underscores.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect::<String>()
        // Remove consecutive underscores
        .split('_')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    if sanitized.is_empty() {
        "binview".to_string()
    } else {
        sanitized
    }
}

/// Deterministic output name: `<name>_<offset as hex>_<encoding>.<extension>`
pub fn output_filename(
    source_name: &str,
    offset: usize,
    encoding: PixelEncoding,
    extension: &str,
) -> String {
    format!(
        "{}_{:08x}_{}.{}",
        sanitize_filename(source_name),
        offset,
        encoding.name(),
        extension
    )
}

/// Timestamped output name: `<name>_<suffix>_<local time>.<extension>`
pub fn timestamped_filename(source_name: &str, suffix: &str, extension: &str) -> String {
    let now = chrono::Local::now();
    format!(
        "{}_{}_{}.{}",
        sanitize_filename(source_name),
        suffix,
        now.format("%Y-%m-%d_%H-%M-%S"),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("JPG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!("jpeg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert!(matches!(
            "tiff".parse::<ImageFormat>(),
            Err(ExportError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ImageFormat::from_path(Path::new("out/a.BMP")),
            Some(ImageFormat::Bmp)
        );
        assert_eq!(ImageFormat::from_path(Path::new("a.gif")), None);
        assert_eq!(ImageFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Game Data.bin"), "game_data_bin");
        assert_eq!(sanitize_filename("--weird__name--"), "weird_name");
        assert_eq!(sanitize_filename("***"), "binview");
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(
            output_filename("firmware.img", 0x1A2B, PixelEncoding::Mono1Inv, "png"),
            "firmware_img_00001a2b_mono1inv.png"
        );
    }

    #[test]
    fn test_timestamped_filename_shape() {
        let name = timestamped_filename("dump.bin", "sweep", "gif");
        assert!(name.starts_with("dump_bin_sweep_"));
        assert!(name.ends_with(".gif"));
    }

    #[test]
    fn test_empty_raster_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = save_raster(
            &Raster::new(0, 4),
            &dir.path().join("empty.png"),
            ImageFormat::Png,
            90,
        );
        assert!(matches!(result, Err(ExportError::EmptyRaster { .. })));
    }

    #[test]
    fn test_sweep_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.gif");

        assert!(matches!(
            save_sweep_gif(&[], &path, 100),
            Err(ExportError::NoFrames)
        ));

        let frames = [Raster::new(4, 4), Raster::new(4, 4), Raster::new(4, 3)];
        assert!(matches!(
            save_sweep_gif(&frames, &path, 100),
            Err(ExportError::FrameSizeMismatch { index: 2, .. })
        ));

        assert!(matches!(
            save_sweep_gif(&[Raster::new(70_000, 1)], &path, 100),
            Err(ExportError::TooLargeForGif { .. })
        ));
    }
}
