//! Argument types shared by the render and sweep commands

use anyhow::Result;
use binview_raster::{MAX_RASTER_PIXELS, PixelEncoding, viewport};
use binview_shared::config::RenderConfig;
use binview_shared::export::ImageFormat;
use clap::Args;

/// Raster geometry and encoding flags
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Raster width in pixels (default from config, 256)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Raster height in pixels (default: rows the data can fill, up to max_height)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: Option<u32>,

    /// Pixel encoding: rgb24, rgb32, rgba32, grey8, ega4, mono1, mono1inv
    #[arg(short, long, value_parser = parse_encoding)]
    pub encoding: Option<PixelEncoding>,
}

/// Resolved raster geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct View {
    pub width: u32,
    pub height: u32,
    pub encoding: PixelEncoding,
}

impl ViewArgs {
    /// Fill unset flags from config and size the raster to the data.
    pub fn resolve(
        &self,
        config: &RenderConfig,
        total_len: usize,
        start_offset: usize,
    ) -> Result<View> {
        let width = self.width.unwrap_or(config.width);
        anyhow::ensure!(width > 0, "Raster width must be at least 1");
        let encoding = self.encoding.unwrap_or(config.encoding);

        let height = match self.height {
            Some(height) => height,
            None => viewport::rows_available(total_len, start_offset, width, encoding)
                .clamp(1, config.max_height.max(1)),
        };

        let pixels = u64::from(width) * u64::from(height);
        anyhow::ensure!(
            pixels <= MAX_RASTER_PIXELS,
            "Raster {width}x{height} is {pixels} pixels, more than the {MAX_RASTER_PIXELS} limit"
        );

        Ok(View {
            width,
            height,
            encoding,
        })
    }
}

/// Parse a byte offset: decimal, or hex with a `0x` prefix
pub fn parse_offset(s: &str) -> Result<usize, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid offset '{s}': {e}"))
}

pub fn parse_encoding(s: &str) -> Result<PixelEncoding, String> {
    s.parse().map_err(|e: binview_raster::UnknownEncoding| e.to_string())
}

pub fn parse_image_format(s: &str) -> Result<ImageFormat, String> {
    s.parse().map_err(|e: binview_shared::ExportError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("0"), Ok(0));
        assert_eq!(parse_offset("4096"), Ok(4096));
        assert_eq!(parse_offset("0x1000"), Ok(4096));
        assert_eq!(parse_offset("0XfF"), Ok(255));
        assert!(parse_offset("0x").is_err());
        assert!(parse_offset("-5").is_err());
        assert!(parse_offset("12k").is_err());
    }

    #[test]
    fn test_parse_encoding_message() {
        assert_eq!(parse_encoding("ega4"), Ok(PixelEncoding::Ega4));
        let err = parse_encoding("bgr24").unwrap_err();
        assert!(err.contains("bgr24"));
    }

    #[test]
    fn test_resolve_uses_config_defaults() {
        let config = RenderConfig {
            width: 16,
            max_height: 8,
            encoding: PixelEncoding::Grey8,
        };
        // 64 grey bytes = 4 rows of 16
        let view = ViewArgs::default().resolve(&config, 64, 0).unwrap();
        assert_eq!(
            view,
            View {
                width: 16,
                height: 4,
                encoding: PixelEncoding::Grey8
            }
        );

        // Plenty of data: capped at max_height
        let view = ViewArgs::default().resolve(&config, 10_000, 0).unwrap();
        assert_eq!(view.height, 8);

        // Nothing left to show still yields a 1-row raster
        let view = ViewArgs::default().resolve(&config, 64, 64).unwrap();
        assert_eq!(view.height, 1);
    }

    #[test]
    fn test_resolve_flags_override_config() {
        let args = ViewArgs {
            width: Some(8),
            height: Some(3),
            encoding: Some(PixelEncoding::Mono1),
        };
        let view = args.resolve(&RenderConfig::default(), 1, 0).unwrap();
        assert_eq!((view.width, view.height), (8, 3));
        assert_eq!(view.encoding, PixelEncoding::Mono1);
    }

    #[test]
    fn test_resolve_rejects_oversized_raster() {
        let args = ViewArgs {
            width: Some(4_000_000_000),
            height: None,
            encoding: Some(PixelEncoding::Grey8),
        };
        let err = args.resolve(&RenderConfig::default(), 64, 0).unwrap_err();
        assert!(err.to_string().contains("4000000000x1"));

        let args = ViewArgs {
            width: Some(1 << 13),
            height: Some(1 << 13),
            encoding: None,
        };
        assert!(args.resolve(&RenderConfig::default(), 64, 0).is_ok());

        let args = ViewArgs {
            height: Some((1 << 13) + 1),
            ..args
        };
        assert!(args.resolve(&RenderConfig::default(), 64, 0).is_err());
    }

    #[test]
    fn test_resolve_rejects_zero_width_from_config() {
        let config = RenderConfig {
            width: 0,
            ..RenderConfig::default()
        };
        assert!(ViewArgs::default().resolve(&config, 64, 0).is_err());
    }
}
