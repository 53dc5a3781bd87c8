//! Render command - decode one raster and save it as an image

use anyhow::{Context, Result};
use binview_raster::{Raster, decode, viewport};
use binview_shared::config::Config;
use binview_shared::export::{self, ImageFormat};
use binview_shared::source::{load_source, source_name};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::args::{ViewArgs, parse_image_format, parse_offset};

/// Arguments for the render command
#[derive(Args)]
pub struct RenderArgs {
    /// File to visualize
    pub input: PathBuf,

    /// Output image (default: <name>_<offset>_<encoding>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Start offset in bytes (decimal or 0x hex)
    #[arg(long, value_parser = parse_offset, conflicts_with = "position")]
    pub offset: Option<usize>,

    /// Scrollbar position; the offset becomes file length * position / range-max
    #[arg(long)]
    pub position: Option<u64>,

    /// Scrollbar range used with --position
    #[arg(long, default_value_t = 1000)]
    pub range_max: u64,

    /// Output format: png, jpeg, bmp (default: from output extension, then config)
    #[arg(short, long, value_parser = parse_image_format)]
    pub format: Option<ImageFormat>,
}

impl RenderArgs {
    fn start_offset(&self, total_len: usize) -> usize {
        match (self.offset, self.position) {
            (Some(offset), _) => offset,
            (None, Some(position)) => viewport::scroll_offset(total_len, position, self.range_max),
            (None, None) => 0,
        }
    }
}

/// Execute the render command
pub fn execute(args: RenderArgs, config: &Config) -> Result<()> {
    let output = render(&args, config)?;
    println!("{}", output.display());
    Ok(())
}

/// Decode and save; returns the path written
pub(crate) fn render(args: &RenderArgs, config: &Config) -> Result<PathBuf> {
    let data = load_source(&args.input)?;
    let offset = args.start_offset(data.len());
    let view = args.view.resolve(&config.render, data.len(), offset)?;

    tracing::debug!(
        "Rendering {} at offset {:#x}: {}x{} {}",
        args.input.display(),
        offset,
        view.width,
        view.height,
        view.encoding
    );

    let mut raster = Raster::new(view.width, view.height);
    let stats = decode(&data, &mut raster, offset, view.encoding);

    if stats.pixels_written == 0 {
        tracing::warn!(
            "Nothing to draw: offset {:#x} leaves no full {} unit in {} bytes",
            offset,
            view.encoding,
            data.len()
        );
    } else {
        tracing::info!(
            "Decoded {} pixels from {} bytes ({:#x}..{:#x})",
            stats.pixels_written,
            stats.bytes_consumed,
            offset,
            offset + stats.bytes_consumed
        );
    }

    let format = match (args.format, args.output.as_deref()) {
        (Some(format), _) => format,
        (None, Some(path)) if path.extension().is_some() => ImageFormat::from_path(path)
            .with_context(|| {
                format!(
                    "Cannot tell the image format of {}; pass --format png, jpeg or bmp",
                    path.display()
                )
            })?,
        _ => config.export.format,
    };

    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_output_dir(config).join(export::output_filename(
            &source_name(&args.input),
            offset,
            view.encoding,
            format.extension(),
        )),
    };

    export::save_raster(
        &raster,
        &output,
        format,
        config.export.clamped_jpeg_quality(),
    )
    .with_context(|| format!("Failed to export {}", output.display()))?;

    Ok(output)
}

/// Configured output directory, or the current directory
pub(crate) fn default_output_dir(config: &Config) -> &Path {
    config
        .export
        .output_dir
        .as_deref()
        .unwrap_or_else(|| Path::new("."))
}
