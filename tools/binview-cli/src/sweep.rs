//! Sweep command - decode rasters at increasing offsets into an animated GIF
//!
//! The command-line stand-in for dragging the offset slider: every frame is
//! the same raster geometry shifted `step` bytes further into the file.

use anyhow::{Context, Result};
use binview_raster::{MAX_RASTER_PIXELS, Raster, decode, viewport};
use binview_shared::config::Config;
use binview_shared::export;
use binview_shared::source::{load_source, source_name};
use clap::Args;
use rayon::prelude::*;
use std::path::PathBuf;

use crate::args::{ViewArgs, parse_offset};
use crate::render::default_output_dir;

/// Arguments for the sweep command
#[derive(Args)]
pub struct SweepArgs {
    /// File to visualize
    pub input: PathBuf,

    /// Output GIF (default: <name>_sweep_<timestamp>.gif)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub view: ViewArgs,

    /// First frame offset in bytes (decimal or 0x hex)
    #[arg(long, value_parser = parse_offset, default_value = "0")]
    pub start: usize,

    /// Bytes between frames (default from config, else one full raster)
    #[arg(long, value_parser = parse_offset)]
    pub step: Option<usize>,

    /// Number of frames (default from config, 16)
    #[arg(long)]
    pub frames: Option<u32>,

    /// Delay between frames in milliseconds (default from config, 100)
    #[arg(long)]
    pub delay: Option<u32>,
}

/// Offsets for each frame, stopping at the end of the source
fn frame_offsets(start: usize, step: usize, frames: u32, total_len: usize) -> Vec<usize> {
    (0..frames as usize)
        .map_while(|i| start.checked_add(i.checked_mul(step)?))
        .take_while(|&offset| offset < total_len)
        .collect()
}

/// Execute the sweep command
pub fn execute(args: SweepArgs, config: &Config) -> Result<()> {
    let output = sweep(&args, config)?;
    println!("{}", output.display());
    Ok(())
}

pub(crate) fn sweep(args: &SweepArgs, config: &Config) -> Result<PathBuf> {
    let data = load_source(&args.input)?;
    let view = args.view.resolve(&config.render, data.len(), args.start)?;

    let step = args
        .step
        .or(config.sweep.step)
        .unwrap_or_else(|| viewport::bytes_per_raster(view.width, view.height, view.encoding));
    anyhow::ensure!(step > 0, "Sweep step must be at least 1 byte");

    let frames = args.frames.unwrap_or(config.sweep.frames);
    anyhow::ensure!(frames > 0, "Sweep needs at least one frame");

    let offsets = frame_offsets(args.start, step, frames, data.len());
    if offsets.is_empty() {
        anyhow::bail!(
            "Start offset {:#x} is past the end of {} ({} bytes)",
            args.start,
            args.input.display(),
            data.len()
        );
    }
    // Every frame is held until the GIF is written
    let total_pixels =
        u64::from(view.width) * u64::from(view.height) * offsets.len() as u64;
    anyhow::ensure!(
        total_pixels <= MAX_RASTER_PIXELS,
        "{} frames of {}x{} need {} pixels, more than the {} limit",
        offsets.len(),
        view.width,
        view.height,
        total_pixels,
        MAX_RASTER_PIXELS
    );
    if offsets.len() < frames as usize {
        tracing::info!(
            "End of file reached after {} of {} frames",
            offsets.len(),
            frames
        );
    }

    tracing::debug!(
        "Sweeping {} frames of {}x{} {} from {:#x}, step {:#x}",
        offsets.len(),
        view.width,
        view.height,
        view.encoding,
        args.start,
        step
    );

    // Frames are independent; each owns its raster and borrows the source
    let rasters: Vec<Raster> = offsets
        .par_iter()
        .map(|&offset| {
            let mut raster = Raster::new(view.width, view.height);
            decode(&data, &mut raster, offset, view.encoding);
            raster
        })
        .collect();

    let output = match &args.output {
        Some(path) => path.clone(),
        None => default_output_dir(config).join(export::timestamped_filename(
            &source_name(&args.input),
            "sweep",
            "gif",
        )),
    };

    let delay = args.delay.unwrap_or(config.sweep.frame_delay_ms);
    export::save_sweep_gif(&rasters, &output, delay)
        .with_context(|| format!("Failed to write sweep {}", output.display()))?;

    Ok(output)
}
