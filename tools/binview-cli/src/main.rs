//! Binview CLI - look at binary files as raw pixel data
//!
//! # Commands
//!
//! - `binview render` - Decode one raster from a file and save it as an image
//! - `binview sweep` - Decode rasters at increasing offsets into an animated GIF
//! - `binview inspect` - Show the bytes at an offset as integers, floats and text
//! - `binview formats` - List the supported pixel encodings
//! - `binview config` - Show or initialise config.toml
//!
//! # Usage
//!
//! ```bash
//! # Look at a firmware dump as 1-bit monochrome, 64 pixels wide
//! binview render firmware.bin -w 64 -e mono1
//!
//! # Jump halfway into the file (scrollbar position 500 of 1000)
//! binview render game.dat --position 500 -e ega4 -o half.png
//!
//! # Scan the first 16 screens of a ROM
//! binview sweep rom.bin -w 256 --frames 16
//! ```
//!
//! # Config (config.toml)
//!
//! ```toml
//! [render]
//! width = 256
//! max_height = 1024
//! encoding = "rgb24"
//!
//! [export]
//! format = "png"
//! jpeg_quality = 90
//!
//! [sweep]
//! frames = 16
//! frame_delay_ms = 100
//! ```

mod args;
mod config_cmd;
mod formats;
mod inspect;
mod render;
mod sweep;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Binview CLI - visualize binary files as raw pixel data
#[derive(Parser)]
#[command(name = "binview")]
#[command(about = "Visualize binary files as raw pixel data")]
#[command(version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one raster and save it as an image
    Render(render::RenderArgs),

    /// Decode rasters at increasing offsets into an animated GIF
    Sweep(sweep::SweepArgs),

    /// Show the bytes at an offset as integers, floats and text
    Inspect(inspect::InspectArgs),

    /// List supported pixel encodings
    Formats,

    /// Show or initialise the configuration file
    #[command(subcommand)]
    Config(config_cmd::ConfigCommand),
}

/// Log filter from `RUST_LOG` directives, `info` when unset; `-v` raises the
/// global level to debug.
fn log_filter(verbose: bool, directives: Option<&str>) -> EnvFilter {
    let filter = directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}

fn init_logging(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, directives.as_deref()))
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Render(args) => render::execute(args, &config_cmd::load_config(config_path)?),
        Commands::Sweep(args) => sweep::execute(args, &config_cmd::load_config(config_path)?),
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Formats => {
            formats::execute();
            Ok(())
        }
        Commands::Config(command) => config_cmd::execute(command, config_path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            log_filter(false, Some("debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(false, Some("warn")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            log_filter(true, Some("warn")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        // Empty RUST_LOG behaves like unset
        assert_eq!(log_filter(false, Some("")).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "binview", "render", "dump.bin", "-w", "64", "-e", "mono1", "--offset", "0x100",
        ])
        .unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.view.width, Some(64));
        assert_eq!(args.view.encoding, Some(binview_raster::PixelEncoding::Mono1));
        assert_eq!(args.offset, Some(0x100));
    }

    #[test]
    fn test_offset_and_position_conflict() {
        let result = Cli::try_parse_from([
            "binview", "render", "dump.bin", "--offset", "10", "--position", "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_width_rejected() {
        let result = Cli::try_parse_from(["binview", "render", "dump.bin", "-w", "0"]);
        assert!(result.is_err());
    }
}
