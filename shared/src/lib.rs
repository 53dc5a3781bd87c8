//! Shared host services for Binview tools.
//!
//! The raster core (`binview-raster`) knows nothing about files or images.
//! This crate supplies the pieces around it:
//!
//! - [`config`] - `config.toml` defaults for width, encoding and export
//! - [`source`] - reading files into memory
//! - [`export`] - PNG/JPEG/BMP output and animated GIF sweeps

pub mod config;
pub mod export;
pub mod source;

pub use config::{Config, ConfigError};
pub use export::{ExportError, ImageFormat};
pub use source::{SourceError, load_source};

// Re-export the core so tools only need one dependency
pub use binview_raster as raster;
