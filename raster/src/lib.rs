//! Binview raster core: interpret arbitrary bytes as raw pixel data
//!
//! This crate turns a window of an unknown binary blob into an RGBA8 raster so
//! embedded bitmaps, palettes and structured regions become visible. It is a
//! **pure decoder** - no file I/O, no container parsing, no scaling. Loading
//! files and writing images is handled by the caller (binview-shared).
//!
//! # Encodings
//!
//! | Encoding | Bytes per unit | Pixels per unit | Mapping |
//! |----------|----------------|-----------------|---------|
//! | `rgb24` | 3 | 1 | R, G, B, alpha forced to 255 |
//! | `rgb32` | 4 | 1 | R, G, B, fourth byte skipped, alpha 255 |
//! | `rgba32` | 4 | 1 | R, G, B, A verbatim |
//! | `grey8` | 1 | 1 | R = G = B = byte |
//! | `ega4` | 1 | 2 | low nibble then high nibble, indexed into [`EGA_PALETTE`] |
//! | `mono1` | 1 | 8 | bit 7 first, set = white |
//! | `mono1inv` | 1 | 8 | bit 7 first, set = black |
//!
//! # Truncation
//!
//! A unit is only decoded when all of its source bytes are present *and* its
//! whole pixel group fits in the raster. Anything past that point is left
//! untouched, so a short source never fails - it just draws less.
//!
//! # Usage
//!
//! ```
//! use binview_raster::{decode, PixelEncoding, Raster};
//!
//! let data = [10u8, 20, 30];
//! let mut raster = Raster::new(1, 1);
//! let stats = decode(&data[..], &mut raster, 0, PixelEncoding::Rgb24);
//!
//! assert_eq!(stats.pixels_written, 1);
//! assert_eq!(raster.pixel(0, 0), Some([10, 20, 30, 255]));
//! ```

mod decode;
mod encoding;
mod raster;
mod scalar;
mod source;
pub mod viewport;

pub use decode::{DecodeStats, decode, decode_into};
pub use encoding::{EGA_PALETTE, PixelEncoding, UnknownEncoding, ega_rgb};
pub use raster::Raster;
pub use scalar::{Endian, ScalarReader};
pub use source::ByteSource;

/// Bytes per output pixel (R, G, B, A)
pub const BYTES_PER_PIXEL: usize = 4;

/// Alpha value written by every encoding except `rgba32`
pub const OPAQUE: u8 = 0xFF;

/// Largest raster hosts should allocate: 64 Mi pixels, 256 MiB of RGBA.
///
/// [`Raster::new`] allocates eagerly, so callers taking dimensions from user
/// input check against this before building one.
pub const MAX_RASTER_PIXELS: u64 = 1 << 26;
