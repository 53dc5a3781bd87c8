//! Pixel encodings and the EGA palette

use core::fmt;
use core::str::FromStr;

/// The 16-colour EGA palette as 0xRRGGBB
pub const EGA_PALETTE: [u32; 16] = [
    0x000000, 0x0000AA, 0x00AA00, 0x00AAAA, // black, blue, green, cyan
    0xAA0000, 0xAA00AA, 0xAA5500, 0xAAAAAA, // red, magenta, brown, light grey
    0x555555, 0x5555FF, 0x55FF55, 0x55FFFF, // dark grey, bright blue, bright green, bright cyan
    0xFF5555, 0xFF55FF, 0xFFFF55, 0xFFFFFF, // bright red, bright magenta, yellow, white
];

/// Split a palette entry into its R, G, B components.
///
/// Only the low 4 bits of `index` are used.
#[inline]
pub fn ega_rgb(index: u8) -> [u8; 3] {
    let rgb = EGA_PALETTE[(index & 0x0F) as usize];
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}

/// How consecutive source bytes map to output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PixelEncoding {
    /// 3 bytes: R, G, B
    #[default]
    Rgb24,
    /// 4 bytes: R, G, B, padding
    Rgb32,
    /// 4 bytes: R, G, B, A
    Rgba32,
    /// 1 byte: luminance
    Grey8,
    /// 1 byte: two 4-bit EGA palette indices, low nibble first
    Ega4,
    /// 1 byte: eight pixels, MSB first, set bit = white
    Mono1,
    /// 1 byte: eight pixels, MSB first, set bit = black
    Mono1Inv,
}

impl PixelEncoding {
    /// Every encoding, in menu order
    pub const ALL: [PixelEncoding; 7] = [
        PixelEncoding::Rgb24,
        PixelEncoding::Rgb32,
        PixelEncoding::Rgba32,
        PixelEncoding::Grey8,
        PixelEncoding::Ega4,
        PixelEncoding::Mono1,
        PixelEncoding::Mono1Inv,
    ];

    /// Source bytes that must be available before a unit is decoded
    pub const fn bytes_per_unit(self) -> usize {
        match self {
            PixelEncoding::Rgb24 => 3,
            PixelEncoding::Rgb32 | PixelEncoding::Rgba32 => 4,
            PixelEncoding::Grey8
            | PixelEncoding::Ega4
            | PixelEncoding::Mono1
            | PixelEncoding::Mono1Inv => 1,
        }
    }

    /// Pixels produced by one unit
    pub const fn pixels_per_unit(self) -> usize {
        match self {
            PixelEncoding::Rgb24
            | PixelEncoding::Rgb32
            | PixelEncoding::Rgba32
            | PixelEncoding::Grey8 => 1,
            PixelEncoding::Ega4 => 2,
            PixelEncoding::Mono1 | PixelEncoding::Mono1Inv => 8,
        }
    }

    /// Stable lowercase name used on the command line and in config files
    pub const fn name(self) -> &'static str {
        match self {
            PixelEncoding::Rgb24 => "rgb24",
            PixelEncoding::Rgb32 => "rgb32",
            PixelEncoding::Rgba32 => "rgba32",
            PixelEncoding::Grey8 => "grey8",
            PixelEncoding::Ega4 => "ega4",
            PixelEncoding::Mono1 => "mono1",
            PixelEncoding::Mono1Inv => "mono1inv",
        }
    }

    /// Short human-readable description
    pub const fn description(self) -> &'static str {
        match self {
            PixelEncoding::Rgb24 => "24-bit RGB",
            PixelEncoding::Rgb32 => "32-bit RGB, fourth byte ignored",
            PixelEncoding::Rgba32 => "32-bit RGBA",
            PixelEncoding::Grey8 => "8-bit greyscale",
            PixelEncoding::Ega4 => "4-bit EGA palette, low nibble first",
            PixelEncoding::Mono1 => "1-bit monochrome, set bit is white",
            PixelEncoding::Mono1Inv => "1-bit monochrome, set bit is black",
        }
    }
}

impl fmt::Display for PixelEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when an encoding name is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncoding(pub String);

impl fmt::Display for UnknownEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pixel encoding '{}' (expected one of: ", self.0)?;
        for (i, encoding) in PixelEncoding::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(encoding.name())?;
        }
        f.write_str(")")
    }
}

impl std::error::Error for UnknownEncoding {}

impl FromStr for PixelEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PixelEncoding::ALL
            .into_iter()
            .find(|encoding| encoding.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownEncoding(s.to_string()))
    }
}
