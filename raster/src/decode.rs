//! Byte-to-raster decoder
//!
//! Walks the source forward one unit at a time. A unit is decoded only when
//! all of its source bytes are present and its whole pixel group fits in the
//! raster; the first unit that fails either check ends the pass.

use crate::{BYTES_PER_PIXEL, ByteSource, OPAQUE, PixelEncoding, Raster, ega_rgb};

const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, OPAQUE];
const BLACK: [u8; 4] = [0x00, 0x00, 0x00, OPAQUE];

/// What a decode pass actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStats {
    /// Pixels written, counted from the start of the raster
    pub pixels_written: usize,
    /// Source bytes consumed, counted from the start offset
    pub bytes_consumed: usize,
}

/// Decode `source` into `raster` starting at `start_offset`.
///
/// Width and height come from the raster. Pixels past the point where the
/// source runs out keep their previous value.
pub fn decode<S: ByteSource + ?Sized>(
    source: &S,
    raster: &mut Raster,
    start_offset: usize,
    encoding: PixelEncoding,
) -> DecodeStats {
    let (width, height) = (raster.width(), raster.height());
    decode_into(
        source,
        raster.as_rgba_mut(),
        width,
        height,
        start_offset,
        encoding,
    )
}

/// Decode into a raw RGBA8 buffer of `width × height` pixels.
///
/// `pixels` should be exactly `width × height × 4` bytes. If it is shorter
/// only the pixels it can hold are written.
pub fn decode_into<S: ByteSource + ?Sized>(
    source: &S,
    pixels: &mut [u8],
    width: u32,
    height: u32,
    start_offset: usize,
    encoding: PixelEncoding,
) -> DecodeStats {
    let capacity = (width as usize)
        .saturating_mul(height as usize)
        .min(pixels.len() / BYTES_PER_PIXEL);
    let src_len = source.len();
    let unit_bytes = encoding.bytes_per_unit();
    let group = encoding.pixels_per_unit();

    let mut src_pos = start_offset;
    let mut dst_pos = 0;

    while dst_pos + group <= capacity && src_pos < src_len && src_len - src_pos >= unit_bytes {
        let start = dst_pos * BYTES_PER_PIXEL;
        let out = &mut pixels[start..start + group * BYTES_PER_PIXEL];
        write_unit(source, src_pos, encoding, out);

        src_pos += unit_bytes;
        dst_pos += group;
    }

    DecodeStats {
        pixels_written: dst_pos,
        bytes_consumed: src_pos.saturating_sub(start_offset),
    }
}

/// Decode the unit at `pos` into `out` (exactly one pixel group).
#[inline]
fn write_unit<S: ByteSource + ?Sized>(
    source: &S,
    pos: usize,
    encoding: PixelEncoding,
    out: &mut [u8],
) {
    match encoding {
        PixelEncoding::Rgb24 | PixelEncoding::Rgb32 => {
            out.copy_from_slice(&[
                source.byte_at(pos),
                source.byte_at(pos + 1),
                source.byte_at(pos + 2),
                OPAQUE,
            ]);
        }
        PixelEncoding::Rgba32 => {
            out.copy_from_slice(&[
                source.byte_at(pos),
                source.byte_at(pos + 1),
                source.byte_at(pos + 2),
                source.byte_at(pos + 3),
            ]);
        }
        PixelEncoding::Grey8 => {
            let luma = source.byte_at(pos);
            out.copy_from_slice(&[luma, luma, luma, OPAQUE]);
        }
        PixelEncoding::Ega4 => {
            let byte = source.byte_at(pos);
            let [r0, g0, b0] = ega_rgb(byte & 0x0F);
            let [r1, g1, b1] = ega_rgb(byte >> 4);
            out.copy_from_slice(&[r0, g0, b0, OPAQUE, r1, g1, b1, OPAQUE]);
        }
        PixelEncoding::Mono1 | PixelEncoding::Mono1Inv => {
            let byte = source.byte_at(pos);
            let inverted = encoding == PixelEncoding::Mono1Inv;
            for (bit, px) in out.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let set = byte & (0x80 >> bit) != 0;
                px.copy_from_slice(if set != inverted { &WHITE } else { &BLACK });
            }
        }
    }
}
