//! Offset and size arithmetic for browsing a source

use crate::PixelEncoding;

/// Map a scrollbar position to a byte offset.
///
/// `position` is in `0..=range_max`; larger values clamp to `range_max`.
/// Position 0 maps to offset 0 and `range_max` maps to `total_len`.
pub fn scroll_offset(total_len: usize, position: u64, range_max: u64) -> usize {
    if range_max == 0 {
        return 0;
    }
    let position = position.min(range_max);
    (total_len as u128 * position as u128 / range_max as u128) as usize
}

/// Rows of `width` pixels the bytes after `start_offset` can fill.
///
/// A partially filled last row counts. Returns 0 when there is nothing to
/// show; saturates at `u32::MAX`.
pub fn rows_available(
    total_len: usize,
    start_offset: usize,
    width: u32,
    encoding: PixelEncoding,
) -> u32 {
    if width == 0 || start_offset >= total_len {
        return 0;
    }
    let units = (total_len - start_offset) / encoding.bytes_per_unit();
    let pixels = units as u128 * encoding.pixels_per_unit() as u128;
    pixels.div_ceil(width as u128).min(u32::MAX as u128) as u32
}

/// Bytes one full `width × height` raster consumes
pub fn bytes_per_raster(width: u32, height: u32, encoding: PixelEncoding) -> usize {
    let cells = width as usize * height as usize;
    cells.div_ceil(encoding.pixels_per_unit()) * encoding.bytes_per_unit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_offset_endpoints() {
        assert_eq!(scroll_offset(1000, 0, 100), 0);
        assert_eq!(scroll_offset(1000, 100, 100), 1000);
        assert_eq!(scroll_offset(1000, 50, 100), 500);
        assert_eq!(scroll_offset(1000, 1, 3), 333);
    }

    #[test]
    fn test_scroll_offset_clamps() {
        assert_eq!(scroll_offset(1000, 500, 100), 1000);
        assert_eq!(scroll_offset(1000, 5, 0), 0);
        assert_eq!(scroll_offset(usize::MAX, u64::MAX, u64::MAX), usize::MAX);
    }

    #[test]
    fn test_rows_available() {
        // 100 bytes of rgb24 = 33 pixels; 10 per row = 4 rows (last partial)
        assert_eq!(rows_available(100, 0, 10, PixelEncoding::Rgb24), 4);
        // 10 bytes of mono1 = 80 pixels; 16 per row = 5 rows
        assert_eq!(rows_available(10, 0, 16, PixelEncoding::Mono1), 5);
        assert_eq!(rows_available(10, 2, 16, PixelEncoding::Mono1), 4);
        assert_eq!(rows_available(10, 10, 16, PixelEncoding::Grey8), 0);
        assert_eq!(rows_available(10, 0, 0, PixelEncoding::Grey8), 0);
        // 2 bytes cannot hold a single rgb24 unit
        assert_eq!(rows_available(2, 0, 4, PixelEncoding::Rgb24), 0);
    }

    #[test]
    fn test_bytes_per_raster() {
        assert_eq!(bytes_per_raster(4, 4, PixelEncoding::Rgb24), 48);
        assert_eq!(bytes_per_raster(4, 4, PixelEncoding::Rgba32), 64);
        assert_eq!(bytes_per_raster(8, 2, PixelEncoding::Mono1), 2);
        assert_eq!(bytes_per_raster(3, 1, PixelEncoding::Ega4), 2);
    }
}
