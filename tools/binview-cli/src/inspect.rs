//! Inspect command - show the bytes at an offset as scalars and text

use anyhow::Result;
use binview_raster::{ByteSource, Endian, ScalarReader};
use binview_shared::source::load_source;
use clap::Args;
use std::path::PathBuf;

use crate::args::parse_offset;

/// Arguments for the inspect command
#[derive(Args)]
pub struct InspectArgs {
    /// File to inspect
    pub input: PathBuf,

    /// Byte offset (decimal or 0x hex)
    #[arg(long, value_parser = parse_offset, default_value = "0")]
    pub offset: usize,

    /// Bytes to show in the hex and text rows
    #[arg(long, default_value_t = 16)]
    pub count: usize,
}

/// Execute the inspect command
pub fn execute(args: InspectArgs) -> Result<()> {
    let data = load_source(&args.input)?;
    if args.offset >= data.len() {
        anyhow::bail!(
            "Offset {:#x} is past the end of {} ({} bytes)",
            args.offset,
            args.input.display(),
            data.len()
        );
    }
    print!("{}", report(&data, args.offset, args.count));
    Ok(())
}

fn show<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Text rendering with non-printable bytes shown as '.'
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '.' })
        .collect()
}

/// Build the inspection table for `offset`
fn report<S: ByteSource + ?Sized>(source: &S, offset: usize, count: usize) -> String {
    let count = count.min(source.len().saturating_sub(offset));
    let bytes: Vec<u8> = (offset..offset + count).map(|i| source.byte_at(i)).collect();
    let text = source.read_ascii(offset, count).unwrap_or_default();

    let mut out = format!("offset  {offset:#010x} ({offset})\n");
    out.push_str(&format!("hex     {}\n", hex::encode(&bytes)));
    out.push_str(&format!("text    {}\n", printable(&text)));
    out.push_str(&format!(
        "u8      {:<12} i8 {}\n",
        show(source.read_u8(offset)),
        show(source.read_u8(offset).map(|v| v as i8))
    ));
    for endian in [Endian::Little, Endian::Big] {
        let e = endian.name();
        out.push_str(&format!(
            "u16{e}  {:<12} i16{e} {}\n",
            show(source.read_u16(offset, endian)),
            show(source.read_i16(offset, endian))
        ));
        out.push_str(&format!(
            "u32{e}  {:<12} i32{e} {}\n",
            show(source.read_u32(offset, endian)),
            show(source.read_i32(offset, endian))
        ));
        out.push_str(&format!(
            "f32{e}  {:<12} f64{e} {}\n",
            show(source.read_f32(offset, endian)),
            show(source.read_f64(offset, endian))
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_lines() {
        let data = b"BM\x36\x00\x00\x00";
        let text = report(&data[..], 0, 16);

        assert!(text.contains("hex     424d36000000"));
        assert!(text.contains("text    BM6..."));
        assert!(text.contains("u16le  19778"));
        assert!(text.contains("u16be  16973"));
        assert!(text.contains("u32le  3558722"));
    }

    #[test]
    fn test_report_near_end_marks_missing_values() {
        let data = [0xFFu8, 0x01];
        let text = report(&data[..], 1, 16);

        assert!(text.contains("hex     01"));
        assert!(text.contains("u8      1 "));
        // Not enough bytes for anything wider than one byte
        assert!(text.contains("u16le  -"));
        assert!(text.contains("f64be -"));
    }

    #[test]
    fn test_report_has_one_line_per_row() {
        let text = report(&[0u8; 8][..], 0, 8);
        // offset, hex, text, u8, then three rows per byte order
        assert_eq!(text.lines().count(), 10);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_printable() {
        assert_eq!(printable("a b\u{0}\u{e9}~"), "a b..~");
    }
}
