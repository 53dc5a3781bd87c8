//! Formats command - list supported pixel encodings

use binview_raster::PixelEncoding;

/// Execute the formats command
pub fn execute() {
    print!("{}", table());
}

fn table() -> String {
    let mut out = format!("{:<10} {:>5} {:>7}  {}\n", "ENCODING", "BYTES", "PIXELS", "LAYOUT");
    for encoding in PixelEncoding::ALL {
        out.push_str(&format!(
            "{:<10} {:>5} {:>7}  {}\n",
            encoding.name(),
            encoding.bytes_per_unit(),
            encoding.pixels_per_unit(),
            encoding.description()
        ));
    }
    out
}
