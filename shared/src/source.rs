//! Loading files into memory as decode sources.

use std::path::{Path, PathBuf};

/// Maximum file size read into memory.
pub const MAX_SOURCE_BYTES: u64 = 2 * 1024 * 1024 * 1024; // 2 GiB

/// Error type for source loading.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File too large: {path} ({len} bytes, max {max} bytes)")]
    TooLarge { path: PathBuf, len: u64, max: u64 },
}

/// Read a whole file, refusing anything above [`MAX_SOURCE_BYTES`].
///
/// Empty files are fine; they simply decode to nothing.
pub fn load_source(path: &Path) -> Result<Vec<u8>, SourceError> {
    load_source_with_limit(path, MAX_SOURCE_BYTES)
}

/// Read a whole file with a custom size cap.
pub fn load_source_with_limit(path: &Path, max_bytes: u64) -> Result<Vec<u8>, SourceError> {
    let io_err = |source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let len = std::fs::metadata(path).map_err(io_err)?.len();
    if len > max_bytes {
        return Err(SourceError::TooLarge {
            path: path.to_path_buf(),
            len,
            max: max_bytes,
        });
    }

    let data = std::fs::read(path).map_err(io_err)?;
    tracing::debug!("Loaded {} ({} bytes)", path.display(), data.len());
    Ok(data)
}

/// Display name for a source path (file name, falling back to the full path)
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
