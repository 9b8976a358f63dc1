// LogExtract - platform/fs.rs
//
// Filesystem access for extract files. The core layer only sees the
// resulting `Read` handle.

use crate::util::error::LogExtractError;
use std::fs::File;
use std::path::Path;

/// Open an extract file for a single filter call.
pub fn open_extract(path: &Path) -> Result<File, LogExtractError> {
    let file = File::open(path).map_err(|source| LogExtractError::Io {
        path: path.to_path_buf(),
        operation: "open extract",
        source,
    })?;
    tracing::debug!(path = %path.display(), "Extract opened");
    Ok(file)
}
