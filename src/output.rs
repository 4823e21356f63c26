//! Output module for emitting the rendered document.
//!
//! The document is written in one piece, either to a file or to standard
//! output, so a failed run never leaves half a reference behind.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Writes string content to `writer` and flushes it.
pub fn write_to<W: Write>(content: &str, mut writer: W) -> Result<()> {
    writer
        .write_all(content.as_bytes())
        .context("Failed to write output")?;
    writer.flush().context("Failed to flush output")?;
    Ok(())
}

/// Writes to `path` when given, otherwise to standard output.
pub fn emit(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => write_to_file(content, path),
        None => {
            debug!("Writing {} bytes to stdout", content.len());
            write_to(content, std::io::stdout().lock())
        }
    }
}
