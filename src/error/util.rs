//! Utility functions for error handling
//!
//! File access helpers that turn bare IO failures into errors naming the path.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{DashboardError, Result};

/// Open a file for reading, reporting a missing file as `FileNotFound`
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for the log line)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        log::error!("File needed for {purpose} not found: {}", path.display());
        return Err(DashboardError::FileNotFound(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(DashboardError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Expected a file for {purpose}: {}", path.display()),
        )));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions",
            _ => "Failed to open file",
        };
        DashboardError::Io(io::Error::new(
            e.kind(),
            format!("{context} ({purpose}): {}: {e}", path.display()),
        ))
    })
}

/// Create `dir` and its parents if they do not exist yet
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(DashboardError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists and is not a directory: {}", dir.display()),
        )));
    }
    fs::create_dir_all(dir)?;
    Ok(())
}
