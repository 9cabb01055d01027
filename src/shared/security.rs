use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum artifact size the scanner is willing to read (100 MB).
/// Larger files are treated as unreadable rather than loaded into memory.
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a regular file as text, replacing invalid UTF-8 sequences.
///
/// Package metadata written by older installers is not always valid UTF-8,
/// so decoding is lossy instead of failing.
///
/// # Errors
/// Returns an error if the path is a symlink, not a regular file,
/// larger than `max_size`, or cannot be read.
pub fn read_text_lossy(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read metadata of {}: {}", path.display(), e))?;

    if metadata.is_symlink() {
        anyhow::bail!("Security: {} is a symbolic link", path.display());
    }
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }
    validate_file_size(metadata.len(), path, max_size)?;

    let bytes =
        fs::read(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
