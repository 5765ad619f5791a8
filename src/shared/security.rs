use crate::shared::error::FlashToolError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size of a downloaded artifact archive (1 GiB)
pub const MAX_ARCHIVE_SIZE: u64 = 1024 * 1024 * 1024;

/// Maximum size of a JSON metadata file read from a build directory (10 MB)
pub const MAX_METADATA_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// This function uses `symlink_metadata()` instead of `metadata()` to ensure
/// we check the symlink itself, not the target it points to.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "flash") for error messages
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

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

/// Validates a byte count is within acceptable limits
///
/// # Errors
/// Returns a `SecurityError` if the size exceeds the maximum
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        return Err(FlashToolError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} bytes exceeds the maximum allowed size of {} bytes",
                file_size, max_size
            ),
            hint: "Artifacts this large are not firmware builds; check the artifact name"
                .to_string(),
        }
        .into());
    }
    Ok(())
}

/// Removes everything at `dir` and recreates it empty
///
/// Existing contents are deleted before anything new is written so that a
/// rebuild never merges with a previous run. A symbolic link at `dir` is
/// refused instead of followed.
pub fn recreate_directory(dir: &Path) -> Result<()> {
    remove_existing(dir)?;

    fs::create_dir_all(dir).map_err(|e| FlashToolError::FileWriteError {
        path: dir.to_path_buf(),
        details: format!("Failed to create directory: {}", e),
    })?;

    Ok(())
}

/// Deletes the file or directory at `path` if there is one
///
/// A symbolic link at `path` is refused instead of followed.
pub fn remove_existing(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => Err(FlashToolError::SecurityError {
            path: path.to_path_buf(),
            reason: "Destination directory is a symbolic link".to_string(),
            hint: "Choose an output directory that is not a symbolic link".to_string(),
        }
        .into()),
        Ok(metadata) if metadata.is_dir() => fs::remove_dir_all(path).map_err(|e| {
            FlashToolError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to remove existing directory: {}", e),
            }
            .into()
        }),
        Ok(_) => fs::remove_file(path).map_err(|e| {
            FlashToolError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to remove existing file: {}", e),
            }
            .into()
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FlashToolError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()),
    }
}
