use crate::ports::outbound::ArchiveExtractor;
use crate::shared::error::FlashToolError;
use crate::shared::security::{recreate_directory, validate_regular_file, MAX_ARCHIVE_SIZE};
use crate::shared::Result;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::ZipArchive;

/// Upper bound on the total uncompressed size of one archive (4 GiB)
const MAX_EXTRACTED_SIZE: u64 = 4 * MAX_ARCHIVE_SIZE;

const UNIX_FILE_TYPE_MASK: u32 = 0o170000;
const UNIX_SYMLINK: u32 = 0o120000;

/// ZipArchiveExtractor adapter unpacking GitHub artifact archives
///
/// # Security
/// - Entry names that would escape the destination are rejected
/// - Symbolic link entries are skipped, never materialised
/// - Total uncompressed size is capped
pub struct ZipArchiveExtractor;

impl ZipArchiveExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ZipArchiveExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn corrupt(archive: &Path, details: impl ToString) -> FlashToolError {
    FlashToolError::CorruptArchive {
        path: archive.to_path_buf(),
        details: details.to_string(),
    }
}

impl ArchiveExtractor for ZipArchiveExtractor {
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()> {
        validate_regular_file(archive, "artifact archive")?;
        let file = File::open(archive).map_err(|e| FlashToolError::FileReadError {
            path: archive.to_path_buf(),
            details: e.to_string(),
        })?;

        // Parse before touching the destination so a bad archive leaves it intact
        let mut zip = ZipArchive::new(file).map_err(|e| corrupt(archive, e))?;
        recreate_directory(destination)?;

        let mut extracted_total: u64 = 0;
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| corrupt(archive, e))?;
            let name = entry.name().to_string();

            let Some(relative) = entry.enclosed_name() else {
                return Err(FlashToolError::SecurityError {
                    path: destination.join(&name),
                    reason: format!("Archive entry '{}' escapes the extraction directory", name),
                    hint: "The artifact archive is malformed or malicious; do not flash it"
                        .to_string(),
                }
                .into());
            };

            if entry
                .unix_mode()
                .is_some_and(|mode| mode & UNIX_FILE_TYPE_MASK == UNIX_SYMLINK)
            {
                log::warn!("skipping symbolic link entry '{}'", name);
                continue;
            }

            let target = destination.join(relative);
            if entry.is_dir() {
                fs::create_dir_all(&target).map_err(|e| FlashToolError::FileWriteError {
                    path: target.clone(),
                    details: e.to_string(),
                })?;
                continue;
            }

            extracted_total = extracted_total.saturating_add(entry.size());
            if extracted_total > MAX_EXTRACTED_SIZE {
                return Err(FlashToolError::SecurityError {
                    path: archive.to_path_buf(),
                    reason: format!(
                        "Uncompressed contents exceed {} bytes",
                        MAX_EXTRACTED_SIZE
                    ),
                    hint: "Artifacts this large are not firmware builds; check the artifact name"
                        .to_string(),
                }
                .into());
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| FlashToolError::FileWriteError {
                    path: parent.to_path_buf(),
                    details: e.to_string(),
                })?;
            }
            let mut output = File::create(&target).map_err(|e| FlashToolError::FileWriteError {
                path: target.clone(),
                details: e.to_string(),
            })?;
            // Decompression and checksum failures surface here as read errors
            io::copy(&mut entry, &mut output)
                .map_err(|e| corrupt(archive, format!("entry '{}': {}", name, e)))?;

            log::trace!("extracted {} ({} bytes)", name, entry.size());
        }

        log::debug!(
            "extracted {} entries into {}",
            zip.len(),
            destination.display()
        );
        Ok(())
    }
}
