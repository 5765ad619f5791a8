use crate::firmware_delivery::domain::{BuildLayout, FlatFileSet};
use crate::firmware_delivery::policies::{FileCategory, FileClassification};
use crate::shared::error::FlashToolError;
use crate::shared::security::remove_existing;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A file copied into the layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedFile {
    pub file_name: String,
    pub category: FileCategory,
    /// Destination relative to the layout root
    pub destination: PathBuf,
}

/// Summary of one reconstruction
#[derive(Debug, Clone, Default)]
pub struct ReconstructionReport {
    pub placed: Vec<PlacedFile>,
    pub warnings: Vec<String>,
}

impl ReconstructionReport {
    pub fn placed_count(&self, category: FileCategory) -> usize {
        self.placed
            .iter()
            .filter(|file| file.category == category)
            .count()
    }
}

/// LayoutReconstructor - rebuilds the ESP-IDF directory shape from flat files
///
/// Files are copied into a staging directory next to the layout root, which
/// then replaces the root wholesale. Running twice over the same input
/// produces the same tree, and sources that live under the old root (an
/// archive carrying its own `build/` folder) are read before it is removed.
pub struct LayoutReconstructor;

impl LayoutReconstructor {
    pub fn reconstruct(files: &FlatFileSet, layout: &BuildLayout) -> Result<ReconstructionReport> {
        let root = layout.root();
        let parent = root.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent).map_err(|e| FlashToolError::FileWriteError {
            path: parent.to_path_buf(),
            details: e.to_string(),
        })?;
        let staging = tempfile::Builder::new()
            .prefix(".layout-")
            .tempdir_in(parent)
            .map_err(|e| FlashToolError::FileWriteError {
                path: parent.to_path_buf(),
                details: format!("Failed to create staging directory: {}", e),
            })?;

        let mut report = ReconstructionReport::default();
        for (file_name, source) in files.iter() {
            let placement = FileClassification::classify(file_name);
            let target = staging.path().join(&placement.destination);

            if let Some(target_dir) = target.parent() {
                fs::create_dir_all(target_dir).map_err(|e| FlashToolError::FileWriteError {
                    path: target_dir.to_path_buf(),
                    details: e.to_string(),
                })?;
            }

            fs::copy(source, &target).map_err(|e| FlashToolError::FileWriteError {
                path: root.join(&placement.destination),
                details: format!("Failed to copy {}: {}", source.display(), e),
            })?;

            if !placement.category.is_recognized() {
                report.warnings.push(format!(
                    "Unrecognized file '{}' copied to build root",
                    file_name
                ));
            }
            log::debug!(
                "placed {} -> {}",
                file_name,
                placement.destination.display()
            );

            report.placed.push(PlacedFile {
                file_name: file_name.to_string(),
                category: placement.category,
                destination: placement.destination,
            });
        }

        remove_existing(root)?;
        // The rename takes over the staging directory; only a failed move is cleaned up here
        let staging = staging.keep();
        if let Err(e) = fs::rename(&staging, root) {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                log::warn!("failed to remove {}: {}", staging.display(), cleanup);
            }
            return Err(FlashToolError::FileWriteError {
                path: root.to_path_buf(),
                details: format!("Failed to move rebuilt layout into place: {}", e),
            }
            .into());
        }

        Ok(report)
    }
}
