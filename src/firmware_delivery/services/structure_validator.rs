use crate::firmware_delivery::domain::build_layout::{
    is_main_binary_name, FLASHER_ARGS_JSON_FILE, FLASH_ARGS_FILE,
};
use crate::firmware_delivery::domain::BuildLayout;
use crate::shared::error::FlashToolError;
use std::fs;
use std::path::PathBuf;

/// Description used for the main binary in the missing list
pub const MAIN_BINARY_REQUIREMENT: &str = "main application binary (*.bin)";

/// Outcome of checking a build directory
///
/// Validation never modifies the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Required items that are absent, relative to the layout root
    pub missing: Vec<String>,
    pub warnings: Vec<String>,
    /// Main application binaries found at the root, sorted by name
    pub main_binaries: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// Converts a failed report into `FlashToolError::IncompleteLayout`
    pub fn into_result(self, layout: &BuildLayout) -> crate::shared::Result<Self> {
        if self.is_valid() {
            return Ok(self);
        }
        Err(FlashToolError::IncompleteLayout {
            root: layout.root().to_path_buf(),
            missing: self.missing,
        }
        .into())
    }
}

/// StructureValidator - checks a build directory is flashable
pub struct StructureValidator;

impl StructureValidator {
    pub fn validate(layout: &BuildLayout) -> ValidationReport {
        let mut report = ValidationReport::default();

        for required in [
            BuildLayout::bootloader_relative(),
            BuildLayout::partition_table_relative(),
        ] {
            if !layout.root().join(&required).is_file() {
                report.missing.push(display_relative(required));
            }
        }

        report.main_binaries = main_binaries(layout);
        if report.main_binaries.is_empty() {
            report.missing.push(MAIN_BINARY_REQUIREMENT.to_string());
        }

        let has_flash_config = [FLASH_ARGS_FILE, FLASHER_ARGS_JSON_FILE]
            .iter()
            .any(|name| layout.root().join(name).is_file());
        if !has_flash_config {
            report.warnings.push(format!(
                "Neither {} nor {} found; idf.py may not know the flash offsets",
                FLASH_ARGS_FILE, FLASHER_ARGS_JSON_FILE
            ));
        }

        if report.main_binaries.len() > 1 {
            report.warnings.push(format!(
                "Multiple application binaries found: {}",
                report.main_binaries.join(", ")
            ));
        }

        report
    }
}

fn display_relative(path: PathBuf) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn main_binaries(layout: &BuildLayout) -> Vec<String> {
    let Ok(entries) = fs::read_dir(layout.root()) else {
        return Vec::new();
    };

    let mut binaries: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| is_main_binary_name(name))
        .collect();
    binaries.sort();
    binaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"\xe9binary").unwrap();
    }

    fn complete_layout(root: &Path) {
        write(root, "bootloader/bootloader.bin");
        write(root, "partition_table/partition-table.bin");
        write(root, "app.bin");
        write(root, "flasher_args.json");
    }

    #[test]
    fn test_complete_layout_is_valid() {
        let dir = TempDir::new().unwrap();
        complete_layout(dir.path());

        let report = StructureValidator::validate(&BuildLayout::new(dir.path().to_path_buf()));

        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
        assert_eq!(report.main_binaries, vec!["app.bin"]);
    }

    #[test]
    fn test_missing_partition_table_is_the_only_item() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bootloader/bootloader.bin");
        write(dir.path(), "app.bin");
        write(dir.path(), "flash_args");

        let report = StructureValidator::validate(&BuildLayout::new(dir.path().to_path_buf()));

        assert!(!report.is_valid());
        assert_eq!(report.missing, vec!["partition_table/partition-table.bin"]);
    }

    #[test]
    fn test_empty_directory_lists_everything() {
        let dir = TempDir::new().unwrap();

        let report = StructureValidator::validate(&BuildLayout::new(dir.path().to_path_buf()));

        assert_eq!(
            report.missing,
            vec![
                "bootloader/bootloader.bin",
                "partition_table/partition-table.bin",
                MAIN_BINARY_REQUIREMENT,
            ]
        );
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_bootloader_at_root_does_not_count() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bootloader.bin");
        write(dir.path(), "partition-table.bin");

        let report = StructureValidator::validate(&BuildLayout::new(dir.path().to_path_buf()));

        assert!(report.main_binaries.is_empty());
        assert_eq!(report.missing.len(), 3);
    }

    #[test]
    fn test_missing_flash_config_is_only_a_warning() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "bootloader/bootloader.bin");
        write(dir.path(), "partition_table/partition-table.bin");
        write(dir.path(), "app.bin");

        let report = StructureValidator::validate(&BuildLayout::new(dir.path().to_path_buf()));

        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("flasher_args.json"));
    }

    #[test]
    fn test_validation_does_not_modify_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app.bin");
        let before: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();

        StructureValidator::validate(&BuildLayout::new(dir.path().to_path_buf()));

        let after: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(before.len(), after.len());
        assert!(!dir.path().join("bootloader").exists());
    }

    #[test]
    fn test_into_result_maps_to_incomplete_layout() {
        let dir = TempDir::new().unwrap();
        let layout = BuildLayout::new(dir.path().to_path_buf());

        let err = StructureValidator::validate(&layout)
            .into_result(&layout)
            .unwrap_err();

        match err.downcast_ref::<FlashToolError>() {
            Some(FlashToolError::IncompleteLayout { missing, .. }) => assert_eq!(missing.len(), 3),
            other => panic!("expected IncompleteLayout, got {:?}", other),
        }
    }
}
