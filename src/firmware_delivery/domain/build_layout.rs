use std::path::{Path, PathBuf};

pub const BOOTLOADER_FILE: &str = "bootloader.bin";
pub const BOOTLOADER_DIR: &str = "bootloader";
pub const PARTITION_TABLE_FILE: &str = "partition-table.bin";
pub const PARTITION_TABLE_DIR: &str = "partition_table";

/// Flash configuration files emitted by an ESP-IDF build
pub const FLASH_ARGS_FILE: &str = "flash_args";
pub const FLASHER_ARGS_JSON_FILE: &str = "flasher_args.json";
pub const PROJECT_DESCRIPTION_FILE: &str = "project_description.json";
pub const FLASH_CONFIG_FILES: [&str; 3] = [
    FLASH_ARGS_FILE,
    FLASHER_ARGS_JSON_FILE,
    PROJECT_DESCRIPTION_FILE,
];

/// Reserved free-form info file carried alongside the binaries
pub const INFO_FILE: &str = "flash_info.txt";

/// Name of the reconstructed directory inside an extracted artifact
pub const BUILD_DIR_NAME: &str = "build";

/// Returns true for a root-level `.bin` that is neither the bootloader nor
/// the partition table image
pub fn is_main_binary_name(file_name: &str) -> bool {
    file_name.ends_with(".bin")
        && file_name != BOOTLOADER_FILE
        && file_name != PARTITION_TABLE_FILE
}

/// BuildLayout describes the canonical directory shape `idf.py flash` expects
///
/// ```text
/// <root>/
///   bootloader/bootloader.bin
///   partition_table/partition-table.bin
///   <app>.bin
///   flash_args | flasher_args.json | project_description.json | flash_info.txt
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    root: PathBuf,
}

impl BuildLayout {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Layout for an artifact downloaded into `output_dir`:
    /// `<output_dir>/<artifact_name>/build`
    pub fn for_artifact(output_dir: &Path, artifact_name: &str) -> Self {
        Self::new(Self::extraction_dir(output_dir, artifact_name).join(BUILD_DIR_NAME))
    }

    /// Directory the flat archive contents are extracted into
    pub fn extraction_dir(output_dir: &Path, artifact_name: &str) -> PathBuf {
        output_dir.join(artifact_name)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bootloader_relative() -> PathBuf {
        Path::new(BOOTLOADER_DIR).join(BOOTLOADER_FILE)
    }

    pub fn partition_table_relative() -> PathBuf {
        Path::new(PARTITION_TABLE_DIR).join(PARTITION_TABLE_FILE)
    }

    pub fn bootloader_path(&self) -> PathBuf {
        self.root.join(Self::bootloader_relative())
    }

    pub fn partition_table_path(&self) -> PathBuf {
        self.root.join(Self::partition_table_relative())
    }
}
