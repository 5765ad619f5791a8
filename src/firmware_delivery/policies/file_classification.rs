use crate::firmware_delivery::domain::build_layout::{
    is_main_binary_name, BOOTLOADER_DIR, BOOTLOADER_FILE, FLASH_CONFIG_FILES, INFO_FILE,
    PARTITION_TABLE_DIR, PARTITION_TABLE_FILE,
};
use std::path::{Path, PathBuf};

/// Kind of file found in a flat artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Bootloader,
    PartitionTable,
    MainBinary,
    FlashConfig,
    InfoFile,
    Unknown,
}

impl FileCategory {
    /// Unknown files are still copied, but the caller should warn about them
    pub fn is_recognized(&self) -> bool {
        !matches!(self, FileCategory::Unknown)
    }
}

/// Where a flat file goes inside the build layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub category: FileCategory,
    /// Destination relative to the layout root
    pub destination: PathBuf,
}

/// A single (predicate, destination) pair
pub struct ClassificationRule {
    pub category: FileCategory,
    matches: fn(&str) -> bool,
    destination: fn(&str) -> PathBuf,
}

impl ClassificationRule {
    pub fn matches(&self, file_name: &str) -> bool {
        (self.matches)(file_name)
    }

    pub fn destination(&self, file_name: &str) -> PathBuf {
        (self.destination)(file_name)
    }
}

fn at_root(file_name: &str) -> PathBuf {
    PathBuf::from(file_name)
}

/// Ordered rule list; the first matching rule wins and the last one
/// matches everything.
static RULES: [ClassificationRule; 5] = [
    ClassificationRule {
        category: FileCategory::Bootloader,
        matches: |name| name == BOOTLOADER_FILE,
        destination: |name| Path::new(BOOTLOADER_DIR).join(name),
    },
    ClassificationRule {
        category: FileCategory::PartitionTable,
        matches: |name| name == PARTITION_TABLE_FILE,
        destination: |name| Path::new(PARTITION_TABLE_DIR).join(name),
    },
    ClassificationRule {
        category: FileCategory::MainBinary,
        matches: is_main_binary_name,
        destination: at_root,
    },
    ClassificationRule {
        category: FileCategory::FlashConfig,
        matches: |name| FLASH_CONFIG_FILES.contains(&name),
        destination: at_root,
    },
    ClassificationRule {
        category: FileCategory::InfoFile,
        matches: |name| name == INFO_FILE,
        destination: at_root,
    },
];

static FALLBACK: ClassificationRule = ClassificationRule {
    category: FileCategory::Unknown,
    matches: |_| true,
    destination: at_root,
};

/// FileClassification policy mapping artifact file names to layout positions
///
/// Classification looks at the file name only, never at file contents.
pub struct FileClassification;

impl FileClassification {
    /// The ordered rules followed by the catch-all fallback
    pub fn rules() -> impl Iterator<Item = &'static ClassificationRule> {
        RULES.iter().chain(std::iter::once(&FALLBACK))
    }

    pub fn classify(file_name: &str) -> Placement {
        let rule = Self::rules()
            .find(|rule| rule.matches(file_name))
            .unwrap_or(&FALLBACK);

        Placement {
            category: rule.category,
            destination: rule.destination(file_name),
        }
    }
}
