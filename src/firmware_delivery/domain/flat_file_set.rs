use crate::shared::error::FlashToolError;
use crate::shared::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// FlatFileSet - extracted artifact files keyed by file name only
///
/// Iteration order is sorted by file name, which keeps reconstruction
/// deterministic regardless of archive entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatFileSet {
    files: BTreeMap<String, PathBuf>,
}

/// Result of scanning an extraction directory
#[derive(Debug, Clone, Default)]
pub struct ScannedFiles {
    pub files: FlatFileSet,
    pub warnings: Vec<String>,
}

impl FlatFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file under its file name
    ///
    /// Returns `Some(path)` with the rejected path when a file of the same
    /// name is already present; the first one inserted is kept.
    pub fn insert(&mut self, path: PathBuf) -> Option<PathBuf> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Some(path);
        };
        if self.files.contains_key(file_name) {
            return Some(path);
        }
        self.files.insert(file_name.to_string(), path);
        None
    }

    pub fn get(&self, file_name: &str) -> Option<&Path> {
        self.files.get(file_name).map(PathBuf::as_path)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.files.contains_key(file_name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.files
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    /// Collects every regular file below `dir`, flattening subdirectories
    ///
    /// Symbolic links are skipped. Name collisions keep the file met first
    /// in sorted traversal order and record a warning for the others.
    pub fn scan_directory(dir: &Path) -> Result<ScannedFiles> {
        let mut scanned = ScannedFiles::default();
        collect_files(dir, &mut scanned)?;
        Ok(scanned)
    }
}

fn collect_files(dir: &Path, scanned: &mut ScannedFiles) -> Result<()> {
    let read_error = |e: std::io::Error| FlashToolError::FileReadError {
        path: dir.to_path_buf(),
        details: e.to_string(),
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(read_error)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(read_error)?;

        if file_type.is_symlink() {
            scanned.warnings.push(format!(
                "Skipping symbolic link in artifact: {}",
                path.display()
            ));
        } else if file_type.is_dir() {
            collect_files(&path, scanned)?;
        } else if file_type.is_file() {
            if let Some(rejected) = scanned.files.insert(path) {
                scanned.warnings.push(format!(
                    "Duplicate file name in artifact, ignoring {}",
                    rejected.display()
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_insert_keeps_first_of_duplicate_names() {
        let mut set = FlatFileSet::new();
        assert!(set.insert(PathBuf::from("a/app.bin")).is_none());
        let rejected = set.insert(PathBuf::from("b/app.bin"));
        assert_eq!(rejected, Some(PathBuf::from("b/app.bin")));
        assert_eq!(set.get("app.bin"), Some(Path::new("a/app.bin")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_is_sorted_by_name() {
        let mut set = FlatFileSet::new();
        set.insert(PathBuf::from("x/partition-table.bin"));
        set.insert(PathBuf::from("x/app.bin"));
        set.insert(PathBuf::from("x/bootloader.bin"));
        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["app.bin", "bootloader.bin", "partition-table.bin"]);
    }

    #[test]
    fn test_scan_directory_flattens_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("build/bootloader")).unwrap();
        fs::write(root.join("build/bootloader/bootloader.bin"), b"boot").unwrap();
        fs::write(root.join("app.bin"), b"app").unwrap();

        let scanned = FlatFileSet::scan_directory(root).unwrap();

        assert_eq!(scanned.files.len(), 2);
        assert!(scanned.files.contains("bootloader.bin"));
        assert!(scanned.files.contains("app.bin"));
        assert!(scanned.warnings.is_empty());
    }

    #[test]
    fn test_scan_directory_reports_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("a/app.bin"), b"first").unwrap();
        fs::write(root.join("b/app.bin"), b"second").unwrap();

        let scanned = FlatFileSet::scan_directory(root).unwrap();

        assert_eq!(scanned.files.len(), 1);
        assert_eq!(scanned.files.get("app.bin"), Some(root.join("a/app.bin").as_path()));
        assert_eq!(scanned.warnings.len(), 1);
        assert!(scanned.warnings[0].contains("Duplicate file name"));
    }

    #[test]
    fn test_scan_directory_missing_dir_fails() {
        let result = FlatFileSet::scan_directory(Path::new("/nonexistent/extract/dir"));
        assert!(result.is_err());
    }
}
