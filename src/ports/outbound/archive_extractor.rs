use crate::shared::Result;
use std::path::Path;

/// ArchiveExtractor port for unpacking a downloaded artifact archive
pub trait ArchiveExtractor {
    /// Unpacks every entry of `archive` into `destination`
    ///
    /// Any existing directory at `destination` is removed first; the result
    /// never merges with earlier contents.
    ///
    /// # Errors
    /// Returns `FlashToolError::CorruptArchive` if the archive cannot be read
    /// and `FlashToolError::SecurityError` for entries that would land
    /// outside `destination`.
    fn extract(&self, archive: &Path, destination: &Path) -> Result<()>;
}
