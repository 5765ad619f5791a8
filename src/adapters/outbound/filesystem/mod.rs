/// Filesystem adapters for archive handling
mod zip_extractor;

pub use zip_extractor::ZipArchiveExtractor;
