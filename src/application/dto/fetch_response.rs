use crate::firmware_delivery::domain::{ArtifactDescriptor, BuildLayout, WorkflowRun};
use std::path::PathBuf;

/// FetchArtifactResponse - result of a successful acquisition
///
/// `layout` has passed structure validation when this value exists.
#[derive(Debug, Clone)]
pub struct FetchArtifactResponse {
    pub run: WorkflowRun,
    pub artifact: ArtifactDescriptor,
    pub runs_inspected: usize,
    /// Directory holding the flat extracted files
    pub extraction_dir: PathBuf,
    pub layout: BuildLayout,
    pub bytes_downloaded: u64,
    /// Non-fatal findings from scanning, reconstruction and validation
    pub warnings: Vec<String>,
}

impl FetchArtifactResponse {
    pub fn build_path(&self) -> &std::path::Path {
        self.layout.root()
    }
}
