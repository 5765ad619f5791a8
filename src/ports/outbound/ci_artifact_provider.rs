use crate::firmware_delivery::domain::{
    ArtifactDescriptor, DownloadHandle, RepositoryReference, RunId, WorkflowRun,
};
use crate::shared::Result;
use std::io::Read;

/// Readable body of an artifact archive download
pub struct ArchiveStream {
    pub reader: Box<dyn Read>,
    /// Size announced by the server, when known
    pub content_length: Option<u64>,
}

impl ArchiveStream {
    pub fn new(reader: Box<dyn Read>, content_length: Option<u64>) -> Self {
        Self {
            reader,
            content_length,
        }
    }
}

/// CiArtifactProvider port for querying CI run history and artifacts
///
/// This port abstracts the CI system (e.g., GitHub Actions REST API).
/// All calls are blocking and issued one at a time.
pub trait CiArtifactProvider {
    /// Lists the most recent completed, successful runs, most recent first
    ///
    /// # Arguments
    /// * `repository` - Repository to query
    /// * `limit` - Maximum number of runs to return (page size)
    ///
    /// # Errors
    /// Returns `FlashToolError::Authentication` on HTTP 401 and
    /// `FlashToolError::Fetch` on any other transport or status failure
    fn list_successful_runs(
        &self,
        repository: &RepositoryReference,
        limit: usize,
    ) -> Result<Vec<WorkflowRun>>;

    /// Lists the artifacts produced by a single run
    fn list_run_artifacts(
        &self,
        repository: &RepositoryReference,
        run_id: RunId,
    ) -> Result<Vec<ArtifactDescriptor>>;

    /// Opens the archive behind a download handle for streaming
    fn open_archive(&self, handle: &DownloadHandle) -> Result<ArchiveStream>;
}
