use idf_artifact_flash::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

/// Mock CiArtifactProvider serving canned runs, artifacts and archives
///
/// Clones share their call records, so a test can keep one handle while the
/// use case owns another.
#[derive(Default, Clone)]
pub struct MockCiProvider {
    runs: Vec<WorkflowRun>,
    artifacts: HashMap<RunId, Vec<ArtifactDescriptor>>,
    archives: HashMap<String, Vec<u8>>,
    pub repositories: Arc<Mutex<Vec<RepositoryReference>>>,
    pub inspected_runs: Arc<Mutex<Vec<RunId>>>,
    pub downloads: Arc<Mutex<Vec<String>>>,
}

impl MockCiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_run(mut self, run: WorkflowRun) -> Self {
        self.runs.push(run);
        self
    }

    /// Attaches an artifact and the archive bytes served for it
    pub fn with_artifact(mut self, run_id: RunId, artifact: ArtifactDescriptor, archive: Vec<u8>) -> Self {
        self.archives
            .insert(artifact.download_handle.as_str().to_string(), archive);
        self.artifacts.entry(run_id).or_default().push(artifact);
        self
    }

    pub fn inspected_runs(&self) -> Vec<RunId> {
        self.inspected_runs.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.repositories.lock().unwrap().len()
            + self.inspected_runs.lock().unwrap().len()
            + self.downloads.lock().unwrap().len()
    }
}

impl CiArtifactProvider for MockCiProvider {
    fn list_successful_runs(
        &self,
        repository: &RepositoryReference,
        limit: usize,
    ) -> Result<Vec<WorkflowRun>> {
        self.repositories.lock().unwrap().push(repository.clone());
        Ok(self.runs.iter().take(limit).cloned().collect())
    }

    fn list_run_artifacts(
        &self,
        _repository: &RepositoryReference,
        run_id: RunId,
    ) -> Result<Vec<ArtifactDescriptor>> {
        self.inspected_runs.lock().unwrap().push(run_id);
        Ok(self.artifacts.get(&run_id).cloned().unwrap_or_default())
    }

    fn open_archive(&self, handle: &DownloadHandle) -> Result<ArchiveStream> {
        self.downloads.lock().unwrap().push(handle.as_str().to_string());
        let bytes = self
            .archives
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| FlashToolError::Fetch {
                url: handle.as_str().to_string(),
                details: "HTTP 404 Not Found".to_string(),
                hint: "No archive registered in the mock".to_string(),
            })?;
        let length = bytes.len() as u64;
        Ok(ArchiveStream::new(Box::new(Cursor::new(bytes)), Some(length)))
    }
}
