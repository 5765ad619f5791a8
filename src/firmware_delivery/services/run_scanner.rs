use crate::firmware_delivery::domain::{ArtifactDescriptor, RepositoryReference, WorkflowRun};
use crate::ports::outbound::{CiArtifactProvider, ProgressReporter};
use crate::shared::error::FlashToolError;
use crate::shared::Result;

/// Default number of recent runs inspected
pub const DEFAULT_SCAN_DEPTH: usize = 10;

/// Largest page the GitHub API returns in one request
pub const MAX_SCAN_DEPTH: usize = 100;

/// The run and artifact a scan settled on
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub run: WorkflowRun,
    pub artifact: ArtifactDescriptor,
    /// Number of runs whose artifact list was requested
    pub runs_inspected: usize,
}

/// RunScanner - first-match search for a named artifact over recent runs
///
/// Runs are inspected newest first and the scan stops at the first run that
/// carries an artifact with exactly the requested name. Runs older than the
/// scan depth are never looked at.
pub struct RunScanner<'a, P, R> {
    provider: &'a P,
    progress_reporter: &'a R,
    scan_depth: usize,
}

impl<'a, P, R> RunScanner<'a, P, R>
where
    P: CiArtifactProvider,
    R: ProgressReporter,
{
    /// Creates a scanner; `scan_depth` is clamped to `1..=MAX_SCAN_DEPTH`
    pub fn new(provider: &'a P, progress_reporter: &'a R, scan_depth: usize) -> Self {
        Self {
            provider,
            progress_reporter,
            scan_depth: scan_depth.clamp(1, MAX_SCAN_DEPTH),
        }
    }

    pub fn scan_depth(&self) -> usize {
        self.scan_depth
    }

    /// Finds the most recent successful run that produced `artifact_name`
    ///
    /// # Errors
    /// - `FlashToolError::NoRuns` if the provider returns no runs
    /// - `FlashToolError::ArtifactNotFound` if no inspected run has the artifact
    /// - provider errors (authentication, fetch) are propagated unchanged
    pub fn find_artifact(
        &self,
        repository: &RepositoryReference,
        artifact_name: &str,
    ) -> Result<ScanOutcome> {
        self.progress_reporter
            .report(&format!("🔍 Fetching workflow runs for {}...", repository));

        let mut runs = self
            .provider
            .list_successful_runs(repository, self.scan_depth)?;

        if runs.is_empty() {
            return Err(FlashToolError::NoRuns {
                repository: repository.to_string(),
            }
            .into());
        }

        // Stable sort: provider order is kept for equal timestamps.
        runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        runs.truncate(self.scan_depth);

        let mut runs_inspected = 0;
        for run in runs {
            runs_inspected += 1;
            self.progress_reporter.report(&format!(
                "   Checking run {} from {}...",
                run.id,
                run.created_date()
            ));

            let artifacts = self.provider.list_run_artifacts(repository, run.id)?;
            log::debug!("run {} has {} artifact(s)", run.id, artifacts.len());

            let Some(artifact) = artifacts.into_iter().find(|a| a.name == artifact_name) else {
                continue;
            };

            if artifact.expired {
                self.progress_reporter.report_warning(&format!(
                    "⚠️  Warning: Artifact '{}' in run {} has expired, checking older runs",
                    artifact_name, run.id
                ));
                continue;
            }

            self.progress_reporter.report(&format!(
                "✅ Found artifact '{}' in run {}",
                artifact_name, run.id
            ));
            return Ok(ScanOutcome {
                run,
                artifact,
                runs_inspected,
            });
        }

        Err(FlashToolError::ArtifactNotFound {
            artifact: artifact_name.to_string(),
            repository: repository.to_string(),
            runs_checked: runs_inspected,
        }
        .into())
    }
}
