use crate::firmware_delivery::services::DEFAULT_SCAN_DEPTH;
use crate::shared::error::FlashToolError;
use crate::shared::Result;
use std::path::PathBuf;

/// Default directory artifacts are downloaded into
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

/// FetchArtifactRequest - input for the artifact acquisition pipeline
///
/// The repository is kept as the raw user string; it is resolved by the use
/// case so that an invalid reference fails before any network access.
#[derive(Debug, Clone)]
pub struct FetchArtifactRequest {
    pub repository: String,
    pub artifact_name: String,
    pub output_dir: PathBuf,
    pub scan_depth: usize,
}

impl FetchArtifactRequest {
    pub fn new(repository: impl Into<String>, artifact_name: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            artifact_name: artifact_name.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            scan_depth: DEFAULT_SCAN_DEPTH,
        }
    }

    pub fn builder() -> FetchArtifactRequestBuilder {
        FetchArtifactRequestBuilder::default()
    }
}

/// Builder for [`FetchArtifactRequest`]
#[derive(Debug, Default)]
pub struct FetchArtifactRequestBuilder {
    repository: Option<String>,
    artifact_name: Option<String>,
    output_dir: Option<PathBuf>,
    scan_depth: Option<usize>,
}

impl FetchArtifactRequestBuilder {
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    pub fn artifact_name(mut self, artifact_name: impl Into<String>) -> Self {
        self.artifact_name = Some(artifact_name.into());
        self
    }

    pub fn output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn scan_depth(mut self, scan_depth: usize) -> Self {
        self.scan_depth = Some(scan_depth);
        self
    }

    /// Builds the request
    ///
    /// # Errors
    /// Returns `FlashToolError::Validation` if the repository or artifact
    /// name is missing or blank
    pub fn build(self) -> Result<FetchArtifactRequest> {
        let repository = required(self.repository, "repository")?;
        let artifact_name = required(self.artifact_name, "artifact name")?;

        let mut request = FetchArtifactRequest::new(repository, artifact_name);
        if let Some(output_dir) = self.output_dir {
            request.output_dir = output_dir;
        }
        if let Some(scan_depth) = self.scan_depth {
            request.scan_depth = scan_depth;
        }
        Ok(request)
    }
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(FlashToolError::Validation {
            message: format!("{} is required", field),
        }
        .into()),
    }
}
