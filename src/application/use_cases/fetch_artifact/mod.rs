use crate::application::dto::{FetchArtifactRequest, FetchArtifactResponse};
use crate::firmware_delivery::domain::{
    ArtifactDescriptor, BuildLayout, FlatFileSet, RepositoryReference,
};
use crate::firmware_delivery::services::{
    LayoutReconstructor, RunScanner, ScanOutcome, StructureValidator,
};
use crate::ports::outbound::{ArchiveExtractor, CiArtifactProvider, ProgressReporter};
use crate::shared::error::FlashToolError;
use crate::shared::security::{validate_file_size, MAX_ARCHIVE_SIZE};
use crate::shared::Result;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read buffer used while streaming an archive to disk
const DOWNLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// FetchArtifactUseCase - locate, download, unpack and rebuild a CI artifact
///
/// Stages run strictly in order and the first failure aborts the pipeline:
/// resolve reference, scan runs, stage archive, extract, reconstruct
/// layout, validate.
///
/// # Type Parameters
/// * `P` - CiArtifactProvider implementation
/// * `E` - ArchiveExtractor implementation
/// * `R` - ProgressReporter implementation
pub struct FetchArtifactUseCase<P, E, R> {
    provider: P,
    extractor: E,
    progress_reporter: R,
}

impl<P, E, R> FetchArtifactUseCase<P, E, R>
where
    P: CiArtifactProvider,
    E: ArchiveExtractor,
    R: ProgressReporter,
{
    pub fn new(provider: P, extractor: E, progress_reporter: R) -> Self {
        Self {
            provider,
            extractor,
            progress_reporter,
        }
    }

    /// Executes the acquisition pipeline
    ///
    /// # Returns
    /// The validated build layout and the run it came from
    pub fn execute(&self, request: FetchArtifactRequest) -> Result<FetchArtifactResponse> {
        // Resolve before anything touches the network
        let repository = RepositoryReference::parse(&request.repository)?;
        validate_artifact_name(&request.artifact_name)?;

        let ScanOutcome {
            run,
            artifact,
            runs_inspected,
        } = RunScanner::new(&self.provider, &self.progress_reporter, request.scan_depth)
            .find_artifact(&repository, &request.artifact_name)?;

        let mut warnings = Vec::new();

        fs::create_dir_all(&request.output_dir).map_err(|e| FlashToolError::FileWriteError {
            path: request.output_dir.clone(),
            details: format!("Failed to create output directory: {}", e),
        })?;

        let (staged, bytes_downloaded) = self.stage_archive(&artifact, &request.output_dir)?;

        let extraction_dir = BuildLayout::extraction_dir(&request.output_dir, &artifact.name);
        self.progress_reporter
            .report(&format!("📦 Extracting to {}...", extraction_dir.display()));
        let extracted = self.extractor.extract(staged.path(), &extraction_dir);
        // The staged archive is removed whether or not extraction succeeded
        if let Err(e) = staged.close() {
            log::warn!("failed to remove staged archive: {}", e);
        }
        extracted?;

        let scanned = FlatFileSet::scan_directory(&extraction_dir)?;
        self.progress_reporter
            .report(&format!("   Extracted {} file(s)", scanned.files.len()));
        self.collect_warnings(&mut warnings, scanned.warnings);

        let layout = BuildLayout::for_artifact(&request.output_dir, &artifact.name);
        self.progress_reporter.report(&format!(
            "🔧 Reconstructing build layout in {}...",
            layout.root().display()
        ));
        let reconstruction = LayoutReconstructor::reconstruct(&scanned.files, &layout)?;
        self.collect_warnings(&mut warnings, reconstruction.warnings);

        let validation = StructureValidator::validate(&layout);
        self.collect_warnings(&mut warnings, validation.warnings.clone());
        let validation = validation.into_result(&layout)?;

        self.progress_reporter.report_completion(&format!(
            "✅ Build directory ready: {} ({})",
            layout.root().display(),
            validation.main_binaries.join(", ")
        ));

        Ok(FetchArtifactResponse {
            run,
            artifact,
            runs_inspected,
            extraction_dir,
            layout,
            bytes_downloaded,
            warnings,
        })
    }

    /// Streams the artifact archive into a temporary file inside `output_dir`
    ///
    /// The returned file is deleted when dropped or closed.
    fn stage_archive(
        &self,
        artifact: &ArtifactDescriptor,
        output_dir: &Path,
    ) -> Result<(NamedTempFile, u64)> {
        let handle = &artifact.download_handle;
        validate_file_size(artifact.size, Path::new(handle.as_str()), MAX_ARCHIVE_SIZE)?;

        self.progress_reporter.report(&format!(
            "⬇️  Downloading artifact '{}' ({} bytes)...",
            artifact.name, artifact.size
        ));

        let mut stream = self.provider.open_archive(handle)?;
        if let Some(length) = stream.content_length {
            validate_file_size(length, Path::new(handle.as_str()), MAX_ARCHIVE_SIZE)?;
        }

        let mut staged = NamedTempFile::new_in(output_dir).map_err(|e| {
            FlashToolError::FileWriteError {
                path: output_dir.to_path_buf(),
                details: format!("Failed to create staging file: {}", e),
            }
        })?;
        let staged_path = staged.path().to_path_buf();
        let write_error = |e: std::io::Error| FlashToolError::FileWriteError {
            path: staged_path.clone(),
            details: e.to_string(),
        };

        let total = stream.content_length;
        let mut buffer = vec![0u8; DOWNLOAD_CHUNK_SIZE];
        let mut written: u64 = 0;
        loop {
            let read = stream
                .reader
                .read(&mut buffer)
                .map_err(|e| FlashToolError::Fetch {
                    url: handle.as_str().to_string(),
                    details: format!("Download interrupted: {}", e),
                    hint: "Check your network connection and try again".to_string(),
                })?;
            if read == 0 {
                break;
            }
            written += read as u64;
            validate_file_size(written, Path::new(handle.as_str()), MAX_ARCHIVE_SIZE)?;
            staged.write_all(&buffer[..read]).map_err(write_error)?;
            self.progress_reporter.report_transfer(written, total);
        }
        staged.flush().map_err(write_error)?;

        log::debug!("staged {} bytes at {}", written, staged_path.display());
        self.progress_reporter
            .report(&format!("   Downloaded {} bytes", written));

        Ok((staged, written))
    }

    fn collect_warnings(&self, all: &mut Vec<String>, new: Vec<String>) {
        for warning in new {
            self.progress_reporter
                .report_warning(&format!("⚠️  Warning: {}", warning));
            all.push(warning);
        }
    }
}

/// The artifact name becomes a directory under the output directory, so it
/// must be a single plain path component.
fn validate_artifact_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains('/')
        || trimmed.contains('\\')
    {
        return Err(FlashToolError::Validation {
            message: format!(
                "Artifact name '{}' must be a single path component",
                name
            ),
        }
        .into());
    }
    Ok(())
}
