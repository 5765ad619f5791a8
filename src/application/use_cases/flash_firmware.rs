use crate::application::dto::{FlashRequest, FlashResponse};
use crate::firmware_delivery::domain::build_layout::FLASHER_ARGS_JSON_FILE;
use crate::firmware_delivery::domain::{BuildLayout, FlashManifest};
use crate::firmware_delivery::services::StructureValidator;
use crate::ports::outbound::{FirmwareFlasher, FlashJob, ProgressReporter};
use crate::shared::error::FlashToolError;
use crate::shared::security::{validate_file_size, validate_regular_file, MAX_METADATA_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FlashFirmwareUseCase - hands a validated build directory to the flasher
///
/// The directory is re-validated here even when it was just reconstructed,
/// since a user-supplied `--build-path` never went through reconstruction.
///
/// # Type Parameters
/// * `F` - FirmwareFlasher implementation
/// * `R` - ProgressReporter implementation
pub struct FlashFirmwareUseCase<F, R> {
    flasher: F,
    progress_reporter: R,
}

impl<F, R> FlashFirmwareUseCase<F, R>
where
    F: FirmwareFlasher,
    R: ProgressReporter,
{
    pub fn new(flasher: F, progress_reporter: R) -> Self {
        Self {
            flasher,
            progress_reporter,
        }
    }

    pub fn execute(&self, request: FlashRequest) -> Result<FlashResponse> {
        validate_build_path(&request.build_path)?;

        let layout = BuildLayout::new(request.build_path.clone());
        let validation = StructureValidator::validate(&layout);
        let mut warnings = validation.warnings.clone();
        let validation = validation.into_result(&layout)?;

        let manifest = self.inspect_manifest(&layout, &request, &mut warnings);
        for warning in &warnings {
            self.progress_reporter
                .report_warning(&format!("⚠️  Warning: {}", warning));
        }

        self.progress_reporter.report(&format!(
            "⚡ Flashing {} via {} at {} baud...",
            request.chip, request.port, request.baud
        ));
        self.flasher.flash(&FlashJob {
            build_path: request.build_path.clone(),
            port: request.port.clone(),
            chip: request.chip,
            baud: request.baud,
        })?;
        self.progress_reporter
            .report_completion("✅ Flashing completed successfully");

        let monitored = request.monitor && self.run_monitor(&request, &mut warnings)?;

        Ok(FlashResponse {
            manifest,
            main_binaries: validation.main_binaries,
            warnings,
            monitored,
        })
    }

    /// Opens the serial monitor once the device has been written
    ///
    /// The firmware is already flashed at this point, so only a missing
    /// idf.py is an error; any other monitor failure becomes a warning.
    fn run_monitor(&self, request: &FlashRequest, warnings: &mut Vec<String>) -> Result<bool> {
        self.progress_reporter.report(&format!(
            "📟 Starting serial monitor on {} (Ctrl+] to exit)",
            request.port
        ));

        let err = match self.flasher.monitor(&request.port, request.chip) {
            Ok(()) => return Ok(true),
            Err(err) => err,
        };
        let details = match err.downcast_ref::<FlashToolError>() {
            Some(FlashToolError::FlasherNotFound { .. }) => return Err(err),
            Some(FlashToolError::FlashFailed { details }) => details.clone(),
            _ => err.to_string(),
        };

        let warning = format!("Serial monitor did not exit cleanly: {}", details);
        self.progress_reporter
            .report_warning(&format!("⚠️  Warning: {}", warning));
        warnings.push(warning);
        Ok(false)
    }

    /// Reads `flasher_args.json` when present and reports the flash plan
    ///
    /// Problems with the manifest become warnings; idf.py has the final say.
    fn inspect_manifest(
        &self,
        layout: &BuildLayout,
        request: &FlashRequest,
        warnings: &mut Vec<String>,
    ) -> Option<FlashManifest> {
        let path = layout.root().join(FLASHER_ARGS_JSON_FILE);
        if !path.exists() {
            return None;
        }

        let manifest = match read_manifest(&path) {
            Ok(manifest) => manifest,
            Err(e) => {
                warnings.push(format!("Could not read {}: {}", FLASHER_ARGS_JSON_FILE, e));
                return None;
            }
        };

        self.progress_reporter.report("📋 Flash plan:");
        for region in &manifest.regions {
            self.progress_reporter
                .report(&format!("   0x{:06x}  {}", region.offset, region.file));
            if !layout.root().join(&region.file).is_file() {
                warnings.push(format!(
                    "{} references {} which does not exist",
                    FLASHER_ARGS_JSON_FILE, region.file
                ));
            }
        }

        if let Some(built_for) = &manifest.chip {
            if !built_for.eq_ignore_ascii_case(request.chip.as_str()) {
                warnings.push(format!(
                    "Build targets {} but --chip is {}",
                    built_for, request.chip
                ));
            }
        }

        Some(manifest)
    }
}

fn validate_build_path(path: &Path) -> Result<()> {
    let invalid = |reason: &str| FlashToolError::InvalidBuildPath {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let metadata = fs::symlink_metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            invalid("directory does not exist")
        } else {
            invalid(&e.to_string())
        }
    })?;

    if metadata.is_symlink() {
        return Err(invalid("symbolic links are not allowed").into());
    }
    if !metadata.is_dir() {
        return Err(invalid("not a directory").into());
    }
    Ok(())
}

fn read_manifest(path: &Path) -> Result<FlashManifest> {
    validate_regular_file(path, FLASHER_ARGS_JSON_FILE)?;
    let size = fs::metadata(path)?.len();
    validate_file_size(size, path, MAX_METADATA_FILE_SIZE)?;
    let content = fs::read_to_string(path).map_err(|e| FlashToolError::FileReadError {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;
    FlashManifest::from_json(&content)
}
