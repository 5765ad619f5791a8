use crate::firmware_delivery::domain::Chip;
use crate::shared::Result;
use std::path::PathBuf;

/// Everything the flashing tool needs for one write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashJob {
    pub build_path: PathBuf,
    pub port: String,
    pub chip: Chip,
    pub baud: u32,
}

/// FirmwareFlasher port for the external flashing tool
///
/// Implementations only run the tool; the build directory has already been
/// validated by the caller.
pub trait FirmwareFlasher {
    /// Writes the build directory to the device
    ///
    /// # Errors
    /// Returns `FlashToolError::FlasherNotFound` when the tool is missing and
    /// `FlashToolError::FlashFailed` when it exits unsuccessfully
    fn flash(&self, job: &FlashJob) -> Result<()>;

    /// Attaches a serial monitor until the user exits it
    fn monitor(&self, port: &str, chip: Chip) -> Result<()>;
}
