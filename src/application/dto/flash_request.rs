use crate::firmware_delivery::domain::Chip;
use std::path::PathBuf;

/// Default serial speed for `idf.py flash`
pub const DEFAULT_BAUD: u32 = 460_800;

/// FlashRequest - input for flashing a build directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashRequest {
    pub build_path: PathBuf,
    pub port: String,
    pub chip: Chip,
    pub baud: u32,
    /// Attach the serial monitor after a successful flash
    pub monitor: bool,
}

impl FlashRequest {
    pub fn new(build_path: PathBuf, port: impl Into<String>, chip: Chip) -> Self {
        Self {
            build_path,
            port: port.into(),
            chip,
            baud: DEFAULT_BAUD,
            monitor: false,
        }
    }

    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    pub fn with_monitor(mut self, monitor: bool) -> Self {
        self.monitor = monitor;
        self
    }
}
