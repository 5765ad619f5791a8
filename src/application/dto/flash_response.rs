use crate::firmware_delivery::domain::FlashManifest;

/// FlashResponse - what was flashed
#[derive(Debug, Clone)]
pub struct FlashResponse {
    /// Parsed `flasher_args.json`, when present and readable
    pub manifest: Option<FlashManifest>,
    pub main_binaries: Vec<String>,
    pub warnings: Vec<String>,
    /// True when the serial monitor ran and exited cleanly
    pub monitored: bool,
}
