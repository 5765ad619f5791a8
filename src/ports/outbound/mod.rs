/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (CI provider, filesystem, serial
/// devices, the flashing tool and the console).
pub mod archive_extractor;
pub mod ci_artifact_provider;
pub mod firmware_flasher;
pub mod progress_reporter;
pub mod serial_port_lister;

pub use archive_extractor::ArchiveExtractor;
pub use ci_artifact_provider::{ArchiveStream, CiArtifactProvider};
pub use firmware_flasher::{FirmwareFlasher, FlashJob};
pub use progress_reporter::ProgressReporter;
pub use serial_port_lister::{SerialPortDescription, SerialPortLister};
