//! idf-artifact-flash - fetch ESP-IDF firmware from GitHub Actions and flash it
//!
//! This library locates a named build artifact in a repository's recent
//! successful workflow runs, downloads and unpacks it, rebuilds the directory
//! layout `idf.py flash` expects and validates it before flashing.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`firmware_delivery`): Value objects, classification rules and services
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Error types, result alias and filesystem security checks
//!
//! # Example
//!
//! ```no_run
//! use idf_artifact_flash::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let credential = std::env::var("GITHUB_TOKEN")
//!     .ok()
//!     .and_then(|token| Credential::from_token(&token));
//!
//! let use_case = FetchArtifactUseCase::new(
//!     GitHubActionsClient::new(credential)?,
//!     ZipArchiveExtractor::new(),
//!     StderrProgressReporter::new(),
//! );
//!
//! let request = FetchArtifactRequest::new("espressif/esp-idf-template", "firmware");
//! let response = use_case.execute(request)?;
//! println!("{}", response.build_path().display());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod firmware_delivery;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::ZipArchiveExtractor;
    pub use crate::adapters::outbound::network::GitHubActionsClient;
    pub use crate::adapters::outbound::process::IdfPyFlasher;
    pub use crate::adapters::outbound::serial::SerialPortEnumerator;
    pub use crate::application::dto::{
        FetchArtifactRequest, FetchArtifactResponse, FlashRequest, FlashResponse,
    };
    pub use crate::application::use_cases::{FetchArtifactUseCase, FlashFirmwareUseCase};
    pub use crate::firmware_delivery::domain::{
        ArtifactDescriptor, BuildLayout, Chip, Credential, DownloadHandle, FlashManifest,
        FlatFileSet, RepositoryReference, RunId, WorkflowRun,
    };
    pub use crate::firmware_delivery::policies::{FileCategory, FileClassification};
    pub use crate::firmware_delivery::services::{
        LayoutReconstructor, RunScanner, StructureValidator, ValidationReport,
    };
    pub use crate::ports::outbound::{
        ArchiveExtractor, ArchiveStream, CiArtifactProvider, FirmwareFlasher, FlashJob,
        ProgressReporter, SerialPortDescription, SerialPortLister,
    };
    pub use crate::shared::error::FlashToolError;
    pub use crate::shared::Result;
}
