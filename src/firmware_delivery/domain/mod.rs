pub mod build_layout;
pub mod chip;
pub mod credential;
pub mod flash_manifest;
pub mod flat_file_set;
pub mod repository_reference;
pub mod workflow_run;

pub use build_layout::BuildLayout;
pub use chip::Chip;
pub use credential::Credential;
pub use flash_manifest::{FlashManifest, FlashRegion};
pub use flat_file_set::{FlatFileSet, ScannedFiles};
pub use repository_reference::RepositoryReference;
pub use workflow_run::{ArtifactDescriptor, DownloadHandle, RunId, WorkflowRun};
