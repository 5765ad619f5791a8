/// Use cases module containing application business logic orchestration
mod fetch_artifact;
mod flash_firmware;

pub use fetch_artifact::FetchArtifactUseCase;
pub use flash_firmware::FlashFirmwareUseCase;
