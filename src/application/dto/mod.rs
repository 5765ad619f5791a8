/// Data Transfer Objects for application layer
///
/// DTOs carry already-resolved CLI and config values into the use cases,
/// keeping argument parsing out of the domain layer.
mod fetch_request;
mod fetch_response;
mod flash_request;
mod flash_response;

pub use fetch_request::{FetchArtifactRequest, FetchArtifactRequestBuilder, DEFAULT_OUTPUT_DIR};
pub use fetch_response::FetchArtifactResponse;
pub use flash_request::{FlashRequest, DEFAULT_BAUD};
pub use flash_response::FlashResponse;
