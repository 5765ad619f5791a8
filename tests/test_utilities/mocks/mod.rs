/// Mock implementations for testing
mod mock_ci_provider;
mod mock_flasher;
mod mock_progress_reporter;

pub use mock_ci_provider::MockCiProvider;
pub use mock_flasher::MockFlasher;
pub use mock_progress_reporter::MockProgressReporter;
