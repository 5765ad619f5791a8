pub mod layout_reconstructor;
pub mod run_scanner;
pub mod structure_validator;

pub use layout_reconstructor::{LayoutReconstructor, PlacedFile, ReconstructionReport};
pub use run_scanner::{RunScanner, ScanOutcome, DEFAULT_SCAN_DEPTH, MAX_SCAN_DEPTH};
pub use structure_validator::{StructureValidator, ValidationReport, MAIN_BINARY_REQUIREMENT};
