use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Every terminal failure of the pipeline maps to `Failure`; clap reports
/// argument parsing errors with its own code 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Download, validation and (optionally) flashing succeeded
    Success = 0,
    /// Invalid input, download failure, missing build path, flashing failure
    Failure = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Failure => write!(f, "Failure (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
        }
    }
}

/// Shape of a flashable build directory, printed when a layout is incomplete.
pub const EXPECTED_LAYOUT_TREE: &str = "\
build/
├── bootloader/
│   └── bootloader.bin
├── partition_table/
│   └── partition-table.bin
├── <app>.bin
└── flasher_args.json (or flash_args)";

/// Application-specific errors for artifact acquisition and flashing.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum FlashToolError {
    #[error("Invalid repository reference: '{input}'\n\n💡 Hint: Use owner/repo or https://github.com/owner/repo")]
    InvalidReference { input: String },

    #[error("No successful workflow runs found for {repository}\n\n💡 Hint: Check that GitHub Actions has completed at least one successful run")]
    NoRuns { repository: String },

    #[error("Artifact '{artifact}' not found in the {runs_checked} most recent successful run(s) of {repository}\n\n💡 Hint: Check the artifact name (it is case-sensitive) and that the artifact has not expired")]
    ArtifactNotFound {
        artifact: String,
        repository: String,
        runs_checked: usize,
    },

    #[error("Authentication failed: {url}\n\n💡 Hint: You may need a GitHub token for private repositories.\n   Create a token at: https://github.com/settings/tokens and pass it with --token or GITHUB_TOKEN")]
    Authentication { url: String },

    #[error("Failed to fetch {url}\nDetails: {details}\n\n💡 Hint: {hint}")]
    Fetch {
        url: String,
        details: String,
        hint: String,
    },

    #[error("Failed to extract archive: {path}\nDetails: {details}\n\n💡 Hint: The downloaded artifact is not a valid zip archive; try downloading it again")]
    CorruptArchive { path: PathBuf, details: String },

    #[error("Build directory is incomplete: {root}\nMissing:\n{}\n\nExpected structure:\n{}\n\n💡 Hint: Make sure the CI workflow uploads the bootloader, partition table and application binaries", format_missing(.missing), EXPECTED_LAYOUT_TREE)]
    IncompleteLayout { root: PathBuf, missing: Vec<String> },

    #[error("Invalid build path: {path}\nReason: {reason}\n\n💡 Hint: Point --build-path at an ESP-IDF build directory")]
    InvalidBuildPath { path: PathBuf, reason: String },

    #[error("{tool} not found\n\n💡 Hint: Run from an ESP-IDF terminal (export.sh / export.ps1) so that {tool} is on PATH")]
    FlasherNotFound { tool: String },

    #[error("Flashing failed: {details}\n\nTroubleshooting:\n  1. Make sure the device is connected and drivers are installed\n  2. Try a different baud rate with --baud\n  3. Put the device in download mode (hold BOOT while pressing RESET)")]
    FlashFailed { details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },
}

fn format_missing(missing: &[String]) -> String {
    missing
        .iter()
        .map(|item| format!("  - {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
