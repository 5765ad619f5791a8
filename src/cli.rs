use clap::{ArgAction, Parser};
use idf_artifact_flash::firmware_delivery::domain::Chip;
use idf_artifact_flash::shared::error::ExitCode;
use std::path::PathBuf;
use std::process;

/// Download ESP-IDF firmware built by GitHub Actions and flash it with idf.py
#[derive(Parser, Debug)]
#[command(name = "idf-artifact-flash")]
#[command(version)]
#[command(
    about = "Download ESP-IDF firmware built by GitHub Actions and flash it with idf.py",
    long_about = None
)]
pub struct Args {
    /// GitHub repository: owner/repo or https://github.com/owner/repo
    #[arg(short, long)]
    pub repo: Option<String>,

    /// Name of the artifact uploaded by the workflow (exact, case-sensitive)
    #[arg(short, long)]
    pub artifact: Option<String>,

    /// GitHub token (defaults to the GITHUB_TOKEN environment variable)
    #[arg(long)]
    pub token: Option<String>,

    /// Serial port of the device (e.g. /dev/ttyUSB0 or COM3)
    #[arg(short, long)]
    pub port: Option<String>,

    /// Target chip: esp32, esp32c3, esp32s2, esp32s3, esp32c6, esp32h2
    #[arg(short, long)]
    pub chip: Option<Chip>,

    /// Flash an existing build directory instead of downloading one
    #[arg(long, value_name = "DIR", conflicts_with_all = ["repo", "artifact", "download_only"])]
    pub build_path: Option<PathBuf>,

    /// Flashing baud rate [default: 460800]
    #[arg(short, long)]
    pub baud: Option<u32>,

    /// Download and rebuild the build directory without flashing
    #[arg(long)]
    pub download_only: bool,

    /// Open the serial monitor after flashing
    #[arg(short, long)]
    pub monitor: bool,

    /// List available serial ports and exit
    #[arg(long)]
    pub list_ports: bool,

    /// Directory artifacts are downloaded into [default: downloads]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Number of recent successful runs to search (1-100) [default: 10]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub scan_depth: Option<u16>,

    /// Path to a config file (defaults to ./idf-artifact-flash.config.yml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Parses the process arguments, exiting on `--help`, `--version` or a usage error
    pub fn parse_args() -> Self {
        Self::try_parse().unwrap_or_else(|e| {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            // Printing only fails when the terminal is gone
            let _ = e.print();
            process::exit(code.as_i32());
        })
    }
}
