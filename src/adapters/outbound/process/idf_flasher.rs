use crate::firmware_delivery::domain::Chip;
use crate::ports::outbound::{FirmwareFlasher, FlashJob};
use crate::shared::error::FlashToolError;
use crate::shared::Result;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// IdfPyFlasher adapter running ESP-IDF's `idf.py`
///
/// The tool inherits the terminal so its own progress output and the
/// interactive monitor work unchanged.
pub struct IdfPyFlasher {
    program: String,
}

impl IdfPyFlasher {
    pub const DEFAULT_PROGRAM: &'static str = "idf.py";

    pub fn new() -> Self {
        Self::with_program(Self::DEFAULT_PROGRAM)
    }

    /// Uses another executable, e.g. an absolute path to idf.py
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn flash_args(job: &FlashJob) -> Vec<String> {
        vec![
            "-p".to_string(),
            job.port.clone(),
            "-b".to_string(),
            job.baud.to_string(),
            "flash".to_string(),
        ]
    }

    fn monitor_args(port: &str) -> Vec<String> {
        vec!["-p".to_string(), port.to_string(), "monitor".to_string()]
    }

    fn run(&self, args: &[String], chip: Chip, working_dir: Option<&Path>) -> Result<()> {
        log::debug!("running {} {}", self.program, args.join(" "));

        let mut command = Command::new(&self.program);
        command.args(args).env("IDF_TARGET", chip.as_str());
        if let Some(dir) = working_dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FlashToolError::FlasherNotFound {
                    tool: self.program.clone(),
                }
            } else {
                FlashToolError::FlashFailed {
                    details: format!("failed to start {}: {}", self.program, e),
                }
            }
        })?;

        if !status.success() {
            let code = status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "a signal".to_string());
            return Err(FlashToolError::FlashFailed {
                details: format!("{} {} exited with {}", self.program, args.join(" "), code),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for IdfPyFlasher {
    fn default() -> Self {
        Self::new()
    }
}

impl FirmwareFlasher for IdfPyFlasher {
    fn flash(&self, job: &FlashJob) -> Result<()> {
        self.run(&Self::flash_args(job), job.chip, Some(&job.build_path))
    }

    fn monitor(&self, port: &str, chip: Chip) -> Result<()> {
        self.run(&Self::monitor_args(port), chip, None)
    }
}
