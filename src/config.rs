//! Configuration file support for idf-artifact-flash.
//!
//! Provides YAML-based configuration through `idf-artifact-flash.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use idf_artifact_flash::firmware_delivery::domain::Chip;
use idf_artifact_flash::firmware_delivery::services::MAX_SCAN_DEPTH;
use idf_artifact_flash::shared::Result;

pub const CONFIG_FILENAME: &str = "idf-artifact-flash.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub repo: Option<String>,
    pub artifact: Option<String>,
    pub chip: Option<String>,
    pub port: Option<String>,
    pub baud: Option<u32>,
    pub output_dir: Option<PathBuf>,
    pub scan_depth: Option<usize>,
    /// REST API root, for GitHub Enterprise hosts.
    pub api_base: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parsed `chip`; only valid after `validate_config` succeeded.
    pub fn parsed_chip(&self) -> Option<Chip> {
        self.chip.as_deref().and_then(|c| Chip::from_str(c).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    log::debug!("loaded config from {}", path.display());

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.unknown_fields.contains_key("token") {
        bail!(
            "Invalid config: 'token' must not be stored in the config file.\n\n\
             💡 Hint: Pass the token with --token or the GITHUB_TOKEN environment variable."
        );
    }

    if let Some(depth) = config.scan_depth {
        if depth == 0 || depth > MAX_SCAN_DEPTH {
            bail!(
                "Invalid config: scan_depth must be between 1 and {} (got {}).\n\n\
                 💡 Hint: GitHub returns at most {} runs per page.",
                MAX_SCAN_DEPTH,
                depth,
                MAX_SCAN_DEPTH
            );
        }
    }

    if let Some(ref chip) = config.chip {
        if let Err(message) = Chip::from_str(chip) {
            bail!("Invalid config: {}", message);
        }
    }

    if let Some(ref api_base) = config.api_base {
        if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
            bail!(
                "Invalid config: api_base must be an http(s) URL (got '{}').\n\n\
                 💡 Hint: For GitHub Enterprise use https://<host>/api/v3",
                api_base
            );
        }
    }

    if let Some(0) = config.baud {
        bail!("Invalid config: baud must be greater than 0.");
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
