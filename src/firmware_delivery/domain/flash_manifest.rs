use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct FlasherArgsJson {
    #[serde(default)]
    write_flash_args: Vec<String>,
    #[serde(default)]
    flash_files: BTreeMap<String, String>,
    #[serde(default)]
    extra_esptool_args: Option<ExtraEsptoolArgs>,
}

#[derive(Debug, Deserialize)]
struct ExtraEsptoolArgs {
    #[serde(default)]
    chip: Option<String>,
}

/// One image written at a fixed flash offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashRegion {
    pub offset: u32,
    /// Path relative to the build directory
    pub file: String,
}

/// Flash plan read from `flasher_args.json`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlashManifest {
    /// Regions ordered by offset
    pub regions: Vec<FlashRegion>,
    pub write_flash_args: Vec<String>,
    pub chip: Option<String>,
}

impl FlashManifest {
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: FlasherArgsJson = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse flasher_args.json: {}", e))?;

        let mut regions = raw
            .flash_files
            .into_iter()
            .map(|(offset, file)| {
                Ok(FlashRegion {
                    offset: parse_offset(&offset)?,
                    file,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        regions.sort_by_key(|region| region.offset);

        Ok(Self {
            regions,
            write_flash_args: raw.write_flash_args,
            chip: raw.extra_esptool_args.and_then(|extra| extra.chip),
        })
    }
}

fn parse_offset(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => trimmed.parse::<u32>(),
    };
    parsed.map_err(|_| anyhow::anyhow!("Invalid flash offset in flasher_args.json: '{}'", raw))
}
