use chrono::{TimeZone, Utc};
use idf_artifact_flash::prelude::*;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Builds a zip archive in memory from (name, content) pairs
pub fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Flat artifact contents as uploaded by a typical ESP-IDF workflow
pub const FLAT_ARTIFACT: [(&str, &str); 5] = [
    ("bootloader.bin", "\u{e9}bootloader image"),
    ("partition-table.bin", "partition table image"),
    ("gate-lock-home-node.bin", "\u{e9}application image"),
    ("flash_args", "--flash_mode dio --flash_size 4MB\n0x0 bootloader/bootloader.bin\n"),
    (
        "flasher_args.json",
        r#"{"flash_files": {"0x0": "bootloader/bootloader.bin", "0x8000": "partition_table/partition-table.bin", "0x10000": "gate-lock-home-node.bin"}, "extra_esptool_args": {"chip": "esp32c3"}}"#,
    ),
];

/// A completed, successful run created on 2024-06-`day`
pub fn successful_run(id: u64, day: u32) -> WorkflowRun {
    WorkflowRun {
        id: RunId(id),
        name: Some("Build firmware".to_string()),
        created_at: Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap(),
        status: "completed".to_string(),
        conclusion: Some("success".to_string()),
    }
}

pub fn artifact(id: u64, name: &str) -> ArtifactDescriptor {
    ArtifactDescriptor {
        id,
        name: name.to_string(),
        download_handle: DownloadHandle::new(format!(
            "https://api.github.com/repos/owner/repo/actions/artifacts/{}/zip",
            id
        )),
        size: 0,
        expired: false,
    }
}
