/// End-to-end tests for the CLI
///
/// Every case here fails or finishes before any network access, so the
/// suite runs offline. Commands run inside a fresh temporary directory so a
/// config file in the developer's checkout is never picked up.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_complete_build(dir: &Path) {
    fs::create_dir_all(dir.join("bootloader")).unwrap();
    fs::create_dir_all(dir.join("partition_table")).unwrap();
    fs::write(dir.join("bootloader/bootloader.bin"), "boot").unwrap();
    fs::write(dir.join("partition_table/partition-table.bin"), "pt").unwrap();
    fs::write(dir.join("app.bin"), "app").unwrap();
    fs::write(dir.join("flash_args"), "0x0 bootloader/bootloader.bin\n").unwrap();
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("idf-artifact-flash")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--artifact"))
            .stdout(predicate::str::contains("--download-only"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("idf-artifact-flash")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("idf-artifact-flash")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Unsupported chip
    #[test]
    fn test_exit_code_invalid_chip() {
        cargo_bin_cmd!("idf-artifact-flash")
            .args(["--build-path", "build", "-p", "COM3", "--chip", "esp8266"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("esp8266"));
    }

    /// Exit code 2: scan depth outside 1..=100
    #[test]
    fn test_exit_code_scan_depth_out_of_range() {
        cargo_bin_cmd!("idf-artifact-flash")
            .args(["-r", "owner/repo", "-a", "fw", "--scan-depth", "0"])
            .assert()
            .code(2);
    }

    /// Exit code 2: --build-path cannot be combined with a download
    #[test]
    fn test_exit_code_build_path_conflict() {
        cargo_bin_cmd!("idf-artifact-flash")
            .args(["--build-path", "build", "--repo", "owner/repo"])
            .assert()
            .code(2);
    }

    /// Exit code 1: malformed repository reference, rejected before any request
    #[test]
    fn test_exit_code_invalid_reference() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("idf-artifact-flash")
            .current_dir(dir.path())
            .env_remove("GITHUB_TOKEN")
            .args(["--repo", "noslash", "--artifact", "fw", "--download-only"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid repository reference"));

        // Nothing is written for a rejected reference
        assert!(!dir.path().join("downloads").exists());
    }

    /// Exit code 1: repository missing from both CLI and config
    #[test]
    fn test_exit_code_missing_repo() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("idf-artifact-flash")
            .current_dir(dir.path())
            .args(["--artifact", "fw", "--download-only"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--repo is required"));
    }

    /// Exit code 1: flashing requested without a port, checked before downloading
    #[test]
    fn test_exit_code_missing_port() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("idf-artifact-flash")
            .current_dir(dir.path())
            .args(["--repo", "owner/repo", "--artifact", "fw", "--chip", "esp32"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--port is required"));
    }
}

mod build_path_tests {
    use super::*;

    #[test]
    fn test_nonexistent_build_path() {
        let dir = TempDir::new().unwrap();
        cargo_bin_cmd!("idf-artifact-flash")
            .current_dir(dir.path())
            .args([
                "--build-path",
                "/nonexistent/path/that/does/not/exist",
                "-p",
                "/dev/ttyUSB0",
                "-c",
                "esp32",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Invalid build path"))
            .stderr(predicate::str::contains("directory does not exist"));
    }

    #[test]
    fn test_build_path_is_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.bin");
        fs::write(&file, "app").unwrap();

        cargo_bin_cmd!("idf-artifact-flash")
            .current_dir(dir.path())
            .args(["--build-path", file.to_str().unwrap(), "-p", "COM3", "-c", "esp32"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not a directory"));
    }

    #[test]
    fn test_incomplete_build_path_lists_missing_files() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        fs::create_dir_all(&build).unwrap();
        fs::write(build.join("app.bin"), "app").unwrap();

        cargo_bin_cmd!("idf-artifact-flash")
            .current_dir(dir.path())
            .args(["--build-path", "build", "-p", "COM3", "-c", "esp32s3"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Missing"))
            .stderr(predicate::str::contains("bootloader/bootloader.bin"))
            .stderr(predicate::str::contains("partition_table/partition-table.bin"));
    }

    /// A complete build reaches the flasher, which is absent from this PATH
    #[cfg(unix)]
    #[test]
    fn test_missing_idf_py_is_reported() {
        let dir = TempDir::new().unwrap();
        let build = dir.path().join("build");
        write_complete_build(&build);
        let empty_path = dir.path().join("bin");
        fs::create_dir_all(&empty_path).unwrap();

        cargo_bin_cmd!("idf-artifact-flash")
            .current_dir(dir.path())
            .env("PATH", &empty_path)
            .args(["--build-path", "build", "-p", "/dev/ttyUSB0", "-c", "esp32"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("idf.py not found"))
            .stderr(predicate::str::contains("ESP-IDF terminal"));
    }
}
