mod cli;
mod config;

use cli::Args;
use config::{discover_config, load_config_from_path, ConfigFile};
use idf_artifact_flash::adapters::outbound::console::StderrProgressReporter;
use idf_artifact_flash::adapters::outbound::filesystem::ZipArchiveExtractor;
use idf_artifact_flash::adapters::outbound::network::GitHubActionsClient;
use idf_artifact_flash::adapters::outbound::process::IdfPyFlasher;
use idf_artifact_flash::adapters::outbound::serial::SerialPortEnumerator;
use idf_artifact_flash::application::dto::{FetchArtifactRequest, FlashRequest, DEFAULT_BAUD};
use idf_artifact_flash::application::use_cases::{FetchArtifactUseCase, FlashFirmwareUseCase};
use idf_artifact_flash::firmware_delivery::domain::{Chip, Credential};
use idf_artifact_flash::ports::outbound::SerialPortLister;
use idf_artifact_flash::shared::error::{ExitCode, FlashToolError};
use idf_artifact_flash::shared::Result;
use std::path::{Path, PathBuf};
use std::process;

const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::Failure.as_i32());
    }
    process::exit(ExitCode::Success.as_i32());
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Flashing target after merging CLI flags over the config file
struct FlashTarget {
    port: String,
    chip: Chip,
    baud: u32,
    monitor: bool,
}

fn run(args: Args) -> Result<()> {
    if args.list_ports {
        return list_ports();
    }

    let config = load_config(args.config.as_deref())?;

    if let Some(build_path) = args.build_path.clone() {
        let target = resolve_flash_target(&args, &config)?;
        return flash(build_path, target);
    }

    let repository = args
        .repo
        .clone()
        .or_else(|| config.repo.clone())
        .ok_or_else(|| missing_option("--repo", "repo"))?;
    let artifact = args
        .artifact
        .clone()
        .or_else(|| config.artifact.clone())
        .ok_or_else(|| missing_option("--artifact", "artifact"))?;

    // Check flashing inputs before spending time on the download
    let target = if args.download_only {
        None
    } else {
        Some(resolve_flash_target(&args, &config)?)
    };

    // Resolved once here and passed explicitly into the client
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var(TOKEN_ENV_VAR).ok());
    let credential = token.as_deref().and_then(Credential::from_token);
    match &credential {
        Some(credential) => log::debug!("using {}", credential.kind()),
        None => log::debug!("no GitHub token; only public repositories are reachable"),
    }

    let api_base = config
        .api_base
        .clone()
        .unwrap_or_else(|| GitHubActionsClient::DEFAULT_API_BASE.to_string());
    let provider = GitHubActionsClient::with_api_base(credential, &api_base)?;

    let mut request = FetchArtifactRequest::builder()
        .repository(repository)
        .artifact_name(artifact);
    if let Some(output_dir) = args.output_dir.clone().or_else(|| config.output_dir.clone()) {
        request = request.output_dir(output_dir);
    }
    if let Some(scan_depth) = args.scan_depth.map(usize::from).or(config.scan_depth) {
        request = request.scan_depth(scan_depth);
    }

    let use_case = FetchArtifactUseCase::new(
        provider,
        ZipArchiveExtractor::new(),
        StderrProgressReporter::new(),
    );
    let response = use_case.execute(request.build()?)?;

    eprintln!(
        "📁 Run {} ({}) - build directory: {}",
        response.run.id,
        response.run.created_date(),
        response.build_path().display()
    );

    match target {
        Some(target) => flash(response.build_path().to_path_buf(), target),
        None => Ok(()),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        return load_config_from_path(path);
    }
    let cwd = std::env::current_dir()?;
    Ok(discover_config(&cwd)?.unwrap_or_default())
}

fn resolve_flash_target(args: &Args, config: &ConfigFile) -> Result<FlashTarget> {
    let port = args
        .port
        .clone()
        .or_else(|| config.port.clone())
        .ok_or_else(|| missing_option("--port", "port"))?;
    let chip = args
        .chip
        .or_else(|| config.parsed_chip())
        .ok_or_else(|| missing_option("--chip", "chip"))?;

    Ok(FlashTarget {
        port,
        chip,
        baud: args.baud.or(config.baud).unwrap_or(DEFAULT_BAUD),
        monitor: args.monitor,
    })
}

fn missing_option(flag: &str, config_key: &str) -> anyhow::Error {
    FlashToolError::Validation {
        message: format!(
            "{} is required (or set '{}' in {})",
            flag,
            config_key,
            config::CONFIG_FILENAME
        ),
    }
    .into()
}

fn flash(build_path: PathBuf, target: FlashTarget) -> Result<()> {
    let use_case = FlashFirmwareUseCase::new(IdfPyFlasher::new(), StderrProgressReporter::new());
    let request = FlashRequest::new(build_path, target.port, target.chip)
        .with_baud(target.baud)
        .with_monitor(target.monitor);
    use_case.execute(request)?;
    Ok(())
}

fn list_ports() -> Result<()> {
    let ports = SerialPortEnumerator::new().list_ports()?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }
    for port in ports {
        println!("{} - {}", port.device, port.description);
    }
    Ok(())
}
