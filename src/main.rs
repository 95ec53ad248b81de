//! bumpdep - bump one npm dependency across many package.json files

use bumpdep::cli::CliArgs;
use bumpdep::config::ProjectConfig;
use bumpdep::orchestrator::Orchestrator;
use bumpdep::output::{create_formatter, OutputConfig};
use bumpdep::package_manager::SystemPackageManager;
use bumpdep::registry::create_source;
use clap::Parser;
use log::{debug, LevelFilter};
use std::io::{self, Write};
use std::process::ExitCode;

/// Exit code when the run completed but some manifests failed
const EXIT_PARTIAL_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let level = if args.quiet {
        LevelFilter::Error
    } else if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // RUST_LOG, when set, takes precedence over the flags
    pretty_env_logger::env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    // Run the main logic and handle errors
    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(mut args: CliArgs) -> anyhow::Result<ExitCode> {
    debug!("bumpdep v{}", env!("CARGO_PKG_VERSION"));

    // The core only sees absolute roots
    args.root = std::path::absolute(&args.root)?;

    let config = ProjectConfig::from_dir(&args.root)?;
    let request = args.to_request(&config)?;
    debug!("Root: {}", request.root.display());
    if request.dry_run {
        debug!("Mode: dry-run");
    }

    let source = create_source(
        request.package_manager,
        args.registry_url(&config),
        &request.root,
    )?;
    let orchestrator = Orchestrator::new(source, Box::new(SystemPackageManager::new()))
        .with_progress(!args.quiet && !args.json);
    let summary = orchestrator.run(&request).await?;

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose, args.quiet));
    let mut stdout = io::stdout().lock();
    formatter.format(&summary, &mut stdout)?;
    stdout.flush()?;

    if summary.has_failures() {
        Ok(ExitCode::from(EXIT_PARTIAL_FAILURE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
