//! # MCFG Convert Binary
//!
//! Retargets a machine configuration document to a diagnostic, bench or
//! EDGE Pro Ti hardware profile.
//!
//! # Usage
//!
//! ```bash
//! # Convert for the bench rig, writing machine_converted.ini
//! mcfg_convert --input machine.ini --profile bench
//!
//! # Print what would change without writing anything
//! mcfg_convert -i machine.ini -p edge-pro-ti --dry-run --report
//!
//! # Profile and output naming from a config file, verbose JSON logs
//! mcfg_convert -i machine.ini --config convert.toml -v --json
//! ```

#![deny(warnings)]

use std::path::PathBuf;

use clap::Parser;
use mcfg_common::config::LogLevel;
use mcfg_common::profile::ProfileId;
use mcfg_convert::config::ConvertConfig;
use mcfg_convert::error::ConvertError;
use mcfg_convert::session::ConversionSession;
use mcfg_common::status::StatusChannel;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// MCFG Convert - retarget a machine configuration to test hardware
#[derive(Parser, Debug)]
#[command(name = "mcfg_convert")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Retarget a machine configuration document to a hardware profile")]
#[command(long_about = None)]
struct Args {
    /// Source configuration document.
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Destination; defaults to <stem><output_suffix>.<ext> next to the input.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Target profile: diagnostic-boards, bench or edge-pro-ti.
    #[arg(short, long, value_name = "ID")]
    profile: Option<ProfileId>,

    /// Converter configuration (convert.toml).
    #[arg(short, long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Convert in memory only; nothing is written.
    #[arg(long)]
    dry_run: bool,

    /// Print the conversion report as JSON on stdout.
    #[arg(long)]
    report: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            setup_tracing(&args, LogLevel::default());
            error!("configuration failed: {}", e);
            std::process::exit(1);
        }
    };
    setup_tracing(&args, config.shared.log_level);

    if let Err(e) = run(&args, &config) {
        error!("conversion failed: {}", e);
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<ConvertConfig, ConvertError> {
    let mut config = match &args.config {
        Some(path) => ConvertConfig::load_validated(path)?,
        None => ConvertConfig::default(),
    };
    if args.profile.is_some() {
        config.convert.profile = args.profile;
    }
    Ok(config)
}

fn run(args: &Args, config: &ConvertConfig) -> Result<(), ConvertError> {
    info!(
        service = %config.shared.service_name,
        "MCFG Convert v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let profile = config.convert.profile.ok_or(ConvertError::NoProfileSelected)?;
    let mut session = ConversionSession::load_with(
        &args.input,
        StatusChannel::none(),
        config.convert.verify_checksum,
    )?;
    session.select_profile(profile);

    let report = session.convert()?;
    session.recompute_checksum();

    if args.report {
        println!("{}", report.to_json()?);
    }

    if args.dry_run {
        info!("Dry run, nothing written");
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.convert.output_path(&args.input));
    session.save(&output)?;
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(configured.as_directive()));
    let filter = if args.verbose {
        filter.add_directive(Level::DEBUG.into())
    } else {
        filter
    };

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
