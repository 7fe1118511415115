//! Enrollment CLI Binary
//!
//! # Usage
//!
//! ```bash
//! enrollment register --identity-number 45678912 --names "Ana Lucía" --surnames "Torres Vega" \
//!     --age 18 --sex F --phone "987 654 321" --email ana@uni.edu.pe --address "Jr. Cusco 123, Lima"
//! enrollment enroll 45678912 Medicina morning
//! enrollment set-courses 45678912 1,2,3,4,5,6
//! enrollment summary 45678912
//! ```
//!
//! # Environment Variables
//!
//! * `ENROLLMENT_DATA_FILE` - Persons file (default: data/persons.json)
//! * `ENROLLMENT_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `ENROLLMENT_LOG_JSON` - Emit logs as JSON lines (default: false)

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_cli::{build_engine, execute, Cli, CliConfig, CliError, OutputFormat};

fn main() -> ExitCode {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return report(CliError::from(e)),
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            report(e)
        }
    }
}

fn report(error: CliError) -> ExitCode {
    eprintln!("error: {}", error);
    ExitCode::from(error.exit_code())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_env()?.with_data_file(cli.data_file);
    init_tracing(&config);

    tracing::debug!(data_file = %config.data_file.display(), "Using persons file");

    let engine = build_engine(&config);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&engine, cli.command, OutputFormat::from_flag(cli.json), &mut out)?;
    out.flush()?;
    Ok(())
}

/// Initializes the tracing subscriber; logs go to stderr so stdout carries only results.
fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
