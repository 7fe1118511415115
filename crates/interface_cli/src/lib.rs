//! Enrollment command line shell
//!
//! Thin layer over [`domain_enrollment::EnrollmentEngine`]: argument
//! parsing, configuration, output formatting and exit codes. All rules live
//! in the domain crate.

pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;

use std::sync::Arc;

use domain_enrollment::{EnrollmentEngine, JsonFilePersonDirectory};

pub use commands::{Cli, Command, RegistrationArgs};
pub use config::CliConfig;
pub use error::CliError;
pub use handlers::{execute, OutputFormat};

/// Builds an engine over the configured persons file
pub fn build_engine(config: &CliConfig) -> EnrollmentEngine {
    let directory = JsonFilePersonDirectory::new(config.data_file.clone());
    EnrollmentEngine::new(Arc::new(directory))
}
