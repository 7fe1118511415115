//! CLI error handling

use thiserror::Error;

use domain_enrollment::EnrollmentError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Enrollment(#[from] EnrollmentError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<clap::Error> for CliError {
    fn from(error: clap::Error) -> Self {
        let rendered = error.render().to_string();
        let message = rendered.trim_start_matches("error: ").trim_end();
        CliError::InvalidArgument(message.to_string())
    }
}

impl CliError {
    /// Process exit code for this error
    ///
    /// 2 for rejected input, 3 for missing records, 4 for storage faults,
    /// 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgument(_) => 2,
            CliError::Enrollment(e) if e.is_persistence_fault() => 4,
            CliError::Enrollment(EnrollmentError::PersonNotFound(_))
            | CliError::Enrollment(EnrollmentError::NoEnrollment(_)) => 3,
            CliError::Enrollment(EnrollmentError::Port(_)) => 1,
            CliError::Enrollment(_) => 2,
            CliError::Config(_) | CliError::Io(_) | CliError::Json(_) => 1,
        }
    }
}
