//! Port plumbing shared by the directory adapters
//!
//! The domain declares its storage needs as traits (for example
//! `PersonDirectory` in `domain_enrollment`) and every adapter reports
//! failures through [`PortError`]. An in-memory map and a JSON file on disk
//! therefore look the same to the engine:
//!
//! ```text
//!   EnrollmentEngine ──► dyn PersonDirectory ──┬─► InMemoryPersonDirectory
//!                                              └─► JsonFilePersonDirectory
//! ```
//!
//! Calls are synchronous. Each one finishes before the engine moves on.

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Failure reported by a directory adapter
#[derive(Debug, Error)]
pub enum PortError {
    /// Insert of a record whose key is already taken
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Reading or writing the backing store failed
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stored data could not be decoded or encoded
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// An adapter invariant was broken, such as a poisoned lock
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PortError {
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Storage error wrapping the underlying I/O failure
    pub fn storage<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PortError::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error comes from the backing store rather than the request
    pub fn is_storage(&self) -> bool {
        matches!(self, PortError::Storage { .. } | PortError::Transformation { .. })
    }
}

impl From<serde_json::Error> for PortError {
    fn from(error: serde_json::Error) -> Self {
        PortError::Transformation {
            message: error.to_string(),
        }
    }
}

/// Supertrait of every port, so adapters can sit behind `Arc<dyn _>`
pub trait DomainPort: Send + Sync + 'static {}

/// Kind of store behind an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterType {
    /// Process-local map, lost on exit
    InMemory,
    /// Structured text file on disk
    JsonFile,
    /// Scriptable test double
    Mock,
}

/// Coarse adapter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    /// Reads and writes succeed
    Healthy,
    /// Reads succeed, writes are being refused
    Degraded,
    /// The store cannot be read
    Unhealthy,
}

impl std::fmt::Display for AdapterHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterHealth::Healthy => f.write_str("healthy"),
            AdapterHealth::Degraded => f.write_str("degraded"),
            AdapterHealth::Unhealthy => f.write_str("unhealthy"),
        }
    }
}

/// Snapshot returned by [`HealthCheckable::health_check`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    /// Kind of backing store
    pub adapter_type: AdapterType,
    pub status: AdapterHealth,
    /// Free-form detail, such as the record count
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

/// Adapters that can report on their backing store
pub trait HealthCheckable: Send + Sync {
    fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_conflict() {
        let error = PortError::conflict("Person 12345678 already exists");
        assert!(!error.is_storage());
        assert_eq!(error.to_string(), "Conflict: Person 12345678 already exists");
    }

    #[test]
    fn test_port_error_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error = PortError::storage("cannot write persons file", io);
        assert!(error.is_storage());
        assert!(std::error::Error::source(&error).is_some());

        let internal = PortError::internal("lock poisoned");
        assert!(!internal.is_storage());
    }

    #[test]
    fn test_port_error_from_serde() {
        let parse = serde_json::from_str::<Vec<u32>>("[1, 2").unwrap_err();
        let error: PortError = parse.into();
        assert!(matches!(error, PortError::Transformation { .. }));
    }

    #[test]
    fn test_adapter_health_display_matches_serde() {
        for status in [AdapterHealth::Healthy, AdapterHealth::Degraded, AdapterHealth::Unhealthy] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }

    #[test]
    fn test_adapter_type_serialization() {
        let json = serde_json::to_string(&AdapterType::JsonFile).unwrap();
        assert_eq!(json, "\"json_file\"");
    }
}
