//! Core Kernel - Foundational types and utilities for the enrollment system
//!
//! This crate provides the fundamental building blocks used across the domain:
//! - Identity numbers for persons
//! - Pure field validators for untrusted input
//! - Temporal bounds for recorded timestamps
//! - Port error types shared by every directory adapter

pub mod identifiers;
pub mod validation;
pub mod temporal;
pub mod ports;
pub mod error;

pub use identifiers::PersonId;
pub use temporal::{RecordingWindow, TemporalError};
pub use ports::{
    PortError, DomainPort, AdapterType, AdapterHealth, HealthCheckResult, HealthCheckable,
};
pub use error::CoreError;
