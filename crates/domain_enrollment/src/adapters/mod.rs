//! Person directory adapters
//!
//! Implementations of the `PersonDirectory` port. All of them satisfy the
//! same contract, so the engine behaves identically on top of any of them.
//!
//! # Available Adapters
//!
//! - **InMemoryPersonDirectory**: process-local map
//! - **JsonFilePersonDirectory**: single JSON file on disk
//! - **MockPersonDirectory**: in-memory with injectable write failures
//!   (re-exported from the ports module, `mock` feature)
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_enrollment::adapters::JsonFilePersonDirectory;
//! use domain_enrollment::PersonDirectory;
//! use std::sync::Arc;
//!
//! let adapter = JsonFilePersonDirectory::new("data/persons.json");
//! let port: Arc<dyn PersonDirectory> = Arc::new(adapter);
//! ```

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryPersonDirectory;
pub use json_file::JsonFilePersonDirectory;
