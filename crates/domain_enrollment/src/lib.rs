//! Enrollment Domain
//!
//! This crate holds the rules for university course registration: the
//! fixed course and program catalog, the enrollment record with its
//! selection operations, person registration, and the engine that applies
//! all of it against a person directory.
//!
//! # Enrollment Model
//!
//! - A person is keyed by identity number and owns at most one enrollment
//! - An enrollment names a program and a shift and holds up to six courses
//! - Courses are unique within an enrollment and always come from the catalog
//! - Six courses make an enrollment complete
//!
//! Courses can be chosen one by one, replaced as a full set of six, or
//! drawn at random. Every operation either applies completely or leaves the
//! enrollment as it was.
//!
//! # Examples
//!
//! ```rust
//! use core_kernel::PersonId;
//! use domain_enrollment::{Enrollment, Shift};
//!
//! let id = PersonId::parse("1234-5678").unwrap();
//! let mut enrollment = Enrollment::new(id, "Ingeniería de Sistemas", Shift::Morning).unwrap();
//!
//! enrollment.add_course(1).unwrap();
//! enrollment.add_course(4).unwrap();
//! assert!(enrollment.add_course(4).is_err());
//!
//! assert_eq!(enrollment.total_credits(), 8);
//! assert!(!enrollment.is_complete());
//! ```

pub mod catalog;
pub mod enrollment;
pub mod person;
pub mod error;
pub mod validation;
pub mod summary;
pub mod ports;
pub mod adapters;
pub mod engine;

pub use catalog::{Catalog, Course};
pub use enrollment::{Enrollment, SelectionMode, Shift, MAX_COURSES};
pub use person::{Person, PersonRegistration, Sex};
pub use error::EnrollmentError;
pub use validation::{EnrollmentValidator, PersonValidator, ValidationResult};
pub use summary::EnrollmentSummary;
pub use ports::PersonDirectory;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockPersonDirectory;
pub use adapters::{InMemoryPersonDirectory, JsonFilePersonDirectory};
pub use engine::EnrollmentEngine;
