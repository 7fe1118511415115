//! Enrollment domain errors
//!
//! This module defines all error types that can occur in the enrollment
//! domain, including validation errors, not found errors and persistence
//! faults surfaced by the person directory.

use thiserror::Error;

use core_kernel::{CoreError, PortError};

/// Errors that can occur in the enrollment domain
#[derive(Debug, Error)]
pub enum EnrollmentError {
    /// Identity number failed validation
    #[error("Invalid identity number: {0}")]
    InvalidIdentityNumber(String),

    /// Program is not part of the catalog
    #[error("Program not offered: {0}")]
    InvalidProgram(String),

    /// Course id is not part of the catalog
    #[error("Course not found: {0}")]
    CourseNotFound(i64),

    /// Course is already part of the selection
    #[error("Course {0} is already selected")]
    DuplicateCourse(u32),

    /// The selection already holds the maximum number of courses
    #[error("Enrollment already has {0} courses")]
    SelectionFull(usize),

    /// A replacement selection failed validation
    #[error("Invalid course selection: {0}")]
    InvalidSelection(String),

    /// Person with the given identity number was not found
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    /// Attempted to register a person that already exists
    #[error("Duplicate person: {0}")]
    DuplicatePerson(String),

    /// Person already holds an enrollment
    #[error("Person {0} already has an enrollment")]
    EnrollmentExists(String),

    /// Person holds no enrollment
    #[error("Person {0} has no enrollment")]
    NoEnrollment(String),

    /// Person or enrollment validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// The person directory reported a fault
    #[error("Directory error: {0}")]
    Port(#[from] PortError),
}

impl EnrollmentError {
    /// Creates a PersonNotFound error from any ID type
    pub fn person_not_found(id: impl std::fmt::Display) -> Self {
        EnrollmentError::PersonNotFound(id.to_string())
    }

    /// Creates a NoEnrollment error from any ID type
    pub fn no_enrollment(id: impl std::fmt::Display) -> Self {
        EnrollmentError::NoEnrollment(id.to_string())
    }

    /// Creates an InvalidSelection error with a message
    pub fn invalid_selection(message: impl Into<String>) -> Self {
        EnrollmentError::InvalidSelection(message.into())
    }

    /// Creates a ValidationFailed error from validation errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        EnrollmentError::ValidationFailed(errors.join("; "))
    }

    /// Returns true if the failure comes from the directory's backing store
    pub fn is_persistence_fault(&self) -> bool {
        matches!(self, EnrollmentError::Port(e) if e.is_storage())
    }
}

impl From<CoreError> for EnrollmentError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidIdentityNumber(raw) => EnrollmentError::InvalidIdentityNumber(raw),
        }
    }
}
