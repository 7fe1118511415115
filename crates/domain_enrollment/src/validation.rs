//! Enrollment and registration validation rules
//!
//! Validators here never stop at the first problem: every violated rule is
//! collected so the caller can report all of them at once.
//!
//! # Rules
//!
//! ## Enrollments
//! - The person exists in the directory (the identity number itself is
//!   guaranteed well formed by `PersonId`, which refuses to deserialize
//!   anything else)
//! - Program is offered
//! - At most six courses, no duplicate ids, every id in the catalog
//! - Enrollment date is not in the future and not older than one year
//! - Fewer than six courses is a warning, not an error
//!
//! ## Registrations
//! - Every personal field passes its field rule
//! - The identity number is not already registered

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use core_kernel::{PersonId, PortError, RecordingWindow};

use crate::catalog::Catalog;
use crate::enrollment::{Enrollment, MAX_COURSES};
use crate::person::PersonRegistration;
use crate::ports::PersonDirectory;

/// Outcome of checking a record against every rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// False as soon as one error is recorded
    pub is_valid: bool,
    /// One message per violated rule
    pub errors: Vec<String>,
    /// Findings that do not make the record invalid
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Result holding `errors`; valid only when the list is empty
    pub fn fail(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Folds `other` into this result, keeping message order
    pub fn merge(&mut self, other: ValidationResult) {
        if !other.is_valid {
            self.is_valid = false;
        }
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for enrollment records
///
/// # Examples
///
/// ```rust
/// use chrono::Utc;
/// use core_kernel::{PersonId, RecordingWindow};
/// use domain_enrollment::enrollment::{Enrollment, Shift};
/// use domain_enrollment::validation::EnrollmentValidator;
///
/// let id = PersonId::parse("12345678").unwrap();
/// let enrollment = Enrollment::new(id, "Medicina", Shift::Morning).unwrap();
/// let result = EnrollmentValidator::validate_record(&enrollment, Utc::now(), RecordingWindow::one_year());
///
/// assert!(result.is_valid);
/// assert_eq!(result.warnings.len(), 1);
/// ```
pub struct EnrollmentValidator;

impl EnrollmentValidator {
    /// Validates an enrollment, including the owner lookup in the directory
    ///
    /// # Errors
    ///
    /// Only a directory fault is returned as `Err`; rule violations are
    /// reported inside the `ValidationResult`.
    pub fn validate(
        enrollment: &Enrollment,
        directory: &dyn PersonDirectory,
        now: DateTime<Utc>,
        window: RecordingWindow,
    ) -> Result<ValidationResult, PortError> {
        let mut result = ValidationResult::ok();

        Self::validate_owner(enrollment.person_id(), directory, &mut result)?;
        result.merge(Self::validate_record(enrollment, now, window));

        Ok(result)
    }

    /// Validates the rules that need nothing but the record itself
    pub fn validate_record(
        enrollment: &Enrollment,
        now: DateTime<Utc>,
        window: RecordingWindow,
    ) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if !Catalog::is_valid_program(enrollment.program()) {
            result.add_error(format!("Program not offered: {}", enrollment.program()));
        }

        Self::validate_courses(enrollment, &mut result);

        if let Err(e) = window.check(enrollment.enrollment_date(), now) {
            result.add_error(format!("Invalid enrollment date: {}", e));
        }

        result
    }

    fn validate_owner(
        person_id: &PersonId,
        directory: &dyn PersonDirectory,
        result: &mut ValidationResult,
    ) -> Result<(), PortError> {
        if !directory.exists(person_id)? {
            result.add_error(format!("Person {} is not registered", person_id));
        }
        Ok(())
    }

    fn validate_courses(enrollment: &Enrollment, result: &mut ValidationResult) {
        let courses = enrollment.selected_courses();

        if courses.len() > MAX_COURSES {
            result.add_error(format!(
                "Too many courses: {} selected, at most {} allowed",
                courses.len(),
                MAX_COURSES
            ));
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        for course in courses {
            if !seen.insert(course.id) && reported.insert(course.id) {
                result.add_error(format!("Course {} is selected more than once", course.id));
            }

            match Catalog::find_course(course.id) {
                None => result.add_error(format!("Course {} is not offered", course.id)),
                Some(entry) if entry != *course => {
                    result.add_warning(format!("Course {} differs from the catalog entry", course.id));
                }
                Some(_) => {}
            }
        }

        if courses.len() < MAX_COURSES {
            result.add_warning(format!(
                "Enrollment is incomplete: {}/{} courses selected",
                courses.len(),
                MAX_COURSES
            ));
        }
    }
}

/// Validator for person registrations and detail updates
pub struct PersonValidator;

impl PersonValidator {
    /// Validates a new registration, including the duplicate check
    pub fn validate_registration(
        registration: &PersonRegistration,
        directory: &dyn PersonDirectory,
    ) -> Result<ValidationResult, PortError> {
        let mut result = Self::validate_details(registration);

        if let Ok(id) = PersonId::parse(&registration.identity_number) {
            if directory.exists(&id)? {
                result.add_error(format!("Person {} is already registered", id));
            }
        }

        Ok(result)
    }

    /// Validates the personal fields only
    pub fn validate_details(registration: &PersonRegistration) -> ValidationResult {
        ValidationResult::fail(registration.field_errors())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Months};
    use serde_json::json;

    use crate::enrollment::Shift;
    use crate::ports::mock::MockPersonDirectory;

    fn enrollment() -> Enrollment {
        Enrollment::new(PersonId::parse("12345678").unwrap(), "Derecho", Shift::Afternoon).unwrap()
    }

    fn window() -> RecordingWindow {
        RecordingWindow::one_year()
    }

    /// Builds a stored record directly, bypassing the mutation rules
    fn stored(course_ids: &[u32], date: DateTime<Utc>, program: &str) -> Enrollment {
        let courses: Vec<_> = course_ids
            .iter()
            .map(|id| {
                Catalog::find_course(*id)
                    .map(|c| json!(c))
                    .unwrap_or_else(|| json!({"id": id, "name": "Desconocido", "code": "UNK000", "credits": 1}))
            })
            .collect();

        serde_json::from_value(json!({
            "person_id": "12345678",
            "program": program,
            "shift": "Morning",
            "selected_courses": courses,
            "enrollment_date": date,
            "is_auto_selected": false
        }))
        .unwrap()
    }

    #[test]
    fn test_complete_enrollment_is_valid() {
        let mut enrollment = enrollment();
        for id in 1..=6 {
            enrollment.add_course(id).unwrap();
        }

        let result = EnrollmentValidator::validate_record(&enrollment, Utc::now(), window());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_incomplete_enrollment_warns() {
        let mut enrollment = enrollment();
        enrollment.add_course(1).unwrap();

        let result = EnrollmentValidator::validate_record(&enrollment, Utc::now(), window());
        assert!(result.is_valid);
        assert_eq!(result.warnings, vec!["Enrollment is incomplete: 1/6 courses selected"]);
    }

    #[test]
    fn test_all_violations_are_collected() {
        let now = Utc::now();
        let record = stored(&[1, 1, 2, 3, 4, 5, 42], now + Duration::days(2), "Astrología");

        let result = EnrollmentValidator::validate_record(&record, now, window());
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 5);
        assert!(result.errors.iter().any(|e| e.starts_with("Program not offered")));
        assert!(result.errors.iter().any(|e| e.starts_with("Too many courses")));
        assert!(result.errors.iter().any(|e| e == "Course 1 is selected more than once"));
        assert!(result.errors.iter().any(|e| e == "Course 42 is not offered"));
        assert!(result.errors.iter().any(|e| e.starts_with("Invalid enrollment date")));
    }

    #[test]
    fn test_stale_enrollment_date() {
        let now = Utc::now();
        let old = now.checked_sub_months(Months::new(13)).unwrap();
        let record = stored(&[1, 2, 3, 4, 5, 6], old, "Medicina");

        let result = EnrollmentValidator::validate_record(&record, now, window());
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].contains("older than"));
    }

    #[test]
    fn test_owner_must_exist() {
        let directory = MockPersonDirectory::new();
        let result = EnrollmentValidator::validate(&enrollment(), &directory, Utc::now(), window()).unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Person 12345678 is not registered"]);
    }

    #[test]
    fn test_stored_record_with_bad_identity_number_is_unreadable() {
        let mut value = serde_json::to_value(stored(&[1], Utc::now(), "Medicina")).unwrap();
        value["person_id"] = json!("11111111");
        assert!(serde_json::from_value::<Enrollment>(value.clone()).is_err());

        value["person_id"] = json!("1234-5678");
        let record: Enrollment = serde_json::from_value(value).unwrap();
        assert_eq!(record.person_id().as_str(), "12345678");
    }

    #[test]
    fn test_merge_keeps_failure() {
        let mut result = ValidationResult::ok();
        result.merge(ValidationResult::fail(vec!["first".to_string()]));
        result.merge(ValidationResult::ok());

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(ValidationResult::fail(Vec::new()).is_valid);
    }
}
