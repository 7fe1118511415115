//! Enrollment engine
//!
//! Orchestrates the enrollment rules against the person directory. Every
//! keyed operation loads the person, applies one rule to a working copy of
//! the enrollment, and writes the person back only when the rule succeeded.
//! A rejected change therefore never reaches the directory.

use chrono::{DateTime, Utc};
use rand::Rng;
use std::sync::Arc;
use tracing::{debug, info, warn};

use core_kernel::{AdapterHealth, HealthCheckResult, PersonId, RecordingWindow};

use crate::catalog::{Catalog, Course};
use crate::enrollment::{Enrollment, Shift};
use crate::error::EnrollmentError;
use crate::person::{Person, PersonRegistration};
use crate::ports::PersonDirectory;
use crate::summary::EnrollmentSummary;
use crate::validation::{EnrollmentValidator, PersonValidator, ValidationResult};

/// Service for registering persons and managing their enrollments
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use domain_enrollment::adapters::InMemoryPersonDirectory;
/// use domain_enrollment::{EnrollmentEngine, PersonRegistration, Shift};
///
/// let engine = EnrollmentEngine::new(Arc::new(InMemoryPersonDirectory::new()));
/// let person = engine.register_person(PersonRegistration {
///     identity_number: "12345678".into(),
///     names: "Ana".into(),
///     surnames: "Torres".into(),
///     age: 18,
///     sex: "F".into(),
///     phone: "987654321".into(),
///     email: "ana@uni.edu".into(),
///     address: "Jr. Cusco 123, Lima".into(),
/// })?;
///
/// engine.create("12345678", "Medicina", Shift::Morning)?;
/// let enrollment = engine.add_course_for(&person.person_id, 1)?;
/// assert_eq!(enrollment.total_credits(), 4);
/// # Ok::<(), domain_enrollment::EnrollmentError>(())
/// ```
pub struct EnrollmentEngine {
    directory: Arc<dyn PersonDirectory>,
    window: RecordingWindow,
}

impl EnrollmentEngine {
    /// Creates an engine over the given directory with a one-year date window
    pub fn new(directory: Arc<dyn PersonDirectory>) -> Self {
        Self {
            directory,
            window: RecordingWindow::one_year(),
        }
    }

    /// Overrides the window used to check enrollment dates
    pub fn with_window(mut self, window: RecordingWindow) -> Self {
        self.window = window;
        self
    }

    pub fn directory(&self) -> &Arc<dyn PersonDirectory> {
        &self.directory
    }

    /// Reports whether the directory's backing store is usable
    pub fn directory_health(&self) -> HealthCheckResult {
        let health = self.directory.health_check();
        if health.status != AdapterHealth::Healthy {
            warn!(adapter = %health.adapter_id, status = ?health.status, "Person directory is not healthy");
        }
        health
    }

    // ---- Persons ----

    /// Validates and stores a new person
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` listing every invalid field
    /// - `DuplicatePerson` if the identity number is already registered
    pub fn register_person(&self, registration: PersonRegistration) -> Result<Person, EnrollmentError> {
        let result = PersonValidator::validate_registration(&registration, self.directory.as_ref())?;
        if !result.is_valid {
            debug!(errors = ?result.errors, "Registration rejected");
            if registration.field_errors().is_empty() {
                return Err(EnrollmentError::DuplicatePerson(registration.identity_number.clone()));
            }
            return Err(EnrollmentError::validation_failed(result.errors));
        }

        let person = registration.into_person()?;
        self.directory.insert(person.clone()).map_err(|e| {
            warn!(person_id = %person.person_id, error = %e, "Failed to store person");
            EnrollmentError::from(e)
        })?;

        info!(person_id = %person.person_id, "Registered person");
        Ok(person)
    }

    /// Replaces the personal details of an existing person
    ///
    /// The identity number in the input selects the person. The enrollment
    /// is left as it is.
    pub fn update_person_details(&self, registration: PersonRegistration) -> Result<Person, EnrollmentError> {
        let person_id = PersonId::parse(&registration.identity_number)?;
        let mut person = self.find_person(&person_id)?;

        let details = registration.into_details().map_err(|e| {
            debug!(person_id = %person_id, error = %e, "Detail update rejected");
            e
        })?;
        person.apply_details(details);
        self.persist(&person)?;

        info!(person_id = %person_id, "Updated personal details");
        Ok(person)
    }

    /// Loads a person or fails with `PersonNotFound`
    pub fn find_person(&self, person_id: &PersonId) -> Result<Person, EnrollmentError> {
        self.directory
            .find_by_person_id(person_id)?
            .ok_or_else(|| EnrollmentError::person_not_found(person_id))
    }

    // ---- Enrollment lifecycle ----

    /// Creates an empty enrollment for a registered person without one
    ///
    /// # Errors
    ///
    /// - `InvalidIdentityNumber` if the raw id is malformed
    /// - `InvalidProgram` if the program is not offered
    /// - `PersonNotFound` if no such person is registered
    /// - `EnrollmentExists` if the person already has an enrollment
    pub fn create(&self, person_id: &str, program: &str, shift: Shift) -> Result<Enrollment, EnrollmentError> {
        let person_id = PersonId::parse(person_id)?;
        if !Catalog::is_valid_program(program) {
            debug!(person_id = %person_id, program, "Enrollment rejected: unknown program");
            return Err(EnrollmentError::InvalidProgram(program.to_string()));
        }

        let mut person = self.find_person(&person_id)?;
        if person.has_enrollment() {
            debug!(person_id = %person_id, "Enrollment rejected: already enrolled");
            return Err(EnrollmentError::EnrollmentExists(person_id.to_string()));
        }

        let enrollment = Enrollment::new(person_id.clone(), program, shift)?;
        person.enrollment = Some(enrollment.clone());
        self.persist(&person)?;

        info!(person_id = %person_id, program = enrollment.program(), shift = %shift, "Created enrollment");
        Ok(enrollment)
    }

    /// Attaches a fully built enrollment record to its person
    ///
    /// The record is checked against every enrollment rule first, so it can
    /// carry courses and a date of its own.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` listing every violated rule, an unregistered
    ///   owner included
    /// - `EnrollmentExists` if the person already has an enrollment
    pub fn create_from(&self, enrollment: Enrollment) -> Result<Enrollment, EnrollmentError> {
        let result = self.validate_enrollment(&enrollment)?;
        if !result.is_valid {
            return Err(EnrollmentError::validation_failed(result.errors));
        }

        let person_id = enrollment.person_id().clone();
        let mut person = self.find_person(&person_id)?;
        if person.has_enrollment() {
            debug!(person_id = %person_id, "Enrollment rejected: already enrolled");
            return Err(EnrollmentError::EnrollmentExists(person_id.to_string()));
        }

        person.enrollment = Some(enrollment.clone());
        self.persist(&person)?;

        info!(person_id = %person_id, courses = enrollment.course_count(), "Created enrollment from record");
        Ok(enrollment)
    }

    /// Returns the person's enrollment, or `None` if the person has none or is unknown
    pub fn find_enrollment(&self, person_id: &PersonId) -> Result<Option<Enrollment>, EnrollmentError> {
        Ok(self
            .directory
            .find_by_person_id(person_id)?
            .and_then(|p| p.enrollment))
    }

    pub fn has_enrollment(&self, person_id: &PersonId) -> Result<bool, EnrollmentError> {
        Ok(self.find_enrollment(person_id)?.is_some())
    }

    /// Removes the person's enrollment
    ///
    /// Returns `false` when there was nothing to delete.
    pub fn delete_enrollment(&self, person_id: &PersonId) -> Result<bool, EnrollmentError> {
        let mut person = self.find_person(person_id)?;
        if person.enrollment.take().is_none() {
            debug!(person_id = %person_id, "No enrollment to delete");
            return Ok(false);
        }

        self.persist(&person)?;
        info!(person_id = %person_id, "Deleted enrollment");
        Ok(true)
    }

    // ---- Course selection ----

    pub fn add_course_for(&self, person_id: &PersonId, course_id: i64) -> Result<Enrollment, EnrollmentError> {
        let enrollment = self.modify(person_id, |e| e.add_course(course_id))?;
        info!(person_id = %person_id, course_id, count = enrollment.course_count(), "Added course");
        Ok(enrollment)
    }

    /// Removes a course; removing an unselected course succeeds
    ///
    /// Ids outside the catalog are accepted so a stored record holding a
    /// retired course can be repaired.
    ///
    /// # Errors
    ///
    /// Fails with `CourseNotFound` only if the id is not a positive integer.
    pub fn remove_course_for(&self, person_id: &PersonId, course_id: i64) -> Result<Enrollment, EnrollmentError> {
        let enrollment = self.modify(person_id, |e| {
            let id = u32::try_from(course_id)
                .ok()
                .filter(|id| *id > 0)
                .ok_or(EnrollmentError::CourseNotFound(course_id))?;
            e.remove_course(id);
            Ok(())
        })?;
        info!(person_id = %person_id, course_id, count = enrollment.course_count(), "Removed course");
        Ok(enrollment)
    }

    /// Replaces the whole selection with the given course ids
    pub fn replace_courses_for(&self, person_id: &PersonId, course_ids: &[i64]) -> Result<Enrollment, EnrollmentError> {
        let candidate = Self::resolve_courses(course_ids)?;
        let enrollment = self.modify(person_id, |e| e.replace_all_courses(&candidate))?;
        info!(person_id = %person_id, credits = enrollment.total_credits(), "Replaced course selection");
        Ok(enrollment)
    }

    /// Randomly selects up to six courses not selected before the call
    pub fn auto_select_for<R: Rng + ?Sized>(
        &self,
        person_id: &PersonId,
        rng: &mut R,
    ) -> Result<Enrollment, EnrollmentError> {
        let enrollment = self.modify(person_id, |e| {
            e.auto_select(rng);
            Ok(())
        })?;
        info!(person_id = %person_id, count = enrollment.course_count(), "Auto-selected courses");
        Ok(enrollment)
    }

    pub fn update_shift(&self, person_id: &PersonId, shift: Shift) -> Result<Enrollment, EnrollmentError> {
        let enrollment = self.modify(person_id, |e| {
            e.update_shift(shift);
            Ok(())
        })?;
        info!(person_id = %person_id, shift = %shift, "Updated shift");
        Ok(enrollment)
    }

    pub fn update_program(&self, person_id: &PersonId, program: &str) -> Result<Enrollment, EnrollmentError> {
        let enrollment = self.modify(person_id, |e| e.update_program(program))?;
        info!(person_id = %person_id, program = enrollment.program(), "Updated program");
        Ok(enrollment)
    }

    // ---- Queries ----

    /// Catalog courses the person has not selected yet
    ///
    /// Without an enrollment this is the full catalog.
    pub fn available_courses_for(&self, person_id: &PersonId) -> Result<Vec<Course>, EnrollmentError> {
        let person = self.find_person(person_id)?;
        Ok(match person.enrollment {
            Some(enrollment) => enrollment.available_courses(),
            None => Catalog::courses(),
        })
    }

    /// Whether the person's enrollment has all six courses; false without one
    pub fn is_complete_for(&self, person_id: &PersonId) -> Result<bool, EnrollmentError> {
        Ok(self
            .find_enrollment(person_id)?
            .map_or(false, |e| e.is_complete()))
    }

    pub fn summary_for(&self, person_id: &PersonId) -> Result<EnrollmentSummary, EnrollmentError> {
        let enrollment = self.load_enrollment(person_id)?;
        Ok(EnrollmentSummary::from(&enrollment))
    }

    /// Validates an enrollment against every rule, as of now
    pub fn validate_enrollment(&self, enrollment: &Enrollment) -> Result<ValidationResult, EnrollmentError> {
        self.validate_enrollment_at(enrollment, Utc::now())
    }

    /// Validates an enrollment against every rule, as of `now`
    pub fn validate_enrollment_at(
        &self,
        enrollment: &Enrollment,
        now: DateTime<Utc>,
    ) -> Result<ValidationResult, EnrollmentError> {
        let result = EnrollmentValidator::validate(enrollment, self.directory.as_ref(), now, self.window)?;
        if !result.is_valid {
            debug!(person_id = %enrollment.person_id(), errors = ?result.errors, "Enrollment failed validation");
        }
        Ok(result)
    }

    /// Validates the stored enrollment of a person
    pub fn validate_for(&self, person_id: &PersonId) -> Result<ValidationResult, EnrollmentError> {
        let enrollment = self.load_enrollment(person_id)?;
        self.validate_enrollment(&enrollment)
    }

    // ---- Internals ----

    fn load_enrollment(&self, person_id: &PersonId) -> Result<Enrollment, EnrollmentError> {
        self.find_person(person_id)?
            .enrollment
            .ok_or_else(|| EnrollmentError::no_enrollment(person_id))
    }

    /// Applies one change to a working copy and persists it on success
    fn modify<F>(&self, person_id: &PersonId, change: F) -> Result<Enrollment, EnrollmentError>
    where
        F: FnOnce(&mut Enrollment) -> Result<(), EnrollmentError>,
    {
        let mut person = self.find_person(person_id)?;
        let enrollment = person
            .enrollment
            .as_mut()
            .ok_or_else(|| EnrollmentError::no_enrollment(person_id))?;

        if let Err(e) = change(enrollment) {
            debug!(person_id = %person_id, error = %e, "Enrollment change rejected");
            return Err(e);
        }

        let updated = enrollment.clone();
        self.persist(&person)?;
        Ok(updated)
    }

    fn persist(&self, person: &Person) -> Result<(), EnrollmentError> {
        match self.directory.update(person) {
            Ok(true) => Ok(()),
            Ok(false) => Err(EnrollmentError::person_not_found(&person.person_id)),
            Err(e) => {
                warn!(person_id = %person.person_id, error = %e, "Failed to persist person");
                Err(e.into())
            }
        }
    }

    fn resolve_courses(course_ids: &[i64]) -> Result<Vec<Course>, EnrollmentError> {
        course_ids
            .iter()
            .map(|raw| {
                u32::try_from(*raw)
                    .ok()
                    .and_then(Catalog::find_course)
                    .ok_or_else(|| EnrollmentError::invalid_selection(format!("course {} is not offered", raw)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockPersonDirectory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn registration(id: &str) -> PersonRegistration {
        PersonRegistration {
            identity_number: id.to_string(),
            names: "Carmen".to_string(),
            surnames: "Flores Díaz".to_string(),
            age: 21,
            sex: "F".to_string(),
            phone: "945678123".to_string(),
            email: "carmen@uni.edu".to_string(),
            address: "Calle Lima 321, Arequipa".to_string(),
        }
    }

    fn engine() -> (EnrollmentEngine, Arc<MockPersonDirectory>) {
        let directory = Arc::new(MockPersonDirectory::new());
        (EnrollmentEngine::new(directory.clone()), directory)
    }

    fn enrolled(engine: &EnrollmentEngine) -> PersonId {
        let person = engine.register_person(registration("76543210")).unwrap();
        engine.create("76543210", "Medicina", Shift::Morning).unwrap();
        person.person_id
    }

    #[test]
    fn test_register_duplicate_person() {
        let (engine, _) = engine();
        engine.register_person(registration("76543210")).unwrap();

        let result = engine.register_person(registration("7654-3210"));
        assert!(matches!(result, Err(EnrollmentError::DuplicatePerson(_))));
    }

    #[test]
    fn test_register_reports_fields_and_duplicate_together() {
        let (engine, _) = engine();
        engine.register_person(registration("76543210")).unwrap();

        let mut invalid = registration("76543210");
        invalid.email = "broken".to_string();
        match engine.register_person(invalid) {
            Err(EnrollmentError::ValidationFailed(message)) => {
                assert!(message.contains("Email"));
                assert!(message.contains("already registered"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_create_requires_registered_person() {
        let (engine, _) = engine();
        let result = engine.create("76543210", "Medicina", Shift::Morning);
        assert!(matches!(result, Err(EnrollmentError::PersonNotFound(_))));
    }

    #[test]
    fn test_create_validates_inputs() {
        let (engine, _) = engine();
        engine.register_person(registration("76543210")).unwrap();

        assert!(matches!(
            engine.create("11111111", "Medicina", Shift::Morning),
            Err(EnrollmentError::InvalidIdentityNumber(_))
        ));
        assert!(matches!(
            engine.create("76543210", "Cocina", Shift::Morning),
            Err(EnrollmentError::InvalidProgram(_))
        ));
    }

    #[test]
    fn test_second_create_fails() {
        let (engine, _) = engine();
        enrolled(&engine);

        let result = engine.create("76543210", "Derecho", Shift::Afternoon);
        assert!(matches!(result, Err(EnrollmentError::EnrollmentExists(_))));
    }

    #[test]
    fn test_rejected_change_is_not_persisted() {
        let (engine, _) = engine();
        let id = enrolled(&engine);
        engine.replace_courses_for(&id, &[1, 2, 3, 4, 5, 6]).unwrap();

        assert!(engine.add_course_for(&id, 7).is_err());
        assert!(engine.replace_courses_for(&id, &[1, 1, 2, 3, 4, 5]).is_err());

        let stored = engine.find_enrollment(&id).unwrap().unwrap();
        let ids: Vec<u32> = stored.selected_courses().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_remove_course_for() {
        let (engine, _) = engine();
        let id = enrolled(&engine);
        engine.add_course_for(&id, 3).unwrap();

        assert_eq!(engine.remove_course_for(&id, 3).unwrap().course_count(), 0);
        assert!(engine.remove_course_for(&id, 3).is_ok());
        assert!(matches!(
            engine.remove_course_for(&id, 0),
            Err(EnrollmentError::CourseNotFound(0))
        ));
        assert!(matches!(
            engine.remove_course_for(&id, -4),
            Err(EnrollmentError::CourseNotFound(-4))
        ));
        assert!(engine.remove_course_for(&id, 42).is_ok());
    }

    #[test]
    fn test_create_from_full_record() {
        let (engine, _) = engine();
        let person = engine.register_person(registration("76543210")).unwrap();

        let mut record = Enrollment::new(person.person_id.clone(), "Derecho", Shift::Afternoon).unwrap();
        for course_id in [2, 4, 6] {
            record.add_course(course_id).unwrap();
        }

        let created = engine.create_from(record.clone()).unwrap();
        assert_eq!(created, record);
        assert_eq!(engine.find_enrollment(&person.person_id).unwrap(), Some(record.clone()));

        assert!(matches!(
            engine.create_from(record),
            Err(EnrollmentError::EnrollmentExists(_))
        ));
    }

    #[test]
    fn test_create_from_rejects_unregistered_owner() {
        let (engine, directory) = engine();
        let record = Enrollment::new(PersonId::parse("76543210").unwrap(), "Medicina", Shift::Morning).unwrap();

        match engine.create_from(record) {
            Err(EnrollmentError::ValidationFailed(message)) => assert!(message.contains("not registered")),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(directory.list().unwrap().is_empty());
    }

    #[test]
    fn test_directory_health_follows_adapter() {
        let (engine, directory) = engine();
        assert_eq!(engine.directory_health().status, AdapterHealth::Healthy);

        directory.set_fail_writes(true);
        assert_eq!(engine.directory_health().status, AdapterHealth::Degraded);
    }

    #[test]
    fn test_keyed_operations_without_enrollment() {
        let (engine, _) = engine();
        let person = engine.register_person(registration("76543210")).unwrap();

        assert!(matches!(
            engine.add_course_for(&person.person_id, 1),
            Err(EnrollmentError::NoEnrollment(_))
        ));
        assert!(!engine.delete_enrollment(&person.person_id).unwrap());
        assert_eq!(engine.available_courses_for(&person.person_id).unwrap().len(), 10);
        assert!(!engine.is_complete_for(&person.person_id).unwrap());
    }

    #[test]
    fn test_persistence_fault_leaves_store_unchanged() {
        let (engine, directory) = engine();
        let id = enrolled(&engine);

        directory.set_fail_writes(true);
        let error = engine.add_course_for(&id, 1).unwrap_err();
        assert!(error.is_persistence_fault());

        directory.set_fail_writes(false);
        assert_eq!(engine.find_enrollment(&id).unwrap().unwrap().course_count(), 0);
    }

    #[test]
    fn test_auto_select_for_persists_selection() {
        let (engine, _) = engine();
        let id = enrolled(&engine);

        let enrollment = engine.auto_select_for(&id, &mut StdRng::seed_from_u64(11)).unwrap();
        assert!(enrollment.is_complete());
        assert!(engine.is_complete_for(&id).unwrap());
        assert_eq!(engine.find_enrollment(&id).unwrap().unwrap(), enrollment);
    }

    #[test]
    fn test_update_details_keeps_enrollment() {
        let (engine, _) = engine();
        let id = enrolled(&engine);

        let mut update = registration("76543210");
        update.phone = "+51 944 555 666".to_string();
        let person = engine.update_person_details(update).unwrap();

        assert_eq!(person.phone, "+51 944 555 666");
        assert!(person.has_enrollment());
        assert_eq!(engine.find_person(&id).unwrap(), person);
    }
}
