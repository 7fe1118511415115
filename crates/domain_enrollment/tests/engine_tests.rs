//! Engine tests over each person directory adapter

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use core_kernel::{HealthCheckable, AdapterHealth, RecordingWindow};
use domain_enrollment::{
    EnrollmentEngine, EnrollmentError, EnrollmentValidator, InMemoryPersonDirectory,
    JsonFilePersonDirectory, PersonDirectory, SelectionMode, Shift,
};
use test_utils::{
    assert_course_set, assert_has_error, assert_has_warning, assert_valid, CatalogFixtures,
    EngineFixtures, EnrollmentBuilder, PersonFixtures, RegistrationBuilder, TemporalFixtures,
};

// ============================================================================
// Registration Tests
// ============================================================================

mod registration_tests {
    use super::*;

    #[test]
    fn test_register_and_find() {
        let engine = EngineFixtures::in_memory();
        let person = engine.register_person(PersonFixtures::registration()).unwrap();

        assert_eq!(person.full_name(), "Ana Lucía Torres Vega");
        assert_eq!(engine.find_person(&PersonFixtures::person_id()).unwrap(), person);
        assert!(!engine.has_enrollment(&person.person_id).unwrap());
    }

    #[test]
    fn test_register_collects_every_field_error() {
        let engine = EngineFixtures::in_memory();
        let registration = RegistrationBuilder::new()
            .with_names("  ")
            .with_age(12)
            .with_phone("999999999")
            .build();

        match engine.register_person(registration) {
            Err(EnrollmentError::ValidationFailed(message)) => {
                assert_eq!(message.split("; ").count(), 3, "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_update_details_of_unknown_person() {
        let engine = EngineFixtures::in_memory();
        let result = engine.update_person_details(PersonFixtures::other_registration());
        assert!(matches!(result, Err(EnrollmentError::PersonNotFound(_))));
    }
}

// ============================================================================
// Enrollment Lifecycle Tests
// ============================================================================

mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_delete_then_create_again() {
        let engine = EngineFixtures::enrolled();
        let id = PersonFixtures::person_id();

        assert!(engine.delete_enrollment(&id).unwrap());
        assert!(!engine.delete_enrollment(&id).unwrap());
        assert!(engine.find_enrollment(&id).unwrap().is_none());

        let enrollment = engine.create(id.as_str(), "Arquitectura", Shift::Afternoon).unwrap();
        assert_eq!(enrollment.program(), "Arquitectura");
    }

    #[test]
    fn test_update_shift_and_program() {
        let engine = EngineFixtures::enrolled();
        let id = PersonFixtures::person_id();
        engine.replace_courses_for(&id, &CatalogFixtures::last_six_ids()).unwrap();

        engine.update_shift(&id, Shift::Afternoon).unwrap();
        let enrollment = engine.update_program(&id, "Contabilidad").unwrap();

        assert_eq!(enrollment.shift(), Shift::Afternoon);
        assert_eq!(enrollment.program(), "Contabilidad");
        assert_eq!(enrollment.total_credits(), 15);

        assert!(matches!(
            engine.update_program(&id, "Gastronomía"),
            Err(EnrollmentError::InvalidProgram(_))
        ));
        assert_eq!(engine.find_enrollment(&id).unwrap().unwrap().program(), "Contabilidad");
    }

    #[test]
    fn test_replace_with_unknown_course() {
        let engine = EngineFixtures::enrolled();
        let id = PersonFixtures::person_id();
        let ids = [1, 2, 3, 4, 5, CatalogFixtures::unknown_course_id()];

        assert!(matches!(
            engine.replace_courses_for(&id, &ids),
            Err(EnrollmentError::InvalidSelection(_))
        ));
    }

    #[test]
    fn test_operations_on_unknown_person() {
        let engine = EngineFixtures::in_memory();
        let id = PersonFixtures::other_person_id();

        assert!(matches!(engine.add_course_for(&id, 1), Err(EnrollmentError::PersonNotFound(_))));
        assert!(matches!(engine.summary_for(&id), Err(EnrollmentError::PersonNotFound(_))));
        assert!(engine.find_enrollment(&id).unwrap().is_none());
    }

    #[test]
    fn test_auto_select_on_full_enrollment_takes_remaining_pool() {
        let engine = EngineFixtures::enrolled();
        let id = PersonFixtures::person_id();
        engine.replace_courses_for(&id, &CatalogFixtures::first_six_ids()).unwrap();

        let enrollment = engine.auto_select_for(&id, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_course_set(&enrollment, &[7, 8, 9, 10]);
        assert_eq!(enrollment.selection_mode(), SelectionMode::Automatic);
        assert!(!engine.is_complete_for(&id).unwrap());
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_stored_enrollment_validation() {
        let engine = EngineFixtures::enrolled();
        let id = PersonFixtures::person_id();
        engine.add_course_for(&id, 4).unwrap();

        let result = engine.validate_for(&id).unwrap();
        assert_valid(&result);
        assert_has_warning(&result, "1/6");
    }

    #[test]
    fn test_validation_against_fixed_instant() {
        let engine = EngineFixtures::enrolled();
        let record = EnrollmentBuilder::new()
            .with_courses(&[1, 2, 3, 4, 5, 6])
            .with_enrollment_date(TemporalFixtures::window_start())
            .build_stored();

        let result = engine.validate_enrollment_at(&record, TemporalFixtures::now()).unwrap();
        assert_valid(&result);
        assert!(result.warnings.is_empty());

        let stale = EnrollmentBuilder::new()
            .with_courses(&[1, 2, 3, 4, 5, 6])
            .with_enrollment_date(TemporalFixtures::stale())
            .build_stored();
        let result = engine.validate_enrollment_at(&stale, TemporalFixtures::now()).unwrap();
        assert_has_error(&result, "older than");
    }

    #[test]
    fn test_future_date_and_unknown_owner() {
        let directory = InMemoryPersonDirectory::new();
        let record = EnrollmentBuilder::new()
            .with_enrollment_date(TemporalFixtures::future())
            .build_stored();

        let result = EnrollmentValidator::validate(
            &record,
            &directory,
            TemporalFixtures::now(),
            RecordingWindow::one_year(),
        )
        .unwrap();

        assert_eq!(result.errors.len(), 2);
        assert_has_error(&result, "not registered");
        assert_has_error(&result, "in the future");
    }

    #[test]
    fn test_retired_course_in_stored_record() {
        let engine = EngineFixtures::enrolled();
        let record = EnrollmentBuilder::new()
            .with_courses(&[1, 2, 3, 4, 5, 12])
            .build_stored();

        let result = engine.validate_enrollment(&record).unwrap();
        assert_has_error(&result, "Course 12 is not offered");
    }

    #[test]
    fn test_retired_course_can_be_removed() {
        let (engine, directory) = EngineFixtures::mock();
        let mut person = PersonFixtures::registration().into_person().unwrap();
        person.enrollment = Some(EnrollmentBuilder::new().with_courses(&[1, 42]).build_stored());
        directory.insert(person).unwrap();

        let id = PersonFixtures::person_id();
        assert_has_error(&engine.validate_for(&id).unwrap(), "Course 42 is not offered");

        let repaired = engine.remove_course_for(&id, 42).unwrap();
        assert_course_set(&repaired, &[1]);
        assert_valid(&engine.validate_for(&id).unwrap());
    }

    #[test]
    fn test_create_from_rejects_invalid_record() {
        let engine = EngineFixtures::in_memory();
        engine.register_person(PersonFixtures::registration()).unwrap();
        let record = EnrollmentBuilder::new()
            .with_courses(&[1, 2, 2])
            .with_enrollment_date(TemporalFixtures::stale())
            .build_stored();

        match engine.create_from(record) {
            Err(EnrollmentError::ValidationFailed(message)) => {
                assert!(message.contains("Course 2 is selected more than once"));
                assert!(message.contains("older than"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!engine.has_enrollment(&PersonFixtures::person_id()).unwrap());
    }
}

// ============================================================================
// Adapter Tests
// ============================================================================

mod adapter_tests {
    use super::*;

    #[test]
    fn test_json_file_survives_reopen() {
        let (engine, dir) = EngineFixtures::json_file();
        let id = PersonFixtures::person_id();
        engine.register_person(PersonFixtures::registration()).unwrap();
        engine.create(id.as_str(), "Psicología", Shift::Afternoon).unwrap();
        engine.replace_courses_for(&id, &CatalogFixtures::first_six_ids()).unwrap();

        let reopened = EnrollmentEngine::new(Arc::new(JsonFilePersonDirectory::new(
            dir.path().join("persons.json"),
        )));
        let enrollment = reopened.find_enrollment(&id).unwrap().unwrap();

        assert_eq!(enrollment.program(), "Psicología");
        assert_eq!(enrollment.total_credits(), 20);
        assert!(reopened.is_complete_for(&id).unwrap());
        assert!(matches!(
            reopened.create(id.as_str(), "Medicina", Shift::Morning),
            Err(EnrollmentError::EnrollmentExists(_))
        ));
    }

    #[test]
    fn test_json_file_keeps_other_persons() {
        let (engine, dir) = EngineFixtures::json_file();
        engine.register_person(PersonFixtures::registration()).unwrap();
        engine.register_person(PersonFixtures::other_registration()).unwrap();
        engine
            .create(PersonFixtures::other_identity_number(), "Derecho", Shift::Morning)
            .unwrap();

        let directory = JsonFilePersonDirectory::new(dir.path().join("persons.json"));
        let persons = directory.list().unwrap();
        assert_eq!(persons.len(), 2);
        assert!(!persons[0].has_enrollment());
        assert!(persons[1].has_enrollment());
        assert_eq!(directory.health_check().status, AdapterHealth::Healthy);
    }

    #[test]
    fn test_mock_write_failure_is_reported() {
        let (engine, directory) = EngineFixtures::mock();
        directory.set_fail_writes(true);

        let error = engine.register_person(PersonFixtures::registration()).unwrap_err();
        assert!(error.is_persistence_fault());
        assert!(directory.list().unwrap().is_empty());
    }
}
