//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use std::collections::HashSet;

use domain_enrollment::{Catalog, Enrollment, ValidationResult, MAX_COURSES};

/// Asserts every structural enrollment invariant
///
/// # Panics
///
/// Panics if the selection is over six courses, holds a duplicate id or an
/// id outside the catalog, or if the program is not offered.
pub fn assert_enrollment_invariants(enrollment: &Enrollment) {
    let courses = enrollment.selected_courses();
    assert!(
        courses.len() <= MAX_COURSES,
        "Expected at most {} courses, got {}",
        MAX_COURSES,
        courses.len()
    );

    let mut seen = HashSet::new();
    for course in courses {
        assert!(seen.insert(course.id), "Course {} is selected twice", course.id);
        assert!(
            Catalog::contains_course(course.id),
            "Course {} is not in the catalog",
            course.id
        );
    }

    assert!(
        Catalog::is_valid_program(enrollment.program()),
        "Program {} is not offered",
        enrollment.program()
    );
}

/// Asserts the selected ids, in order
pub fn assert_course_ids(enrollment: &Enrollment, expected: &[u32]) {
    let actual: Vec<u32> = enrollment.selected_courses().iter().map(|c| c.id).collect();
    assert_eq!(actual, expected, "Selected course ids differ");
}

/// Asserts the selected ids, ignoring order
pub fn assert_course_set(enrollment: &Enrollment, expected: &[u32]) {
    let actual: HashSet<u32> = enrollment.selected_courses().iter().map(|c| c.id).collect();
    let expected: HashSet<u32> = expected.iter().copied().collect();
    assert_eq!(actual, expected, "Selected course sets differ");
}

/// Asserts a validation result has no errors
pub fn assert_valid(result: &ValidationResult) {
    assert!(
        result.is_valid && result.errors.is_empty(),
        "Expected a valid result, got errors: {:?}",
        result.errors
    );
}

/// Asserts a validation result holds an error containing `needle`
pub fn assert_has_error(result: &ValidationResult, needle: &str) {
    assert!(!result.is_valid, "Expected an invalid result");
    assert!(
        result.errors.iter().any(|e| e.contains(needle)),
        "No error contains {:?}; errors: {:?}",
        needle,
        result.errors
    );
}

/// Asserts a validation result holds a warning containing `needle`
pub fn assert_has_warning(result: &ValidationResult, needle: &str) {
    assert!(
        result.warnings.iter().any(|w| w.contains(needle)),
        "No warning contains {:?}; warnings: {:?}",
        needle,
        result.warnings
    );
}
