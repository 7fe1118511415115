//! Builders for registrations and enrollments
//!
//! Tests name only the fields they care about. `EnrollmentBuilder` can also
//! produce stored records that the public operations would refuse to build,
//! which is how the validator's error paths are reached.

use chrono::{DateTime, Utc};
use serde_json::json;

use core_kernel::PersonId;
use domain_enrollment::{Catalog, Enrollment, PersonRegistration, Shift};

use crate::fixtures::PersonFixtures;

/// Builder for registration input
pub struct RegistrationBuilder {
    registration: PersonRegistration,
}

impl Default for RegistrationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationBuilder {
    /// Starts from a registration that passes every rule
    pub fn new() -> Self {
        Self {
            registration: PersonFixtures::registration(),
        }
    }

    pub fn with_identity_number(mut self, value: impl Into<String>) -> Self {
        self.registration.identity_number = value.into();
        self
    }

    pub fn with_names(mut self, value: impl Into<String>) -> Self {
        self.registration.names = value.into();
        self
    }

    pub fn with_surnames(mut self, value: impl Into<String>) -> Self {
        self.registration.surnames = value.into();
        self
    }

    pub fn with_age(mut self, age: i64) -> Self {
        self.registration.age = age;
        self
    }

    pub fn with_sex(mut self, value: impl Into<String>) -> Self {
        self.registration.sex = value.into();
        self
    }

    pub fn with_phone(mut self, value: impl Into<String>) -> Self {
        self.registration.phone = value.into();
        self
    }

    pub fn with_email(mut self, value: impl Into<String>) -> Self {
        self.registration.email = value.into();
        self
    }

    pub fn with_address(mut self, value: impl Into<String>) -> Self {
        self.registration.address = value.into();
        self
    }

    pub fn build(self) -> PersonRegistration {
        self.registration
    }
}

/// Builder for enrollment records
///
/// [`build`](Self::build) goes through the public operations, so the result
/// always satisfies the enrollment invariants. [`build_stored`](Self::build_stored)
/// produces the record as it could come back from storage: any date, any
/// course ids, duplicates included.
pub struct EnrollmentBuilder {
    person_id: String,
    program: String,
    shift: Shift,
    course_ids: Vec<u32>,
    enrollment_date: Option<DateTime<Utc>>,
    auto_selected: bool,
}

impl Default for EnrollmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EnrollmentBuilder {
    /// Starts from the primary fixture registration
    pub fn new() -> Self {
        Self {
            person_id: PersonFixtures::identity_number().to_string(),
            program: "Medicina".to_string(),
            shift: Shift::Morning,
            course_ids: Vec::new(),
            enrollment_date: None,
            auto_selected: false,
        }
    }

    pub fn with_person_id(mut self, id: &PersonId) -> Self {
        self.person_id = id.to_string();
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_courses(mut self, ids: &[u32]) -> Self {
        self.course_ids = ids.to_vec();
        self
    }

    /// Only honoured by `build_stored`
    pub fn with_enrollment_date(mut self, date: DateTime<Utc>) -> Self {
        self.enrollment_date = Some(date);
        self
    }

    /// Only honoured by `build_stored`
    pub fn auto_selected(mut self) -> Self {
        self.auto_selected = true;
        self
    }

    /// Builds through `Enrollment::new` and `add_course`
    ///
    /// # Panics
    ///
    /// Panics if any step is rejected.
    pub fn build(self) -> Enrollment {
        let id = PersonId::parse(&self.person_id).unwrap();
        let mut enrollment = Enrollment::new(id, &self.program, self.shift).unwrap();
        for course_id in self.course_ids {
            enrollment.add_course(i64::from(course_id)).unwrap();
        }
        enrollment
    }

    /// Builds the raw stored form without applying any rule
    pub fn build_stored(self) -> Enrollment {
        let courses: Vec<_> = self
            .course_ids
            .iter()
            .map(|id| match Catalog::find_course(*id) {
                Some(course) => json!(course),
                None => json!({ "id": id, "name": "Curso Retirado", "code": "RET999", "credits": 3 }),
            })
            .collect();

        serde_json::from_value(json!({
            "person_id": self.person_id,
            "program": self.program,
            "shift": self.shift,
            "selected_courses": courses,
            "enrollment_date": self.enrollment_date.unwrap_or_else(Utc::now),
            "is_auto_selected": self.auto_selected,
        }))
        .unwrap()
    }
}
