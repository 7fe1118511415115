//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for persons, catalog selections and
//! engines. These fixtures are consistent and predictable for unit tests.

use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;

use core_kernel::PersonId;
use domain_enrollment::{
    EnrollmentEngine, InMemoryPersonDirectory, JsonFilePersonDirectory, MockPersonDirectory,
    PersonRegistration,
};

/// Fixture for person test data
pub struct PersonFixtures;

impl PersonFixtures {
    /// Identity number of the primary test student
    pub fn identity_number() -> &'static str {
        "45678912"
    }

    /// Identity number of a second, unrelated student
    pub fn other_identity_number() -> &'static str {
        "31415926"
    }

    pub fn person_id() -> PersonId {
        PersonId::parse(Self::identity_number()).unwrap()
    }

    pub fn other_person_id() -> PersonId {
        PersonId::parse(Self::other_identity_number()).unwrap()
    }

    /// A registration that passes every field rule
    pub fn registration() -> PersonRegistration {
        PersonRegistration {
            identity_number: Self::identity_number().to_string(),
            names: "Ana Lucía".to_string(),
            surnames: "Torres Vega".to_string(),
            age: 18,
            sex: "F".to_string(),
            phone: "987 654 321".to_string(),
            email: "ana.torres@uni.edu.pe".to_string(),
            address: "Jr. Cusco 123, Cercado de Lima".to_string(),
        }
    }

    /// A second valid registration with a different identity number
    pub fn other_registration() -> PersonRegistration {
        PersonRegistration {
            identity_number: Self::other_identity_number().to_string(),
            names: "Diego".to_string(),
            surnames: "Salazar".to_string(),
            age: 24,
            sex: "MASCULINO".to_string(),
            phone: "+51 912-345-678".to_string(),
            email: "diego_salazar@uni.edu.pe".to_string(),
            address: "Av. Arequipa 2450 Dpto. 3B, Lince".to_string(),
        }
    }
}

/// Fixture for catalog selections
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// Ids 1-6, worth 20 credits
    pub fn first_six_ids() -> [i64; 6] {
        [1, 2, 3, 4, 5, 6]
    }

    /// Ids 5-10, worth 15 credits
    pub fn last_six_ids() -> [i64; 6] {
        [5, 6, 7, 8, 9, 10]
    }

    pub fn unknown_course_id() -> i64 {
        11
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Fixed evaluation instant
    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 2, 9, 30, 0).unwrap()
    }

    /// Start of the one-year window ending at `now`
    pub fn window_start() -> DateTime<Utc> {
        Self::now().checked_sub_months(Months::new(12)).unwrap()
    }

    /// A date just outside the window
    pub fn stale() -> DateTime<Utc> {
        Self::window_start() - Duration::seconds(1)
    }

    /// A date after `now`
    pub fn future() -> DateTime<Utc> {
        Self::now() + Duration::days(1)
    }
}

/// Fixture for engines over each directory adapter
pub struct EngineFixtures;

impl EngineFixtures {
    pub fn in_memory() -> EnrollmentEngine {
        EnrollmentEngine::new(Arc::new(InMemoryPersonDirectory::new()))
    }

    /// Engine plus a handle to its mock directory for fault injection
    pub fn mock() -> (EnrollmentEngine, Arc<MockPersonDirectory>) {
        let directory = Arc::new(MockPersonDirectory::new());
        (EnrollmentEngine::new(directory.clone()), directory)
    }

    /// Engine over a JSON file inside a fresh temporary directory
    ///
    /// The directory is removed when the returned `TempDir` is dropped.
    pub fn json_file() -> (EnrollmentEngine, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let directory = JsonFilePersonDirectory::new(dir.path().join("persons.json"));
        (EnrollmentEngine::new(Arc::new(directory)), dir)
    }

    /// In-memory engine with the primary student registered and enrolled in Medicina
    pub fn enrolled() -> EnrollmentEngine {
        let engine = Self::in_memory();
        engine.register_person(PersonFixtures::registration()).unwrap();
        engine
            .create(PersonFixtures::identity_number(), "Medicina", domain_enrollment::Shift::Morning)
            .unwrap();
        engine
    }
}
