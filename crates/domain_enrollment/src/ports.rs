//! Enrollment Domain Ports
//!
//! This module defines the port the enrollment domain needs from its
//! persistence layer: a directory of person records keyed by identity
//! number. The engine only ever sees this trait, so the backing store can
//! be swapped without touching the selection rules.
//!
//! # Architecture
//!
//! - **In-memory Adapter**: process-local map, lost on exit
//! - **JSON File Adapter**: whole-file read and rewrite per operation
//! - **Mock Adapter**: in-memory with switchable write failures, for testing
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use domain_enrollment::adapters::InMemoryPersonDirectory;
//! use domain_enrollment::{EnrollmentEngine, PersonDirectory};
//!
//! let directory: Arc<dyn PersonDirectory> = Arc::new(InMemoryPersonDirectory::new());
//! let engine = EnrollmentEngine::new(directory);
//! ```

use core_kernel::{DomainPort, HealthCheckable, PersonId, PortError};

use crate::person::Person;

/// Person directory port
///
/// Owns the one-enrollment-per-person relationship: the enrollment is
/// stored inside its person record and written back with [`update`].
/// Every adapter also reports on its backing store through
/// [`HealthCheckable`].
///
/// [`update`]: PersonDirectory::update
pub trait PersonDirectory: DomainPort + HealthCheckable {
    /// Looks up a person by identity number
    fn find_by_person_id(&self, id: &PersonId) -> Result<Option<Person>, PortError>;

    /// Checks whether a person with this identity number is stored
    fn exists(&self, id: &PersonId) -> Result<bool, PortError> {
        Ok(self.find_by_person_id(id)?.is_some())
    }

    /// Stores a new person
    ///
    /// # Errors
    ///
    /// Returns `PortError::Conflict` if the identity number is already taken.
    fn insert(&self, person: Person) -> Result<(), PortError>;

    /// Replaces the stored record with the same identity number
    ///
    /// Returns `false` without writing anything when no such record exists.
    fn update(&self, person: &Person) -> Result<bool, PortError>;

    /// Every stored person, in insertion order
    fn list(&self) -> Result<Vec<Person>, PortError>;
}

/// Mock implementation of PersonDirectory for testing
///
/// Keeps persons in memory and can be told to fail every write, which is
/// how tests exercise persistence faults.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::RwLock;

    use core_kernel::{AdapterHealth, AdapterType, HealthCheckResult};

    /// In-memory mock implementation of PersonDirectory
    #[derive(Debug, Default)]
    pub struct MockPersonDirectory {
        persons: RwLock<Vec<Person>>,
        fail_writes: AtomicBool,
    }

    impl MockPersonDirectory {
        /// Creates a new mock directory
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with persons for testing
        pub fn with_persons(persons: Vec<Person>) -> Self {
            Self {
                persons: RwLock::new(persons),
                fail_writes: AtomicBool::new(false),
            }
        }

        /// Makes every subsequent insert and update fail with a storage error
        pub fn set_fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        fn check_writable(&self) -> Result<(), PortError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                let io = std::io::Error::new(std::io::ErrorKind::Other, "simulated write failure");
                return Err(PortError::storage("mock directory rejected the write", io));
            }
            Ok(())
        }

        fn poisoned() -> PortError {
            PortError::internal("mock directory lock poisoned")
        }
    }

    impl DomainPort for MockPersonDirectory {}

    impl HealthCheckable for MockPersonDirectory {
        fn health_check(&self) -> HealthCheckResult {
            let failing = self.fail_writes.load(Ordering::SeqCst);
            HealthCheckResult {
                adapter_id: "mock-person-directory".to_string(),
                adapter_type: AdapterType::Mock,
                status: if failing { AdapterHealth::Degraded } else { AdapterHealth::Healthy },
                message: failing.then(|| "Writes are failing".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    impl PersonDirectory for MockPersonDirectory {
        fn find_by_person_id(&self, id: &PersonId) -> Result<Option<Person>, PortError> {
            let persons = self.persons.read().map_err(|_| Self::poisoned())?;
            Ok(persons.iter().find(|p| &p.person_id == id).cloned())
        }

        fn insert(&self, person: Person) -> Result<(), PortError> {
            self.check_writable()?;
            let mut persons = self.persons.write().map_err(|_| Self::poisoned())?;
            if persons.iter().any(|p| p.person_id == person.person_id) {
                return Err(PortError::conflict(format!(
                    "Person {} already exists",
                    person.person_id
                )));
            }
            persons.push(person);
            Ok(())
        }

        fn update(&self, person: &Person) -> Result<bool, PortError> {
            self.check_writable()?;
            let mut persons = self.persons.write().map_err(|_| Self::poisoned())?;
            match persons.iter_mut().find(|p| p.person_id == person.person_id) {
                Some(stored) => {
                    *stored = person.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        fn list(&self) -> Result<Vec<Person>, PortError> {
            let persons = self.persons.read().map_err(|_| Self::poisoned())?;
            Ok(persons.clone())
        }
    }
}
