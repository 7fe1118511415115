//! In-memory person directory
//!
//! Process-local storage for persons. Everything is lost when the process
//! exits; useful for tests and for shells that keep state in memory only.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use core_kernel::{
    AdapterHealth, AdapterType, DomainPort, HealthCheckResult, HealthCheckable, PersonId, PortError,
};

use crate::person::Person;
use crate::ports::PersonDirectory;

#[derive(Debug, Default)]
struct Store {
    persons: HashMap<PersonId, Person>,
    order: Vec<PersonId>,
}

/// Person directory backed by a map in memory
#[derive(Debug, Default)]
pub struct InMemoryPersonDirectory {
    store: RwLock<Store>,
}

impl InMemoryPersonDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored persons
    pub fn len(&self) -> usize {
        self.store.read().map(|s| s.order.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn poisoned() -> PortError {
        PortError::internal("person store lock poisoned")
    }
}

impl DomainPort for InMemoryPersonDirectory {}

impl HealthCheckable for InMemoryPersonDirectory {
    fn health_check(&self) -> HealthCheckResult {
        let (status, message) = match self.store.read() {
            Ok(store) => (AdapterHealth::Healthy, format!("{} persons", store.order.len())),
            Err(_) => (AdapterHealth::Unhealthy, "lock poisoned".to_string()),
        };

        HealthCheckResult {
            adapter_id: "in-memory-person-directory".to_string(),
            adapter_type: AdapterType::InMemory,
            status,
            message: Some(message),
            checked_at: Utc::now(),
        }
    }
}

impl PersonDirectory for InMemoryPersonDirectory {
    fn find_by_person_id(&self, id: &PersonId) -> Result<Option<Person>, PortError> {
        let store = self.store.read().map_err(|_| Self::poisoned())?;
        Ok(store.persons.get(id).cloned())
    }

    fn exists(&self, id: &PersonId) -> Result<bool, PortError> {
        let store = self.store.read().map_err(|_| Self::poisoned())?;
        Ok(store.persons.contains_key(id))
    }

    fn insert(&self, person: Person) -> Result<(), PortError> {
        let mut store = self.store.write().map_err(|_| Self::poisoned())?;
        if store.persons.contains_key(&person.person_id) {
            return Err(PortError::conflict(format!("Person {} already exists", person.person_id)));
        }

        store.order.push(person.person_id.clone());
        store.persons.insert(person.person_id.clone(), person);
        Ok(())
    }

    fn update(&self, person: &Person) -> Result<bool, PortError> {
        let mut store = self.store.write().map_err(|_| Self::poisoned())?;
        match store.persons.get_mut(&person.person_id) {
            Some(stored) => {
                *stored = person.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list(&self) -> Result<Vec<Person>, PortError> {
        let store = self.store.read().map_err(|_| Self::poisoned())?;
        Ok(store
            .order
            .iter()
            .filter_map(|id| store.persons.get(id).cloned())
            .collect())
    }
}
