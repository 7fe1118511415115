//! JSON file person directory
//!
//! Stores every person as one JSON array in a single file. Each operation
//! reads the whole file and writes operations rewrite it, so the file is
//! always the source of truth and nothing is cached between calls. A missing
//! or empty file is an empty directory.
//!
//! Writes go to a sibling temporary file that is then renamed over the
//! target, so a failed write never leaves a truncated directory behind.

use chrono::Utc;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use core_kernel::{
    AdapterHealth, AdapterType, DomainPort, HealthCheckResult, HealthCheckable, PersonId, PortError,
};

use crate::person::Person;
use crate::ports::PersonDirectory;

/// Person directory persisted to a JSON file
#[derive(Debug)]
pub struct JsonFilePersonDirectory {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    guard: Mutex<()>,
}

impl JsonFilePersonDirectory {
    /// Creates an adapter for the given file; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Person>, PortError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Persons file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read persons file");
                return Err(PortError::storage(
                    format!("cannot read {}", self.path.display()),
                    e,
                ));
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let persons: Vec<Person> = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), count = persons.len(), "Loaded persons file");
        Ok(persons)
    }

    fn save(&self, persons: &[Person]) -> Result<(), PortError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                PortError::storage(format!("cannot create {}", parent.display()), e)
            })?;
        }

        let json = serde_json::to_string_pretty(persons)?;
        let staging = self.path.with_extension("json.tmp");

        fs::write(&staging, json)
            .and_then(|_| fs::rename(&staging, &self.path))
            .map_err(|e| {
                warn!(path = %self.path.display(), error = %e, "Failed to write persons file");
                PortError::storage(format!("cannot write {}", self.path.display()), e)
            })?;

        debug!(path = %self.path.display(), count = persons.len(), "Saved persons file");
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, PortError> {
        self.guard
            .lock()
            .map_err(|_| PortError::internal("persons file lock poisoned"))
    }
}

impl DomainPort for JsonFilePersonDirectory {}

impl HealthCheckable for JsonFilePersonDirectory {
    fn health_check(&self) -> HealthCheckResult {
        let (status, message) = match self.load() {
            Ok(persons) => (AdapterHealth::Healthy, format!("{} persons", persons.len())),
            Err(e) => (AdapterHealth::Unhealthy, e.to_string()),
        };

        HealthCheckResult {
            adapter_id: format!("json-file:{}", self.path.display()),
            adapter_type: AdapterType::JsonFile,
            status,
            message: Some(message),
            checked_at: Utc::now(),
        }
    }
}

impl PersonDirectory for JsonFilePersonDirectory {
    #[instrument(skip(self), fields(person_id = %id))]
    fn find_by_person_id(&self, id: &PersonId) -> Result<Option<Person>, PortError> {
        let _guard = self.lock()?;
        Ok(self.load()?.into_iter().find(|p| &p.person_id == id))
    }

    #[instrument(skip(self, person), fields(person_id = %person.person_id))]
    fn insert(&self, person: Person) -> Result<(), PortError> {
        let _guard = self.lock()?;
        let mut persons = self.load()?;

        if persons.iter().any(|p| p.person_id == person.person_id) {
            return Err(PortError::conflict(format!("Person {} already exists", person.person_id)));
        }

        persons.push(person);
        self.save(&persons)
    }

    #[instrument(skip(self, person), fields(person_id = %person.person_id))]
    fn update(&self, person: &Person) -> Result<bool, PortError> {
        let _guard = self.lock()?;
        let mut persons = self.load()?;

        match persons.iter_mut().find(|p| p.person_id == person.person_id) {
            Some(stored) => *stored = person.clone(),
            None => {
                debug!("No stored record to update");
                return Ok(false);
            }
        }

        self.save(&persons)?;
        Ok(true)
    }

    fn list(&self) -> Result<Vec<Person>, PortError> {
        let _guard = self.lock()?;
        self.load()
    }
}
