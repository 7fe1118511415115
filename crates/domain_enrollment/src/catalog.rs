//! Course and program catalog
//!
//! The catalog is fixed reference data defined at compile time: ten courses
//! and eight degree programs. It is never mutated at runtime and never empty.
//! Courses handed out by the catalog are value copies, so an enrollment can
//! never alias or modify the shared entries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An offered course
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Course {
    /// Unique positive identifier
    pub id: u32,
    /// Full course name, e.g. "Matemática I"
    pub name: String,
    /// Short alphanumeric code, e.g. "MAT101"
    pub code: String,
    /// Academic credits awarded
    pub credits: u32,
}

impl Course {
    /// Creates a course snapshot
    pub fn new(id: u32, name: impl Into<String>, code: impl Into<String>, credits: u32) -> Self {
        Self {
            id,
            name: name.into(),
            code: code.into(),
            credits,
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ({}) - {} credits", self.id, self.name, self.code, self.credits)
    }
}

struct CourseEntry {
    id: u32,
    name: &'static str,
    code: &'static str,
    credits: u32,
}

const COURSES: [CourseEntry; 10] = [
    CourseEntry { id: 1, name: "Matemática I", code: "MAT101", credits: 4 },
    CourseEntry { id: 2, name: "Física I", code: "FIS101", credits: 4 },
    CourseEntry { id: 3, name: "Química General", code: "QUI101", credits: 3 },
    CourseEntry { id: 4, name: "Programación I", code: "PRG101", credits: 4 },
    CourseEntry { id: 5, name: "Inglés I", code: "ING101", credits: 2 },
    CourseEntry { id: 6, name: "Historia Universal", code: "HIS101", credits: 3 },
    CourseEntry { id: 7, name: "Filosofía", code: "FIL101", credits: 2 },
    CourseEntry { id: 8, name: "Estadística", code: "EST101", credits: 3 },
    CourseEntry { id: 9, name: "Comunicación", code: "COM101", credits: 2 },
    CourseEntry { id: 10, name: "Metodología de Investigación", code: "MET101", credits: 3 },
];

const PROGRAMS: [&str; 8] = [
    "Ingeniería de Sistemas",
    "Ingeniería Industrial",
    "Medicina",
    "Derecho",
    "Administración",
    "Contabilidad",
    "Psicología",
    "Arquitectura",
];

impl CourseEntry {
    fn to_course(&self) -> Course {
        Course::new(self.id, self.name, self.code, self.credits)
    }
}

/// Read-only accessors over the fixed catalog
///
/// # Examples
///
/// ```rust
/// use domain_enrollment::catalog::Catalog;
///
/// assert_eq!(Catalog::courses().len(), 10);
/// assert!(Catalog::is_valid_program(" Medicina "));
/// assert_eq!(Catalog::find_course(4).unwrap().code, "PRG101");
/// ```
pub struct Catalog;

impl Catalog {
    /// Every offered course, ordered by id
    pub fn courses() -> Vec<Course> {
        COURSES.iter().map(CourseEntry::to_course).collect()
    }

    /// Every offered degree program
    pub fn programs() -> &'static [&'static str] {
        &PROGRAMS
    }

    /// Looks up a course by id, returning a value copy
    pub fn find_course(id: u32) -> Option<Course> {
        COURSES.iter().find(|c| c.id == id).map(CourseEntry::to_course)
    }

    /// Checks whether an id names a catalog course
    pub fn contains_course(id: u32) -> bool {
        COURSES.iter().any(|c| c.id == id)
    }

    /// Validates a raw course id from untrusted input
    ///
    /// Only positive integers matching a catalog course are accepted.
    pub fn is_valid_course_id(raw: i64) -> bool {
        raw > 0 && u32::try_from(raw).map_or(false, Self::contains_course)
    }

    /// Validates a program name; surrounding whitespace is ignored
    pub fn is_valid_program(raw: &str) -> bool {
        let trimmed = raw.trim();
        !trimmed.is_empty() && PROGRAMS.contains(&trimmed)
    }

    /// Returns the canonical program name for a raw input, if it is offered
    pub fn canonical_program(raw: &str) -> Option<&'static str> {
        let trimmed = raw.trim();
        PROGRAMS.iter().copied().find(|p| *p == trimmed)
    }
}
