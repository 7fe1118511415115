//! Enrollment record and course-selection rules
//!
//! An [`Enrollment`] is one person's registration for an academic term: the
//! chosen program, the shift, and up to six courses. Every mutation below
//! either succeeds completely or leaves the record untouched, so the
//! following invariants hold after any call:
//!
//! - at most [`MAX_COURSES`] courses are selected
//! - selected course ids are pairwise distinct
//! - every selected course exists in the [`Catalog`]
//! - the program is a catalog program
//!
//! Records read back from storage can still break these rules; use
//! [`crate::validation::EnrollmentValidator`] to report every violation.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use core_kernel::PersonId;

use crate::catalog::{Catalog, Course};
use crate::error::EnrollmentError;

/// Number of courses that makes an enrollment complete
pub const MAX_COURSES: usize = 6;

/// Time-of-day class session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Morning => f.write_str("Morning"),
            Shift::Afternoon => f.write_str("Afternoon"),
        }
    }
}

impl FromStr for Shift {
    type Err = EnrollmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" | "mañana" | "manana" => Ok(Shift::Morning),
            "afternoon" | "tarde" => Ok(Shift::Afternoon),
            other => Err(EnrollmentError::ValidationFailed(format!("Unknown shift: {}", other))),
        }
    }
}

/// How the current course selection was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMode {
    Manual,
    Automatic,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Manual => f.write_str("Manual"),
            SelectionMode::Automatic => f.write_str("Automatic"),
        }
    }
}

/// A person's registration for an academic term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    person_id: PersonId,
    program: String,
    shift: Shift,
    selected_courses: Vec<Course>,
    enrollment_date: DateTime<Utc>,
    is_auto_selected: bool,
}

impl Enrollment {
    /// Creates an empty enrollment dated now
    ///
    /// # Errors
    ///
    /// Returns `EnrollmentError::InvalidProgram` if the program is not offered.
    pub fn new(person_id: PersonId, program: &str, shift: Shift) -> Result<Self, EnrollmentError> {
        let program = Catalog::canonical_program(program)
            .ok_or_else(|| EnrollmentError::InvalidProgram(program.to_string()))?;

        Ok(Self {
            person_id,
            program: program.to_string(),
            shift,
            selected_courses: Vec::new(),
            enrollment_date: Utc::now(),
            is_auto_selected: false,
        })
    }

    pub fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn shift(&self) -> Shift {
        self.shift
    }

    /// Selected courses in insertion order
    pub fn selected_courses(&self) -> &[Course] {
        &self.selected_courses
    }

    pub fn enrollment_date(&self) -> DateTime<Utc> {
        self.enrollment_date
    }

    pub fn is_auto_selected(&self) -> bool {
        self.is_auto_selected
    }

    pub fn selection_mode(&self) -> SelectionMode {
        if self.is_auto_selected {
            SelectionMode::Automatic
        } else {
            SelectionMode::Manual
        }
    }

    pub fn course_count(&self) -> usize {
        self.selected_courses.len()
    }

    /// Sum of credits over the selected courses
    pub fn total_credits(&self) -> u32 {
        self.selected_courses.iter().map(|c| c.credits).sum()
    }

    /// An enrollment is complete with exactly six courses
    pub fn is_complete(&self) -> bool {
        self.selected_courses.len() == MAX_COURSES
    }

    pub fn contains_course(&self, course_id: u32) -> bool {
        self.selected_courses.iter().any(|c| c.id == course_id)
    }

    /// Catalog courses not yet selected, ordered by id
    pub fn available_courses(&self) -> Vec<Course> {
        Catalog::courses()
            .into_iter()
            .filter(|c| !self.contains_course(c.id))
            .collect()
    }

    /// Appends one catalog course to the selection
    ///
    /// The selection mode flag is left as it was.
    ///
    /// # Errors
    ///
    /// - `CourseNotFound` if the id is not a catalog course
    /// - `SelectionFull` if six courses are already selected
    /// - `DuplicateCourse` if the course is already selected
    pub fn add_course(&mut self, course_id: i64) -> Result<(), EnrollmentError> {
        let course = u32::try_from(course_id)
            .ok()
            .and_then(Catalog::find_course)
            .ok_or(EnrollmentError::CourseNotFound(course_id))?;

        if self.selected_courses.len() >= MAX_COURSES {
            return Err(EnrollmentError::SelectionFull(self.selected_courses.len()));
        }

        if self.contains_course(course.id) {
            return Err(EnrollmentError::DuplicateCourse(course.id));
        }

        self.selected_courses.push(course);
        Ok(())
    }

    /// Removes every selected entry with the given id
    ///
    /// Removing a course that is not selected is a no-op. Returns whether
    /// anything was removed.
    pub fn remove_course(&mut self, course_id: u32) -> bool {
        let before = self.selected_courses.len();
        self.selected_courses.retain(|c| c.id != course_id);
        self.selected_courses.len() != before
    }

    /// Replaces the whole selection with a validated candidate list
    ///
    /// The candidate must contain exactly six courses with distinct ids, all
    /// of them in the catalog. Stored entries are fresh catalog snapshots,
    /// so names and credits always match the catalog. On failure the
    /// current selection is left unchanged.
    pub fn replace_all_courses(&mut self, candidate: &[Course]) -> Result<(), EnrollmentError> {
        let snapshots = Self::resolve_selection(candidate)?;
        self.selected_courses = snapshots;
        self.is_auto_selected = false;
        Ok(())
    }

    /// Replaces the current selection with up to six random catalog courses
    ///
    /// Courses are drawn without replacement from the catalog courses that
    /// were not selected before the call. When fewer than six remain, all of
    /// them are taken. Returns the number of courses selected.
    pub fn auto_select<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let pool = self.available_courses();
        let picked: Vec<Course> = pool.choose_multiple(rng, MAX_COURSES).cloned().collect();

        self.selected_courses = picked;
        self.is_auto_selected = true;
        self.selected_courses.len()
    }

    pub fn update_shift(&mut self, shift: Shift) {
        self.shift = shift;
    }

    /// Switches to another catalog program
    pub fn update_program(&mut self, program: &str) -> Result<(), EnrollmentError> {
        let program = Catalog::canonical_program(program)
            .ok_or_else(|| EnrollmentError::InvalidProgram(program.to_string()))?;
        self.program = program.to_string();
        Ok(())
    }

    fn resolve_selection(candidate: &[Course]) -> Result<Vec<Course>, EnrollmentError> {
        if candidate.len() != MAX_COURSES {
            return Err(EnrollmentError::invalid_selection(format!(
                "expected exactly {} courses, got {}",
                MAX_COURSES,
                candidate.len()
            )));
        }

        let mut seen = HashSet::new();
        let mut snapshots = Vec::with_capacity(MAX_COURSES);
        for course in candidate {
            if !seen.insert(course.id) {
                return Err(EnrollmentError::invalid_selection(format!(
                    "course {} appears more than once",
                    course.id
                )));
            }
            let snapshot = Catalog::find_course(course.id).ok_or_else(|| {
                EnrollmentError::invalid_selection(format!("course {} is not offered", course.id))
            })?;
            snapshots.push(snapshot);
        }

        Ok(snapshots)
    }
}
