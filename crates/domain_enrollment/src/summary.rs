//! Human-readable enrollment report

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::catalog::Course;
use crate::enrollment::{Enrollment, SelectionMode, Shift, MAX_COURSES};

/// Read-only snapshot of an enrollment for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentSummary {
    pub program: String,
    pub shift: Shift,
    pub enrollment_date: DateTime<Utc>,
    pub selection_mode: SelectionMode,
    pub course_count: usize,
    pub total_credits: u32,
    pub courses: Vec<Course>,
}

impl EnrollmentSummary {
    /// Course count as "N/6"
    pub fn course_fraction(&self) -> String {
        format!("{}/{}", self.course_count, MAX_COURSES)
    }
}

impl From<&Enrollment> for EnrollmentSummary {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            program: enrollment.program().to_string(),
            shift: enrollment.shift(),
            enrollment_date: enrollment.enrollment_date(),
            selection_mode: enrollment.selection_mode(),
            course_count: enrollment.course_count(),
            total_credits: enrollment.total_credits(),
            courses: enrollment.selected_courses().to_vec(),
        }
    }
}

impl fmt::Display for EnrollmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Enrollment Summary ===")?;
        writeln!(f, "Program: {}", self.program)?;
        writeln!(f, "Shift: {}", self.shift)?;
        writeln!(f, "Date: {}", self.enrollment_date.format("%d/%m/%Y"))?;
        writeln!(f, "Selection: {}", self.selection_mode)?;
        writeln!(f, "Courses: {}", self.course_fraction())?;
        write!(f, "Total credits: {}", self.total_credits)?;
        for course in &self.courses {
            write!(f, "\n{}", course)?;
        }
        Ok(())
    }
}
