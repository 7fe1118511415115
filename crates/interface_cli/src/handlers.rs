//! Command handlers
//!
//! Each command maps to one engine call. Results are written to the given
//! writer as text, or as pretty JSON when requested, so the handlers can be
//! driven from tests without touching stdout.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use tracing::debug;

use domain_enrollment::{
    Catalog, Course, Enrollment, EnrollmentEngine, EnrollmentError, EnrollmentSummary,
    PersonDirectory, PersonRegistration, ValidationResult,
};

use crate::commands::Command;
use crate::error::CliError;

/// Output mode for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Runs one command against the engine
pub fn execute<W: Write>(
    engine: &EnrollmentEngine,
    command: Command,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), CliError> {
    debug!(?command, "Executing command");

    match command {
        Command::Catalog => {
            let courses = Catalog::courses();
            match format {
                OutputFormat::Json => write_json(
                    out,
                    &json!({ "courses": courses, "programs": Catalog::programs() }),
                ),
                OutputFormat::Text => {
                    writeln!(out, "Courses:")?;
                    write_courses(out, &courses)?;
                    writeln!(out, "Programs:")?;
                    for program in Catalog::programs() {
                        writeln!(out, "- {}", program)?;
                    }
                    Ok(())
                }
            }
        }

        Command::Persons => {
            let persons = engine.directory().list().map_err(EnrollmentError::from)?;
            match format {
                OutputFormat::Json => write_json(out, &persons),
                OutputFormat::Text => {
                    for person in &persons {
                        let status = if person.has_enrollment() { "enrolled" } else { "not enrolled" };
                        writeln!(out, "{} - {}", person, status)?;
                    }
                    Ok(())
                }
            }
        }

        Command::Health => {
            let health = engine.directory_health();
            match format {
                OutputFormat::Json => write_json(out, &health),
                OutputFormat::Text => {
                    writeln!(out, "{}: {}", health.adapter_id, health.status)?;
                    if let Some(message) = &health.message {
                        writeln!(out, "  {}", message)?;
                    }
                    Ok(())
                }
            }
        }

        Command::Register(args) => {
            let person = engine.register_person(PersonRegistration::from(args))?;
            match format {
                OutputFormat::Json => write_json(out, &person),
                OutputFormat::Text => Ok(writeln!(out, "Registered {}", person)?),
            }
        }

        Command::UpdatePerson(args) => {
            let person = engine.update_person_details(PersonRegistration::from(args))?;
            match format {
                OutputFormat::Json => write_json(out, &person),
                OutputFormat::Text => Ok(writeln!(out, "Updated {}", person)?),
            }
        }

        Command::Enroll { identity_number, program, shift } => {
            let enrollment = engine.create(&identity_number, &program, shift)?;
            write_enrollment(out, format, "Enrollment created", &enrollment)
        }

        Command::AddCourse { person_id, course_id } => {
            let enrollment = engine.add_course_for(&person_id, course_id)?;
            write_enrollment(out, format, "Course added", &enrollment)
        }

        Command::RemoveCourse { person_id, course_id } => {
            let enrollment = engine.remove_course_for(&person_id, course_id)?;
            write_enrollment(out, format, "Course removed", &enrollment)
        }

        Command::SetCourses { person_id, course_ids } => {
            let enrollment = engine.replace_courses_for(&person_id, &course_ids)?;
            write_enrollment(out, format, "Courses replaced", &enrollment)
        }

        Command::AutoSelect { person_id, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let enrollment = engine.auto_select_for(&person_id, &mut rng)?;
            write_enrollment(out, format, "Courses selected automatically", &enrollment)
        }

        Command::SetShift { person_id, shift } => {
            let enrollment = engine.update_shift(&person_id, shift)?;
            write_enrollment(out, format, "Shift updated", &enrollment)
        }

        Command::SetProgram { person_id, program } => {
            let enrollment = engine.update_program(&person_id, &program)?;
            write_enrollment(out, format, "Program updated", &enrollment)
        }

        Command::Summary { person_id } => {
            let summary = engine.summary_for(&person_id)?;
            match format {
                OutputFormat::Json => write_json(out, &summary),
                OutputFormat::Text => Ok(writeln!(out, "{}", summary)?),
            }
        }

        Command::Validate { person_id } => {
            let result = engine.validate_for(&person_id)?;
            match format {
                OutputFormat::Json => write_json(out, &result),
                OutputFormat::Text => write_validation(out, &result),
            }
        }

        Command::Available { person_id } => {
            let courses = engine.available_courses_for(&person_id)?;
            match format {
                OutputFormat::Json => write_json(out, &courses),
                OutputFormat::Text => write_courses(out, &courses),
            }
        }

        Command::Delete { person_id } => {
            let deleted = engine.delete_enrollment(&person_id)?;
            match format {
                OutputFormat::Json => write_json(out, &json!({ "deleted": deleted })),
                OutputFormat::Text if deleted => Ok(writeln!(out, "Enrollment deleted")?),
                OutputFormat::Text => Ok(writeln!(out, "No enrollment to delete")?),
            }
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_courses<W: Write>(out: &mut W, courses: &[Course]) -> Result<(), CliError> {
    for course in courses {
        writeln!(out, "{}", course)?;
    }
    Ok(())
}

fn write_enrollment<W: Write>(
    out: &mut W,
    format: OutputFormat,
    heading: &str,
    enrollment: &Enrollment,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(out, enrollment),
        OutputFormat::Text => {
            writeln!(out, "{}", heading)?;
            writeln!(out, "{}", EnrollmentSummary::from(enrollment))?;
            Ok(())
        }
    }
}

fn write_validation<W: Write>(out: &mut W, result: &ValidationResult) -> Result<(), CliError> {
    if result.is_valid {
        writeln!(out, "Enrollment is valid")?;
    } else {
        writeln!(out, "Enrollment is invalid:")?;
        for error in &result.errors {
            writeln!(out, "  error: {}", error)?;
        }
    }
    for warning in &result.warnings {
        writeln!(out, "  warning: {}", warning)?;
    }
    Ok(())
}
