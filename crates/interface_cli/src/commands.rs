//! Command line definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use core_kernel::PersonId;
use domain_enrollment::{PersonRegistration, Shift};

#[derive(Parser, Debug)]
#[command(
    name = "enrollment",
    about = "Register students, enroll them in a program and manage their course selection",
    version
)]
pub struct Cli {
    /// Override the configured persons file
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List offered courses and programs
    Catalog,
    /// List registered persons
    Persons,
    /// Check that the persons file can be read
    Health,
    /// Register a new person
    Register(RegistrationArgs),
    /// Replace the personal details of a registered person
    UpdatePerson(RegistrationArgs),
    /// Create an empty enrollment for a registered person
    Enroll {
        /// Identity number, spaces and hyphens allowed
        identity_number: String,
        /// Program name exactly as listed by `catalog`
        program: String,
        /// morning or afternoon (mañana and tarde are accepted too)
        #[arg(value_parser = parse_shift)]
        shift: Shift,
    },
    /// Add one course to the selection
    AddCourse {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
        #[arg(allow_negative_numbers = true)]
        course_id: i64,
    },
    /// Remove one course from the selection
    RemoveCourse {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
        #[arg(allow_negative_numbers = true)]
        course_id: i64,
    },
    /// Replace the selection with exactly six courses, e.g. `1,2,3,4,5,6`
    SetCourses {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
        #[arg(value_delimiter = ',', required = true, allow_negative_numbers = true)]
        course_ids: Vec<i64>,
    },
    /// Replace the selection with random courses
    AutoSelect {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Change the shift of an enrollment
    SetShift {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
        #[arg(value_parser = parse_shift)]
        shift: Shift,
    },
    /// Change the program of an enrollment
    SetProgram {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
        program: String,
    },
    /// Print the enrollment summary
    Summary {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
    },
    /// Check the stored enrollment against every rule
    Validate {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
    },
    /// List courses that can still be selected
    Available {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
    },
    /// Delete the enrollment of a person
    Delete {
        #[arg(value_parser = parse_person_id)]
        person_id: PersonId,
    },
}

#[derive(Args, Debug, Clone)]
pub struct RegistrationArgs {
    #[arg(long)]
    pub identity_number: String,
    #[arg(long)]
    pub names: String,
    #[arg(long)]
    pub surnames: String,
    #[arg(long, allow_negative_numbers = true)]
    pub age: i64,
    /// M, F, MASCULINO or FEMENINO
    #[arg(long)]
    pub sex: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub address: String,
}

impl From<RegistrationArgs> for PersonRegistration {
    fn from(args: RegistrationArgs) -> Self {
        PersonRegistration {
            identity_number: args.identity_number,
            names: args.names,
            surnames: args.surnames,
            age: args.age,
            sex: args.sex,
            phone: args.phone,
            email: args.email,
            address: args.address,
        }
    }
}

fn parse_person_id(raw: &str) -> Result<PersonId, String> {
    raw.parse::<PersonId>().map_err(|e| e.to_string())
}

fn parse_shift(raw: &str) -> Result<Shift, String> {
    raw.parse::<Shift>().map_err(|e| e.to_string())
}
