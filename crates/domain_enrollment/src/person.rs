//! Person records and registration input
//!
//! A [`Person`] is keyed by national identity number and owns at most one
//! [`Enrollment`]. New persons enter the system through a
//! [`PersonRegistration`], the raw user input, which is checked with the
//! `validator` derive before anything is built from it.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError, ValidationErrors};

use core_kernel::validation::{
    is_valid_address, is_valid_email, is_valid_identity_number, is_valid_name, is_valid_phone,
    is_valid_sex,
};
use core_kernel::PersonId;

use crate::enrollment::Enrollment;
use crate::error::EnrollmentError;

/// Sex category recorded for a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Male => f.write_str("M"),
            Sex::Female => f.write_str("F"),
        }
    }
}

impl FromStr for Sex {
    type Err = EnrollmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MASCULINO" => Ok(Sex::Male),
            "F" | "FEMENINO" => Ok(Sex::Female),
            other => Err(EnrollmentError::ValidationFailed(format!("Unknown sex category: {}", other))),
        }
    }
}

/// A registered person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub person_id: PersonId,
    pub names: String,
    pub surnames: String,
    pub age: u32,
    pub sex: Sex,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Current enrollment, if any
    #[serde(default)]
    pub enrollment: Option<Enrollment>,
}

impl Person {
    /// Returns "names surnames"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.names, self.surnames)
    }

    pub fn has_enrollment(&self) -> bool {
        self.enrollment.is_some()
    }

    /// Overwrites the personal details, keeping the identity number and enrollment
    pub(crate) fn apply_details(&mut self, details: PersonDetails) {
        self.names = details.names;
        self.surnames = details.surnames;
        self.age = details.age;
        self.sex = details.sex;
        self.phone = details.phone;
        self.email = details.email;
        self.address = details.address;
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.person_id)
    }
}

/// Raw registration input as typed by the user
///
/// Also used to update the details of an existing person, in which case the
/// identity number selects the record and is not changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PersonRegistration {
    #[validate(custom(function = "check_identity_number"))]
    pub identity_number: String,
    #[validate(custom(function = "check_name"))]
    pub names: String,
    #[validate(custom(function = "check_name"))]
    pub surnames: String,
    #[validate(range(min = 16, max = 100, message = "Age must be between 16 and 100"))]
    pub age: i64,
    #[validate(custom(function = "check_sex"))]
    pub sex: String,
    #[validate(custom(function = "check_phone"))]
    pub phone: String,
    #[validate(custom(function = "check_email"))]
    pub email: String,
    #[validate(custom(function = "check_address"))]
    pub address: String,
}

/// Field order used when reporting registration errors
const FIELD_ORDER: [&str; 8] = [
    "identity_number",
    "names",
    "surnames",
    "age",
    "sex",
    "phone",
    "email",
    "address",
];

/// Normalized personal details, ready to store
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PersonDetails {
    pub names: String,
    pub surnames: String,
    pub age: u32,
    pub sex: Sex,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl PersonRegistration {
    /// Runs every field rule and returns one message per failed field
    ///
    /// Messages are ordered by field, identity number first.
    pub fn field_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => Self::describe(&errors),
        }
    }

    fn describe(errors: &ValidationErrors) -> Vec<String> {
        let by_field = errors.field_errors();
        let mut messages = Vec::new();

        for field in FIELD_ORDER {
            if let Some(list) = by_field.get(field) {
                for error in list.iter() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field));
                    messages.push(message);
                }
            }
        }

        messages
    }

    /// Builds the person record for a validated registration
    ///
    /// # Errors
    ///
    /// Returns `EnrollmentError::ValidationFailed` listing every invalid field.
    pub fn into_person(self) -> Result<Person, EnrollmentError> {
        let person_id = PersonId::parse(&self.identity_number)?;
        let details = self.into_details()?;

        Ok(Person {
            person_id,
            names: details.names,
            surnames: details.surnames,
            age: details.age,
            sex: details.sex,
            phone: details.phone,
            email: details.email,
            address: details.address,
            enrollment: None,
        })
    }

    pub(crate) fn into_details(self) -> Result<PersonDetails, EnrollmentError> {
        let errors = self.field_errors();
        if !errors.is_empty() {
            return Err(EnrollmentError::validation_failed(errors));
        }

        let age = u32::try_from(self.age)
            .map_err(|_| EnrollmentError::ValidationFailed(format!("Invalid age: {}", self.age)))?;

        Ok(PersonDetails {
            names: self.names.trim().to_string(),
            surnames: self.surnames.trim().to_string(),
            age,
            sex: self.sex.parse()?,
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            address: self.address.trim().to_string(),
        })
    }
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn check_identity_number(value: &str) -> Result<(), ValidationError> {
    if is_valid_identity_number(value) {
        Ok(())
    } else {
        Err(rule("identity_number", "Identity number must have 8 digits and not repeat a single digit"))
    }
}

fn check_name(value: &str) -> Result<(), ValidationError> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(rule("name", "Names must be 2-50 letters separated by single spaces"))
    }
}

fn check_sex(value: &str) -> Result<(), ValidationError> {
    if is_valid_sex(value) {
        Ok(())
    } else {
        Err(rule("sex", "Sex must be M, F, MASCULINO or FEMENINO"))
    }
}

fn check_phone(value: &str) -> Result<(), ValidationError> {
    if is_valid_phone(value) {
        Ok(())
    } else {
        Err(rule("phone", "Phone must have 9-15 digits with an optional leading +"))
    }
}

fn check_email(value: &str) -> Result<(), ValidationError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(rule("email", "Email address is not valid"))
    }
}

fn check_address(value: &str) -> Result<(), ValidationError> {
    if is_valid_address(value) {
        Ok(())
    } else {
        Err(rule("address", "Address must be 10-200 characters of letters, digits and .,#-°"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> PersonRegistration {
        PersonRegistration {
            identity_number: "4567-1234".to_string(),
            names: "  María José ".to_string(),
            surnames: "Quispe Huamán".to_string(),
            age: 19,
            sex: "femenino".to_string(),
            phone: "+51 987 654 321".to_string(),
            email: " Maria.Quispe@Uni.edu.pe ".to_string(),
            address: "Av. Los Próceres 245, Lima".to_string(),
        }
    }

    #[test]
    fn test_valid_registration_builds_normalized_person() {
        let person = registration().into_person().unwrap();

        assert_eq!(person.person_id.as_str(), "45671234");
        assert_eq!(person.names, "María José");
        assert_eq!(person.email, "maria.quispe@uni.edu.pe");
        assert_eq!(person.sex, Sex::Female);
        assert_eq!(person.age, 19);
        assert!(person.enrollment.is_none());
        assert_eq!(person.full_name(), "María José Quispe Huamán");
    }

    #[test]
    fn test_every_invalid_field_is_reported_in_order() {
        let invalid = PersonRegistration {
            identity_number: "11111111".to_string(),
            names: "J".to_string(),
            surnames: "Pérez".to_string(),
            age: 15,
            sex: "X".to_string(),
            phone: "12345".to_string(),
            email: "not-an-email".to_string(),
            address: "short".to_string(),
        };

        let errors = invalid.field_errors();
        assert_eq!(errors.len(), 7);
        assert!(errors[0].starts_with("Identity number"));
        assert!(errors[1].starts_with("Names"));
        assert_eq!(errors[2], "Age must be between 16 and 100");
        assert!(errors[6].starts_with("Address"));
    }

    #[test]
    fn test_age_bounds() {
        let mut reg = registration();
        reg.age = 16;
        assert!(reg.field_errors().is_empty());
        reg.age = 100;
        assert!(reg.field_errors().is_empty());
        reg.age = 101;
        assert_eq!(reg.field_errors().len(), 1);
    }

    #[test]
    fn test_invalid_registration_is_rejected() {
        let mut reg = registration();
        reg.email = "a@@b.com".to_string();

        let result = reg.into_person();
        assert!(matches!(result, Err(EnrollmentError::ValidationFailed(_))));
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!("m".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!(" Masculino ".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
        assert!("otro".parse::<Sex>().is_err());
    }

    #[test]
    fn test_person_without_enrollment_deserializes() {
        let json = serde_json::json!({
            "person_id": "12345678",
            "names": "Ana",
            "surnames": "Torres",
            "age": 20,
            "sex": "F",
            "phone": "987654321",
            "email": "ana@uni.edu",
            "address": "Jr. Cusco 123, Lima"
        });

        let person: Person = serde_json::from_value(json).unwrap();
        assert!(!person.has_enrollment());
        assert_eq!(person.to_string(), "Ana Torres (12345678)");
    }
}
