//! Strongly-typed identifiers for domain entities
//!
//! A person is keyed by their national identity number. Wrapping it in a
//! newtype means a `PersonId` always holds the normalized eight-digit form,
//! so two spellings of the same number ("1234-5678", "12345678") compare equal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::validation;

/// National identity number of a person, normalized to eight digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PersonId(String);

impl PersonId {
    /// Parses and normalizes a raw identity number
    ///
    /// Spaces and hyphens are stripped before validation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidIdentityNumber` if the input is not eight
    /// digits or is a repeated-digit sequence such as `11111111`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if !validation::is_valid_identity_number(raw) {
            return Err(CoreError::invalid_identity_number(raw));
        }
        Ok(Self(validation::normalize_identity_number(raw)))
    }

    /// Returns the normalized digits
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PersonId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PersonId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PersonId> for String {
    fn from(id: PersonId) -> String {
        id.0
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
