//! Temporal bounds for recorded timestamps
//!
//! Records such as enrollments carry a timestamp set once at creation. When
//! a record is validated the timestamp must fall inside a window that ends
//! at "now" and reaches back a fixed number of months.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Timestamp {at} is in the future (now is {now})")]
    InFuture {
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("Timestamp {at} is older than the {months}-month window")]
    TooOld {
        at: DateTime<Utc>,
        months: u32,
    },
}

/// Window of acceptable recording times, ending at the evaluation instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingWindow {
    /// How far back a timestamp may lie, in calendar months
    pub lookback_months: u32,
}

impl RecordingWindow {
    /// Window reaching back one calendar year
    pub const fn one_year() -> Self {
        Self { lookback_months: 12 }
    }

    /// Earliest acceptable timestamp when evaluated at `now`
    pub fn earliest(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.checked_sub_months(Months::new(self.lookback_months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Checks that `at` is neither after `now` nor before the window start
    pub fn check(&self, at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), TemporalError> {
        if at > now {
            return Err(TemporalError::InFuture { at, now });
        }
        if at < self.earliest(now) {
            return Err(TemporalError::TooOld {
                at,
                months: self.lookback_months,
            });
        }
        Ok(())
    }
}

impl Default for RecordingWindow {
    fn default() -> Self {
        Self::one_year()
    }
}
