//! Tests for core_kernel error types

use chrono::{Duration, Months, Utc};
use core_kernel::error::CoreError;
use core_kernel::{PersonId, RecordingWindow, TemporalError};

#[test]
fn test_core_error_invalid_identity_number() {
    let error = CoreError::invalid_identity_number("1234");

    match error {
        CoreError::InvalidIdentityNumber(raw) => assert_eq!(raw, "1234"),
        _ => panic!("Expected InvalidIdentityNumber error"),
    }
}

#[test]
fn test_future_date_reports_both_instants() {
    let now = Utc::now();
    let error = RecordingWindow::one_year()
        .check(now + Duration::days(1), now)
        .unwrap_err();

    assert!(matches!(error, TemporalError::InFuture { .. }));
    assert!(error.to_string().contains("in the future"));
}

#[test]
fn test_stale_date_reports_window() {
    let now = Utc::now();
    let old = now.checked_sub_months(Months::new(24)).unwrap();
    let error = RecordingWindow::one_year().check(old, now).unwrap_err();

    assert!(error.to_string().contains("older than"));
}

#[test]
fn test_parse_error_display() {
    let error = PersonId::parse("abc").unwrap_err();
    let display = format!("{}", error);

    assert!(display.contains("Invalid identity number"));
    assert!(display.contains("abc"));
}
