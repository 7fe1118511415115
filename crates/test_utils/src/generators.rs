//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use proptest::sample::subsequence;

use domain_enrollment::{Catalog, PersonRegistration, Shift};

/// Strategy for identity numbers that pass validation
pub fn identity_number_strategy() -> impl Strategy<Value = String> {
    "[0-9]{8}".prop_filter("repeated digit", |s| {
        let first = s.as_bytes()[0];
        s.bytes().any(|b| b != first)
    })
}

/// Strategy for identity numbers written with spaces or hyphens
pub fn formatted_identity_number_strategy() -> impl Strategy<Value = (String, String)> {
    (identity_number_strategy(), prop_oneof![Just(" "), Just("-")])
        .prop_map(|(digits, sep)| (format!("{}{}{}", &digits[..4], sep, &digits[4..]), digits))
}

/// Strategy for catalog course ids
pub fn course_id_strategy() -> impl Strategy<Value = i64> {
    1i64..=10i64
}

/// Strategy for ids outside the catalog
pub fn unknown_course_id_strategy() -> impl Strategy<Value = i64> {
    prop_oneof![i64::MIN..=0i64, 11i64..=i64::MAX]
}

/// Strategy for a sequence of add-course attempts, duplicates allowed
pub fn course_attempts_strategy() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(-2i64..=12i64, 0..20)
}

/// Strategy for six distinct catalog ids in random order
pub fn complete_selection_strategy() -> impl Strategy<Value = Vec<i64>> {
    let ids: Vec<i64> = Catalog::courses().iter().map(|c| i64::from(c.id)).collect();
    subsequence(ids, 6).prop_shuffle()
}

pub fn program_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(Catalog::programs().to_vec()).prop_map(String::from)
}

pub fn shift_strategy() -> impl Strategy<Value = Shift> {
    prop_oneof![Just(Shift::Morning), Just(Shift::Afternoon)]
}

/// Strategy for random-number seeds
pub fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Strategy for names that pass the name rule
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-zñáéíóú]{2,12}( [A-Z][a-z]{2,12})?"
}

pub fn age_strategy() -> impl Strategy<Value = i64> {
    16i64..=100i64
}

/// Strategy for valid email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{3,10}", "[a-z0-9_]{0,4}", "[a-z]{3,8}")
        .prop_map(|(local, suffix, domain)| format!("{}{}@{}.edu.pe", local, suffix, domain))
}

/// Strategy for valid national phone numbers
pub fn phone_strategy() -> impl Strategy<Value = String> {
    (900u32..999u32, 100u32..999u32, 100u32..999u32)
        .prop_map(|(a, b, c)| format!("{} {} {}", a, b, c))
}

/// Strategy for registrations that pass every field rule
pub fn registration_strategy() -> impl Strategy<Value = PersonRegistration> {
    (
        identity_number_strategy(),
        name_strategy(),
        name_strategy(),
        age_strategy(),
        prop_oneof![Just("M"), Just("F"), Just("masculino"), Just("Femenino")],
        phone_strategy(),
        email_strategy(),
        (1u32..9999u32),
    )
        .prop_map(|(id, names, surnames, age, sex, phone, email, number)| PersonRegistration {
            identity_number: id,
            names,
            surnames,
            age,
            sex: sex.to_string(),
            phone,
            email,
            address: format!("Av. Universitaria {}, Lima", number),
        })
}
