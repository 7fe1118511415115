//! Field validators for untrusted input
//!
//! Every validator here is a pure predicate applied to raw user input before
//! it enters a person or enrollment record. All of them fail closed: empty or
//! whitespace-only input is never valid.
//!
//! # Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | Identity number | 8 digits after stripping spaces/hyphens, not all identical |
//! | Email | one `@`, dotted domain, charset `[a-z0-9@.-_]` after lowercasing |
//! | Phone | 9-15 chars after stripping separators, optional `+`, not all identical |
//! | Names | 2-50 letters and single spaces |
//! | Age | 16 to 100 inclusive |
//! | Sex | `M`, `F`, `MASCULINO`, `FEMENINO` (any case) |
//! | Address | 10-200 letters, digits, spaces and `.,#-°` |

/// Minimum accepted age in years
pub const MIN_AGE: i64 = 16;
/// Maximum accepted age in years
pub const MAX_AGE: i64 = 100;

const ACCENTED_LETTERS: &str = "áéíóúüñÁÉÍÓÚÜÑ";
const ADDRESS_SYMBOLS: &str = ".,#-°";
const SEX_CATEGORIES: [&str; 4] = ["M", "F", "MASCULINO", "FEMENINO"];

fn is_name_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ACCENTED_LETTERS.contains(c)
}

fn all_same_char(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => true,
    }
}

/// Strips spaces and hyphens from a raw identity number
pub fn normalize_identity_number(raw: &str) -> String {
    raw.chars().filter(|c| *c != ' ' && *c != '-').collect()
}

/// Validates a national identity number
///
/// ```
/// use core_kernel::validation::is_valid_identity_number;
///
/// assert!(is_valid_identity_number("12345678"));
/// assert!(!is_valid_identity_number("11111111"));
/// assert!(!is_valid_identity_number("1234567"));
/// ```
pub fn is_valid_identity_number(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }

    let digits = normalize_identity_number(raw);
    if digits.chars().count() != 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    !all_same_char(&digits)
}

/// Validates an email address
pub fn is_valid_email(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }

    let email = raw.trim().to_lowercase();

    if email.starts_with('@')
        || email.starts_with('.')
        || email.ends_with('@')
        || email.ends_with('.')
    {
        return false;
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return false;
    }

    if !parts[1].contains('.') {
        return false;
    }

    email
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "@.-_".contains(c))
}

/// Validates a phone number in national or international form
pub fn is_valid_phone(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }

    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    let total = stripped.chars().count();
    if !(9..=15).contains(&total) {
        return false;
    }

    let digits = match stripped.strip_prefix('+') {
        Some(rest) => {
            if !(9..=14).contains(&rest.chars().count()) {
                return false;
            }
            rest
        }
        None => stripped.as_str(),
    };

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    !all_same_char(digits)
}

/// Validates given names or surnames
pub fn is_valid_name(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }

    let name = raw.trim();

    if !(2..=50).contains(&name.chars().count()) {
        return false;
    }

    if !name.chars().all(|c| c == ' ' || is_name_letter(c)) {
        return false;
    }

    !name.contains("  ")
}

/// Validates an age in years
pub fn is_valid_age(age: i64) -> bool {
    (MIN_AGE..=MAX_AGE).contains(&age)
}

/// Validates a sex category
pub fn is_valid_sex(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }

    let upper = raw.trim().to_uppercase();
    SEX_CATEGORIES.contains(&upper.as_str())
}

/// Validates a postal address
pub fn is_valid_address(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return false;
    }

    let address = raw.trim();

    if !(10..=200).contains(&address.chars().count()) {
        return false;
    }

    address
        .chars()
        .all(|c| c == ' ' || c.is_ascii_digit() || is_name_letter(c) || ADDRESS_SYMBOLS.contains(c))
}
