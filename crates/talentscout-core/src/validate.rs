//! Field validators.
//!
//! Pure functions: they never touch session state. Accepted values are
//! stable under re-validation of [`FieldValue::to_input`].

use lazy_static::lazy_static;
use regex::Regex;
use std::num::{IntErrorKind, ParseIntError};

use crate::profile::{Field, FieldValue};
use crate::ValidationError;

pub const MIN_PHONE_DIGITS: usize = 10;
pub const MIN_YEARS: u8 = 0;
pub const MAX_YEARS: u8 = 70;
pub const MAX_TECHNOLOGIES: usize = 5;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid");
}

/// Validate raw input for `field`
pub fn validate(field: Field, raw: &str) -> Result<FieldValue, ValidationError> {
    match field {
        Field::FullName | Field::DesiredPosition | Field::Location => {
            validate_free_text(raw).map(FieldValue::Text)
        }
        Field::Email => validate_email(raw).map(FieldValue::Text),
        Field::Phone => validate_phone(raw).map(FieldValue::Text),
        Field::YearsExperience => validate_years(raw).map(FieldValue::Years),
        Field::TechStack => validate_tech_stack(raw).map(FieldValue::TechStack),
    }
}

/// Rejects only blank input; everything else passes through unchanged
pub fn validate_free_text(raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(raw.to_string())
}

/// Syntactic check only; no DNS or mailbox verification
pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if !EMAIL.is_match(raw) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(raw.to_string())
}

/// Counts digits only; the formatted input is what gets stored
pub fn validate_phone(raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(ValidationError::TooFewDigits {
            required: MIN_PHONE_DIGITS,
            found: digits,
        });
    }
    Ok(raw.to_string())
}

pub fn validate_years(raw: &str) -> Result<u8, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }
    // A whole number too long for i64 is still a number, just out of range
    let years: i64 = trimmed.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => ValidationError::AboveMaximum { max: MAX_YEARS },
        IntErrorKind::NegOverflow => ValidationError::BelowMinimum { min: MIN_YEARS },
        _ => ValidationError::NotANumber,
    })?;
    if years < i64::from(MIN_YEARS) {
        return Err(ValidationError::BelowMinimum { min: MIN_YEARS });
    }
    if years > i64::from(MAX_YEARS) {
        return Err(ValidationError::AboveMaximum { max: MAX_YEARS });
    }
    Ok(years as u8)
}

/// Split on commas, trim, drop blanks, dedupe case-insensitively keeping the
/// first spelling, then keep at most [`MAX_TECHNOLOGIES`] entries.
pub fn validate_tech_stack(raw: &str) -> Result<Vec<String>, ValidationError> {
    let mut seen: Vec<String> = Vec::new();
    let mut stack: Vec<String> = Vec::new();

    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let key = token.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        stack.push(token.to_string());
    }

    if stack.is_empty() {
        return Err(ValidationError::NoTechnologies);
    }

    stack.truncate(MAX_TECHNOLOGIES);
    Ok(stack)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text() {
        assert_eq!(validate_free_text("Jane Doe"), Ok("Jane Doe".to_string()));
        assert_eq!(validate_free_text("   "), Err(ValidationError::Empty));
        assert_eq!(validate_free_text(""), Err(ValidationError::Empty));
    }

    #[test]
    fn test_email() {
        assert_eq!(
            validate_email("jane@example.com"),
            Ok("jane@example.com".to_string())
        );
        assert_eq!(validate_email("jane@example"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("jane.example.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("jane@example.c"), Err(ValidationError::InvalidEmail));
        assert!(validate_email("first.last+tag@sub.example.co.uk").is_ok());
    }

    #[test]
    fn test_phone() {
        assert_eq!(
            validate_phone("123-456-78"),
            Err(ValidationError::TooFewDigits {
                required: 10,
                found: 8
            })
        );
        assert_eq!(
            validate_phone("+1 (555) 123-4567"),
            Ok("+1 (555) 123-4567".to_string())
        );
        assert!(validate_phone("5551234567").is_ok());
        assert_eq!(validate_phone(""), Err(ValidationError::Empty));
    }

    #[test]
    fn test_years() {
        assert_eq!(validate_years("70"), Ok(70));
        assert_eq!(validate_years("0"), Ok(0));
        assert_eq!(
            validate_years("71"),
            Err(ValidationError::AboveMaximum { max: 70 })
        );
        assert_eq!(
            validate_years("-1"),
            Err(ValidationError::BelowMinimum { min: 0 })
        );
        assert_eq!(validate_years("abc"), Err(ValidationError::NotANumber));
        assert_eq!(validate_years("4.5"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_years_overflowing_whole_numbers_are_out_of_range() {
        assert_eq!(
            validate_years("100000000000000000000"),
            Err(ValidationError::AboveMaximum { max: 70 })
        );
        assert_eq!(
            validate_years(" -100000000000000000000 "),
            Err(ValidationError::BelowMinimum { min: 0 })
        );
        assert_eq!(validate_years("1e30"), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_years_reason_names_the_bound() {
        let too_high = validate_years("71").unwrap_err().to_string();
        assert!(too_high.contains("more than 70"));
        let too_low = validate_years("-1").unwrap_err().to_string();
        assert!(too_low.contains("less than 0"));
    }

    #[test]
    fn test_tech_stack_trims_and_dedupes() {
        assert_eq!(
            validate_tech_stack(" Python , sql,, python, SQL ,Docker "),
            Ok(vec![
                "Python".to_string(),
                "sql".to_string(),
                "Docker".to_string()
            ])
        );
    }

    #[test]
    fn test_tech_stack_truncates_to_five() {
        let stack = validate_tech_stack("A, B, C, D, E, F, G").unwrap();
        assert_eq!(stack, vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_tech_stack_dedupe_happens_before_truncation() {
        let stack = validate_tech_stack("Go, go, GO, Rust, C, Java, Kotlin, Swift").unwrap();
        assert_eq!(stack, vec!["Go", "Rust", "C", "Java", "Kotlin"]);
    }

    #[test]
    fn test_tech_stack_empty() {
        assert_eq!(validate_tech_stack(" , ,"), Err(ValidationError::NoTechnologies));
        assert_eq!(validate_tech_stack(""), Err(ValidationError::NoTechnologies));
    }

    #[test]
    fn test_revalidation_is_idempotent() {
        let cases = [
            (Field::FullName, "Jane Doe"),
            (Field::Email, "jane@example.com"),
            (Field::Phone, "+1 (555) 123-4567"),
            (Field::YearsExperience, " 07 "),
            (Field::DesiredPosition, "Data Engineer"),
            (Field::Location, "Berlin"),
            (Field::TechStack, "python, SQL , Python, Rust, Go, C, Java"),
        ];

        for (field, input) in cases {
            let first = validate(field, input).unwrap();
            let second = validate(field, &first.to_input()).unwrap();
            assert_eq!(first, second, "{} not stable", field);
        }
    }
}
