//! Local pre-network validation for registration input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FieldError;

/// Syntactic email plausibility check, the same pattern the registration
/// form applies: non-whitespace `@` non-whitespace `.` non-whitespace.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Validates registration input before any network call.
///
/// Returns one error per offending field; an empty vector means the input
/// may be sent to the backend.
pub fn validate_registration(name: &str, email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    if email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.push(FieldError::new("email", "Email is invalid"));
    }

    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }

    errors
}
