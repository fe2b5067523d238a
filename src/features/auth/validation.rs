//! Client-side validation schemas for the auth forms.
//!
//! Validation is synchronous and runs before any request is built; a form with
//! field errors never reaches the network. Messages are user-facing.

use regex::Regex;
use std::{fmt, sync::LazyLock};

/// Minimum password length for new passwords.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Minimum OTP length.
pub const MIN_OTP_LENGTH: usize = 6;

static EMAIL_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .ok()
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Per-field messages collected by a schema, in field order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        // One message per field, first failing rule wins.
        if self.get(field).is_none() {
            self.0.push(FieldError {
                field,
                message: message.into(),
            });
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when no rule failed.
    ///
    /// # Errors
    /// Returns `self` when at least one field failed validation.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                writeln!(formatter)?;
            }
            write!(formatter, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Fails when `value` is empty.
pub fn required(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.is_empty() {
        errors.push(field, message);
    }
}

/// Fails when `value` has fewer than `min` characters.
pub fn min_len(errors: &mut FieldErrors, field: &'static str, value: &str, min: usize, message: &str) {
    if value.chars().count() < min {
        errors.push(field, message);
    }
}

/// Fails when `value` is not a plausible email address.
pub fn email(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if !is_valid_email(value) {
        errors.push(field, message);
    }
}

/// Fails when the confirmation differs from the password.
pub fn confirms(
    errors: &mut FieldErrors,
    field: &'static str,
    password: &str,
    confirmation: &str,
    message: &str,
) {
    if password != confirmation {
        errors.push(field, message);
    }
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_some_and(|re| !value.contains("..") && re.is_match(value))
}
