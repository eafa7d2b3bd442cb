//! Field validation for the login and sign-up forms.
//!
//! These rules only give the user early feedback. The authentication API
//! applies its own rules and has the final word.
//!
//! - name: at least 3 characters after trimming
//! - email: `local@domain.tld` shape
//! - password (sign-up): at least 6 characters, one of them not alphanumeric
//! - password (login): required
//! - confirmation: required and equal to the password

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const NAME_MIN_CHARS: usize = 3;
pub const PASSWORD_MIN_CHARS: usize = 6;

const NAME_TOO_SHORT: &str = "Name must be at least 3 characters long";
const INVALID_EMAIL: &str = "Please enter a valid email address";
const PASSWORD_REQUIRED: &str = "Password is required";
const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
const PASSWORD_NEEDS_SPECIAL: &str = "Password must contain at least one special character";
const CONFIRMATION_REQUIRED: &str = "Password confirmation is required";
const PASSWORDS_DIFFER: &str = "Passwords do not match";

/// Per-field error messages, keyed by the form field name.
///
/// Only the first failing rule of each field is reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<&'static str, &'static str>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.get(field).copied()
    }

    fn check(&mut self, field: &'static str, result: Result<(), &'static str>) {
        if let Err(message) = result {
            self.0.entry(field).or_insert(message);
        }
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Login form as submitted by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    /// Returns the failing fields.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check("email", validate_email(&self.email));
        errors.check("password", validate_required_password(&self.password));
        errors.into_result()
    }
}

/// Sign-up form as submitted by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// # Errors
    /// Returns the failing fields.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check("name", validate_name(&self.name));
        errors.check("email", validate_email(&self.email));
        errors.check("password", validate_new_password(&self.password));
        errors.check(
            "confirmPassword",
            validate_confirmation(&self.confirm_password, &self.password),
        );
        errors.into_result()
    }
}

/// # Errors
/// Returns the user-facing message when the name is too short.
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().chars().count() < NAME_MIN_CHARS {
        return Err(NAME_TOO_SHORT);
    }
    Ok(())
}

/// # Errors
/// Returns the user-facing message when the address is not `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(INVALID_EMAIL)
    }
}

/// # Errors
/// Returns the user-facing message when the password is empty.
pub fn validate_required_password(password: &str) -> Result<(), &'static str> {
    if password.is_empty() {
        return Err(PASSWORD_REQUIRED);
    }
    Ok(())
}

/// # Errors
/// Returns the user-facing message for the first rule the password breaks.
pub fn validate_new_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(PASSWORD_TOO_SHORT);
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PASSWORD_NEEDS_SPECIAL);
    }
    Ok(())
}

/// # Errors
/// Returns the user-facing message when the confirmation is empty or differs.
pub fn validate_confirmation(confirmation: &str, password: &str) -> Result<(), &'static str> {
    if confirmation.is_empty() {
        return Err(CONFIRMATION_REQUIRED);
    }
    if confirmation != password {
        return Err(PASSWORDS_DIFFER);
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || "_'+-.".contains(c);

    !local.is_empty()
        && local.chars().all(allowed)
        && !local.starts_with('.')
        && !local.ends_with(['.', '\''])
        && !local.contains("..")
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };

    !rest.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
        && rest.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}
