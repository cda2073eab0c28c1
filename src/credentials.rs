// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local credential validation, applied before any identity provider call.
//!
//! The rules are deliberately lenient: the email check only requires an
//! `@` (the provider does its own checking server-side), and the password
//! check is a minimum length. A failed check means no network call is made.

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Which form field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Email,
    Password,
}

impl std::fmt::Display for CredentialField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialField::Email => write!(f, "email"),
            CredentialField::Password => write!(f, "password"),
        }
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("Please enter your {0}.")]
    EmptyField(CredentialField),

    #[error("Enter a valid email address.")]
    MalformedEmail,

    #[error("Password must be at least {MIN_PASSWORD_LEN} characters.")]
    TooShort,
}

impl CredentialError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            CredentialError::EmptyField(_) => "empty_field",
            CredentialError::MalformedEmail => "malformed_email",
            CredentialError::TooShort => "password_too_short",
        }
    }
}

/// Validated sign-in/sign-up credentials, with the email trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Validate raw form input. Pure; no side effects.
///
/// The email is trimmed of surrounding whitespace before any further use.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, CredentialError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CredentialError::EmptyField(CredentialField::Email));
    }
    if !email.contains('@') {
        return Err(CredentialError::MalformedEmail);
    }

    if password.is_empty() {
        return Err(CredentialError::EmptyField(CredentialField::Password));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CredentialError::TooShort);
    }

    Ok(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_email_rejected() {
        assert_eq!(
            validate_credentials("", "secret123"),
            Err(CredentialError::EmptyField(CredentialField::Email))
        );
        // Whitespace-only counts as empty after trimming
        assert_eq!(
            validate_credentials("   ", "secret123"),
            Err(CredentialError::EmptyField(CredentialField::Email))
        );
    }

    #[test]
    fn email_without_at_rejected() {
        for email in ["nurse.example.com", "not-an-email", "a"] {
            assert_eq!(
                validate_credentials(email, "secret123"),
                Err(CredentialError::MalformedEmail),
                "expected MalformedEmail for {email:?}"
            );
        }
    }

    #[test]
    fn email_is_trimmed() {
        let creds = validate_credentials("  nurse@example.com  ", "secret123").unwrap();
        assert_eq!(creds.email, "nurse@example.com");
    }

    #[test]
    fn empty_password_rejected() {
        assert_eq!(
            validate_credentials("nurse@example.com", ""),
            Err(CredentialError::EmptyField(CredentialField::Password))
        );
    }

    #[test]
    fn short_password_rejected_six_accepted() {
        assert_eq!(
            validate_credentials("nurse@example.com", "12345"),
            Err(CredentialError::TooShort)
        );
        // Exactly six characters is valid
        assert!(validate_credentials("nurse@example.com", "123456").is_ok());
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(
            CredentialError::EmptyField(CredentialField::Email).code(),
            "empty_field"
        );
        assert_eq!(CredentialError::MalformedEmail.code(), "malformed_email");
        assert_eq!(CredentialError::TooShort.code(), "password_too_short");
    }
}
