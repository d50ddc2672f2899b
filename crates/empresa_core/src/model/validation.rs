//! Field validation shared by company and obligation writes.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("valid email regex")
});

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trimming. Carries the wire name.
    BlankField(&'static str),
    /// `email` does not look like an address.
    InvalidEmail(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField(field));
    }
    Ok(())
}

pub(crate) fn require_email(value: &str) -> Result<(), ValidationError> {
    if value.len() > 254 || !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidEmail(value.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{require_email, require_text, ValidationError};

    #[test]
    fn email_accepts_common_addresses() {
        for value in ["email@teste.com", "a.b+c@sub.example.com.br", "x@y.io"] {
            require_email(value).unwrap_or_else(|err| panic!("{value} rejected: {err}"));
        }
    }

    #[test]
    fn email_rejects_malformed_addresses() {
        for value in ["", "plain", "no-domain@", "@no-local.com", "a@b", "a b@c.com", "a@-b.com"] {
            assert!(
                matches!(require_email(value), Err(ValidationError::InvalidEmail(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn blank_text_reports_field_name() {
        assert_eq!(
            require_text("nome", "   "),
            Err(ValidationError::BlankField("nome"))
        );
        assert!(require_text("nome", "Empresa").is_ok());
    }
}
