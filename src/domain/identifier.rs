// Copyright (c) 2025 - Cowboy AI, Inc.
//! Identifier Value Object with DNS Label Validation
//!
//! Usernames, server names and server types all end up as parts of
//! Kubernetes object names, so they share one rule: a lowercase RFC 1123
//! label.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]([-a-z0-9]*[a-z0-9])?$").expect("identifier pattern is valid")
});

/// Which identifier field a value was meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierField {
    Username,
    ServerName,
    ServerType,
}

impl IdentifierField {
    /// Field name as used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::ServerName => "servername",
            Self::ServerType => "servertype",
        }
    }
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("{field} must not be empty")]
    Empty { field: IdentifierField },

    #[error(
        "{field} must contain only alphanumeric, lowercase characters \
         (start with a letter, hyphens allowed inside): {value:?}"
    )]
    InvalidFormat { field: IdentifierField, value: String },
}

impl IdentifierError {
    /// Field the rejected value was meant for
    pub fn field(&self) -> IdentifierField {
        match self {
            Self::Empty { field } | Self::InvalidFormat { field, .. } => *field,
        }
    }
}

/// Validate `value` as an identifier for `field`
///
/// # Invariants
/// - Starts with a lowercase ASCII letter
/// - Contains only lowercase ASCII letters, digits and hyphens
/// - Ends with a lowercase ASCII letter or digit
///
/// # Examples
///
/// ```rust
/// use servconf::domain::{validate_identifier, IdentifierField};
///
/// assert!(validate_identifier(IdentifierField::Username, "alice").is_ok());
/// assert!(validate_identifier(IdentifierField::Username, "web-01").is_ok());
/// assert!(validate_identifier(IdentifierField::Username, "Bob!").is_err());
/// assert!(validate_identifier(IdentifierField::Username, "-lead").is_err());
/// ```
pub fn validate_identifier(
    field: IdentifierField,
    value: impl AsRef<str>,
) -> Result<Identifier, IdentifierError> {
    let value = value.as_ref();

    if value.is_empty() {
        return Err(IdentifierError::Empty { field });
    }

    if !IDENTIFIER_PATTERN.is_match(value) {
        return Err(IdentifierError::InvalidFormat {
            field,
            value: value.to_string(),
        });
    }

    Ok(Identifier(value.to_lowercase()))
}

/// Validated lowercase DNS label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Create a new identifier for `field` with validation
    pub fn new(field: IdentifierField, value: impl AsRef<str>) -> Result<Self, IdentifierError> {
        validate_identifier(field, value)
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() || !IDENTIFIER_PATTERN.is_match(&raw) {
            return Err(serde::de::Error::custom(format!(
                "invalid identifier: {raw:?}"
            )));
        }
        Ok(Self(raw))
    }
}
