//! User contracts
//!
//! `NewUser` is what a client submits; `User` is what is stored and
//! returned (the submitted fields plus the database-assigned id).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use super::{Location, ValidationError};

/// Longest address accepted (RFC 5321 path limit minus the brackets)
const MAX_EMAIL_LEN: usize = 254;

/// Longest local part (before the `@`)
const MAX_LOCAL_LEN: usize = 64;

/// local@label.label.tld, alphabetic TLD of at least two letters
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
    )
    .expect("invalid email regex")
});

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
}

/// Validated email address, kept exactly as submitted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate the shape of an email address.
    ///
    /// # Example
    /// ```
    /// use usersvc_server::models::Email;
    ///
    /// assert!(Email::new("ivan@example.com").is_ok());
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &'static str| ValidationError::InvalidFormat {
            location: Location::Body,
            field: "email",
            reason,
        };

        if s.len() > MAX_EMAIL_LEN {
            return Err(invalid("address is too long"));
        }

        if !EMAIL_RE.is_match(s) {
            return Err(invalid("value is not a valid email address"));
        }

        // Regex guarantees exactly one '@'
        let local = s.split('@').next().unwrap_or_default();
        if local.len() > MAX_LOCAL_LEN {
            return Err(invalid("local part is too long"));
        }
        if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
            return Err(invalid("local part has a misplaced dot"));
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated creation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub bio: Option<String>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: Email, bio: Option<String>) -> Self {
        Self {
            name: name.into(),
            email,
            bio,
        }
    }

    /// Build from a JSON request body, collecting every field error.
    ///
    /// `name` and `email` must be present strings; `bio` may be absent,
    /// `null`, or a string. Unknown fields are ignored.
    pub fn from_json(body: &Value) -> Result<Self, Vec<ValidationError>> {
        let Some(object) = body.as_object() else {
            return Err(vec![ValidationError::Malformed {
                location: Location::Body,
                reason: "request body must be a JSON object".into(),
            }]);
        };

        let mut errors = Vec::new();

        let name = match required_string(object.get("name"), "name") {
            Ok(name) => Some(name.to_owned()),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let email = match required_string(object.get("email"), "email").and_then(Email::new) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let bio = match object.get("bio") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(ValidationError::InvalidType {
                    location: Location::Body,
                    field: "bio",
                    expected: "a string or null",
                });
                None
            }
        };

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(Self { name, email, bio }),
            _ => Err(errors),
        }
    }
}

fn required_string<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::Missing {
            location: Location::Body,
            field,
        }),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::InvalidType {
            location: Location::Body,
            field,
            expected: "a string",
        }),
    }
}
