//! Validation error types

use std::fmt;

use serde::Serialize;

/// Part of the request a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    Query,
    Path,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Query => "query",
            Self::Path => "path",
        }
    }
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is absent
    Missing {
        location: Location,
        field: &'static str,
    },

    /// Field has the wrong JSON/scalar type
    InvalidType {
        location: Location,
        field: &'static str,
        expected: &'static str,
    },

    /// Field has the right type but an unacceptable value
    InvalidFormat {
        location: Location,
        field: &'static str,
        reason: &'static str,
    },

    /// The whole input could not be parsed (e.g. broken JSON)
    Malformed { location: Location, reason: String },
}

impl ValidationError {
    /// Location path, e.g. `["body", "email"]`.
    pub fn loc(&self) -> Vec<&'static str> {
        match self {
            Self::Missing { location, field }
            | Self::InvalidType { location, field, .. }
            | Self::InvalidFormat { location, field, .. } => vec![location.as_str(), *field],
            Self::Malformed { location, .. } => vec![location.as_str()],
        }
    }

    /// Machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::InvalidType { .. } => "type_error",
            Self::InvalidFormat { .. } => "value_error",
            Self::Malformed { .. } => "parse_error",
        }
    }

    pub fn detail(&self) -> ValidationDetail {
        ValidationDetail {
            loc: self.loc(),
            msg: self.to_string(),
            kind: self.kind(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field, .. } => write!(f, "{} is required", field),
            Self::InvalidType {
                field, expected, ..
            } => write!(f, "{} must be {}", field, expected),
            Self::InvalidFormat { field, reason, .. } => write!(f, "{}: {}", field, reason),
            Self::Malformed { reason, .. } => write!(f, "{}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// One entry of a 422 response body
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDetail {
    pub loc: Vec<&'static str>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
}
