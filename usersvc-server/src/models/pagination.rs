//! Offset/limit pagination for the user listing

use serde::Deserialize;

use super::{Location, ValidationError};

/// Default number of rows to skip
pub const DEFAULT_SKIP: u32 = 0;

/// Default maximum number of rows returned
pub const DEFAULT_LIMIT: u32 = 100;

/// Validated listing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// Rows to skip from the start
    pub skip: u32,
    /// Maximum rows to return
    pub limit: u32,
}

impl ListParams {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        i64::from(self.skip)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Apply the window to an already ordered slice.
    pub fn window<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.skip as usize)
            .take(self.limit as usize)
            .cloned()
            .collect()
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query string as received, before number parsing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListParams {
    pub skip: Option<String>,
    pub limit: Option<String>,
}

impl TryFrom<RawListParams> for ListParams {
    type Error = Vec<ValidationError>;

    fn try_from(raw: RawListParams) -> Result<Self, Self::Error> {
        let skip = parse_count(raw.skip.as_deref(), "skip", DEFAULT_SKIP);
        let limit = parse_count(raw.limit.as_deref(), "limit", DEFAULT_LIMIT);

        match (skip, limit) {
            (Ok(skip), Ok(limit)) => Ok(Self { skip, limit }),
            (skip, limit) => Err([skip.err(), limit.err()].into_iter().flatten().collect()),
        }
    }
}

fn parse_count(
    value: Option<&str>,
    field: &'static str,
    default: u32,
) -> Result<u32, ValidationError> {
    let Some(value) = value else {
        return Ok(default);
    };

    let n: i64 = value.trim().parse().map_err(|_| ValidationError::InvalidType {
        location: Location::Query,
        field,
        expected: "an integer",
    })?;

    if n < 0 {
        return Err(ValidationError::InvalidFormat {
            location: Location::Query,
            field,
            reason: "must be greater than or equal to 0",
        });
    }

    u32::try_from(n).map_err(|_| ValidationError::InvalidFormat {
        location: Location::Query,
        field,
        reason: "value is too large",
    })
}
