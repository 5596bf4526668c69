//! Custom Axum extractors
//!
//! Each extractor validates its part of the request and rejects with
//! `ApiError::Validation`, so malformed input never reaches the store.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde_json::Value;

use super::error::ApiError;
use crate::models::{ListParams, Location, NewUser, RawListParams, ValidationError};

/// Extract and validate a user creation body
///
/// A body without `Content-Type` is read as JSON; any other non-JSON
/// content type is a body validation error.
pub struct ValidNewUser(pub NewUser);

impl<S> FromRequest<S> for ValidNewUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !accepts_as_json(req.headers()) {
            return Err(ValidationError::Malformed {
                location: Location::Body,
                reason: "request body must be JSON (Content-Type: application/json)".into(),
            }
            .into());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejection {
                status: e.status(),
                message: e.body_text(),
            })?;

        let body: Value = serde_json::from_slice(&bytes).map_err(|e| ValidationError::Malformed {
            location: Location::Body,
            reason: format!("invalid JSON body: {}", e),
        })?;

        let new_user = NewUser::from_json(&body)?;
        Ok(Self(new_user))
    }
}

/// No content type, `application/json`, or an `application/*+json` type.
fn accepts_as_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let Ok(value) = value.to_str() else {
        return false;
    };

    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Extract and validate `skip`/`limit` from the query string
pub struct ValidListParams(pub ListParams);

impl<S> FromRequestParts<S> for ValidListParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw): Query<RawListParams> = Query::from_request_parts(parts, state)
            .await
            .map_err(|e| ValidationError::Malformed {
                location: Location::Query,
                reason: e.body_text(),
            })?;

        Ok(Self(ListParams::try_from(raw)?))
    }
}

/// Extract and validate an integer user id from path
pub struct ValidUserId(pub i64);

impl<S> FromRequestParts<S> for ValidUserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ValidationError::Malformed {
                location: Location::Path,
                reason: e.body_text(),
            })?;

        let id = raw.parse::<i64>().map_err(|_| ValidationError::InvalidType {
            location: Location::Path,
            field: "user_id",
            expected: "an integer",
        })?;

        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        headers
    }

    #[test]
    fn json_content_types() {
        assert!(accepts_as_json(&headers(None)));
        assert!(accepts_as_json(&headers(Some("application/json"))));
        assert!(accepts_as_json(&headers(Some("Application/JSON; charset=utf-8"))));
        assert!(accepts_as_json(&headers(Some("application/merge-patch+json"))));
    }

    #[test]
    fn other_content_types() {
        assert!(!accepts_as_json(&headers(Some("text/plain"))));
        assert!(!accepts_as_json(&headers(Some(
            "application/x-www-form-urlencoded"
        ))));
        assert!(!accepts_as_json(&headers(Some("multipart/form-data; boundary=x"))));
    }
}
