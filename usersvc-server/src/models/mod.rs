//! Request/response contracts with validation at construction
//!
//! Raw request input is checked field by field; every problem is
//! reported, not just the first one.

pub mod validation;
pub mod user;
pub mod pagination;

pub use validation::{Location, ValidationDetail, ValidationError};
pub use user::{Email, NewUser, User};
pub use pagination::{ListParams, RawListParams};
