//! HTTP request and error types

pub mod error;
pub mod json;
pub mod query;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType, SERVICE_APOLOGY};
pub use json::Json;
pub use query::QueryRequest;
