//! HTTP request and response types

pub mod error;
pub mod json;
pub mod translate;

pub use error::{ApiError, ApiErrorResponse, GENERIC_SERVER_ERROR};
pub use json::Json;
pub use translate::TranslateResponse;
