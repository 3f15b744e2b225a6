//! Error types shared by the client library and the terminal front end.
//!
//! | Type | Raised by |
//! |------|-----------|
//! | [`ApiError`] | every call in [`crate::api`] |
//! | [`ValidationError`] | client-side form checks, before any request |

mod api;
mod validation;

pub use api::ApiError;
pub use validation::ValidationError;

/// Result alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;
