//! Seams for dependency injection.
//!
//! - [`HttpClient`] - HTTP transport (GET, POST, DELETE)
//! - [`SessionStorage`] - access/refresh token storage

pub mod http;
pub mod storage;

pub use http::{Headers, HttpClient, HttpError, Method, Response};
pub use storage::SessionStorage;
