//! Token handling for the JudgeFlow backend.
//!
//! - [`Tokens`] - access/refresh pair issued at login
//! - [`AuthenticatedClient`] - attaches bearer tokens and refreshes once on 401

pub mod request;
pub mod tokens;

pub use request::AuthenticatedClient;
pub use tokens::{RefreshResponse, Tokens};
