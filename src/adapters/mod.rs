//! Implementations of the traits in [`crate::traits`].
//!
//! - [`ReqwestHttpClient`] - HTTP over reqwest
//! - [`MemorySessionStorage`] - in-memory token storage
//! - [`mock`] - scripted HTTP for tests

pub mod memory_storage;
pub mod mock;
pub mod reqwest_http;

pub use memory_storage::MemorySessionStorage;
pub use mock::{MockHttpClient, MockResponse, RecordedRequest};
pub use reqwest_http::ReqwestHttpClient;
