//! Test doubles for the trait seams in [`crate::traits`].
//!
//! - [`MockHttpClient`] - scripted responses, recorded requests
//!
//! Token storage needs no mock: [`crate::adapters::MemorySessionStorage`]
//! is already in-memory and cheap to construct.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
