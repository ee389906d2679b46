#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Shared HTTP request plumbing for the assistants-ox client
//!
//! This crate owns everything that is not specific to a single API resource:
//! joining paths onto the configured base URL, attaching authentication and
//! extra headers, encoding optional query parameters, sending JSON bodies and
//! decoding JSON responses, and turning error bodies into typed errors.

pub mod error;
pub mod request_builder;
pub mod timestamp;

pub use error::CommonRequestError;
pub use request_builder::{Endpoint, HttpMethod, QueryParams, RequestBuilder, RequestConfig};
pub use timestamp::Timestamp;

/// Re-export common types for convenience
pub use serde::{Deserialize, Serialize};
