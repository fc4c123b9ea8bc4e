//! `rest-json` is an async JSON-over-HTTP client with bounded retry.
//!
//! Requests are assembled with a fluent [`RequestBuilder`] obtained from
//! [`RestClient::request`]:
//! - bodies are serialized to JSON once and resent unchanged on every attempt
//! - successful responses (200..=226) are decoded into an optional result sink
//! - 500..=511 responses are retried up to
//!   [`ClientOptions::retry_max_attempts`] total attempts, with a fixed delay
//! - any other status, and every transport failure, is returned immediately
//!
//! One-shot helpers such as [`RestClient::get_for_json`] wrap the builder.

mod client;
mod error;
mod executor;
mod header;
pub mod logger;
mod options;
mod request;
mod retry;

pub use bytes::Bytes;
pub use client::RestClient;
pub use error::{RestError, ServerError};
pub use header::HeaderMap;
pub use logger::{HttpLogger, TracingLogger};
pub use options::ClientOptions;
pub use request::{Method, RequestBuilder, ResultSink, DEFAULT_CONTENT_TYPE};
pub use retry::{RetryPolicy, StatusClass};

pub type Result<T> = std::result::Result<T, RestError>;
