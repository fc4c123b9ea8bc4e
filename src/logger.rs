//! Diagnostic side channel for request/response pairs.
//!
//! Loggers observe every attempt made by the executor. They receive
//! already-buffered bodies, so they can never consume a stream or change how
//! an attempt is classified.

use std::time::Duration;

use crate::{HeaderMap, Method};

/// One outgoing attempt.
#[derive(Clone, Copy, Debug)]
pub struct RequestLog<'a> {
    /// 1-based attempt number within the retry loop.
    pub attempt: usize,
    pub method: Method,
    pub url: &'a str,
    pub headers: &'a HeaderMap,
    pub body: Option<&'a [u8]>,
}

/// Response received for an attempt.
#[derive(Clone, Copy, Debug)]
pub struct ResponseLog<'a> {
    pub status: u16,
    pub headers: &'a HeaderMap,
    pub body: &'a [u8],
}

/// What an attempt produced.
#[derive(Clone, Copy, Debug)]
pub enum ResponseOutcome<'a> {
    Response(ResponseLog<'a>),
    Error(&'a reqwest::Error),
}

/// Observer of request/response pairs.
pub trait HttpLogger: Send + Sync {
    fn log_request(&self, request: &RequestLog<'_>);

    fn log_response(
        &self,
        request: &RequestLog<'_>,
        outcome: ResponseOutcome<'_>,
        duration: Duration,
    );
}

/// Default logger: emits one `tracing` event per request and per response.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl HttpLogger for TracingLogger {
    fn log_request(&self, request: &RequestLog<'_>) {
        tracing::info!(
            attempt = request.attempt,
            method = request.method.as_str(),
            url = request.url,
            header = ?request.headers,
            body = %body_text(request.body.unwrap_or_default()),
            "Request"
        );
    }

    fn log_response(
        &self,
        request: &RequestLog<'_>,
        outcome: ResponseOutcome<'_>,
        duration: Duration,
    ) {
        let duration_ms = saturating_millis(duration);
        match outcome {
            ResponseOutcome::Response(response) => tracing::info!(
                attempt = request.attempt,
                method = request.method.as_str(),
                url = request.url,
                status = response.status,
                duration_ms,
                header = ?response.headers,
                body = %body_text(response.body),
                "Response"
            ),
            ResponseOutcome::Error(err) => tracing::warn!(
                attempt = request.attempt,
                method = request.method.as_str(),
                url = request.url,
                duration_ms,
                error = %err,
                "Request failed"
            ),
        }
    }
}

/// Whole milliseconds in `duration`, clamped to `u64::MAX`.
fn saturating_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn body_text(body: &[u8]) -> std::borrow::Cow<'_, str> {
    String::from_utf8_lossy(body)
}
