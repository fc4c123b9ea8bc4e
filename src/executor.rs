use std::time::Instant;

use bytes::Bytes;
use tokio::time::sleep;

use crate::{
    logger::{HttpLogger, RequestLog, ResponseLog, ResponseOutcome},
    request::RequestDescriptor,
    retry::{RetryPolicy, StatusClass},
    HeaderMap, RestClient, RestError, Result, ServerError,
};

/// Result of a single attempt.
#[derive(Debug)]
pub(crate) enum AttemptOutcome {
    Success(Bytes),
    RetryableServerError(ServerError),
    TerminalServerError(ServerError),
    Transport(reqwest::Error),
}

impl AttemptOutcome {
    fn from_response(status: u16, body: Bytes) -> Self {
        match StatusClass::of(status) {
            StatusClass::Success => Self::Success(body),
            StatusClass::Retryable => Self::RetryableServerError(server_error(status, &body)),
            StatusClass::Terminal => Self::TerminalServerError(server_error(status, &body)),
        }
    }
}

/// Drives the attempt loop for one request.
pub(crate) struct Executor<'a> {
    http: &'a reqwest::Client,
    policy: &'a RetryPolicy,
    logger: Option<&'a dyn HttpLogger>,
}

impl<'a> Executor<'a> {
    pub(crate) fn new(client: &'a RestClient) -> Self {
        Self {
            http: client.http(),
            policy: client.policy(),
            logger: client.logger(),
        }
    }

    /// Runs the request until it succeeds, fails terminally, or the attempt
    /// budget is spent. Returns the body of the successful response.
    pub(crate) async fn execute(&self, request: &RequestDescriptor) -> Result<Bytes> {
        let mut attempt = 1usize;
        loop {
            match self.attempt(request, attempt).await {
                AttemptOutcome::Success(body) => return Ok(body),
                AttemptOutcome::Transport(err) => return Err(RestError::Transport(err)),
                AttemptOutcome::TerminalServerError(err) => return Err(RestError::Server(err)),
                AttemptOutcome::RetryableServerError(err) => {
                    let Some(delay) = self.policy.delay_after(attempt) else {
                        return Err(RestError::Server(err));
                    };

                    tracing::debug!(
                        method = request.method.as_str(),
                        url = %request.url,
                        attempt,
                        max_attempts = self.policy.max_attempts(),
                        status = err.status_code,
                        "retrying request after {} ms",
                        delay.as_millis()
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn attempt(&self, request: &RequestDescriptor, attempt: usize) -> AttemptOutcome {
        let mut builder = self
            .http
            .request(request.method.into(), request.url.as_str());
        for (name, values) in request.headers.iter() {
            for value in values {
                builder = builder.header(name, value.as_str());
            }
        }
        if let Some(timeout) = self.policy.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let log = RequestLog {
            attempt,
            method: request.method,
            url: &request.url,
            headers: &request.headers,
            body: request.body.as_deref(),
        };
        if let Some(logger) = self.logger {
            logger.log_request(&log);
        }

        let started = Instant::now();
        let exchange = match builder.send().await {
            // Reading the body to the end hands the connection back to the pool.
            Ok(response) => {
                let status = response.status().as_u16();
                let headers = match self.logger {
                    Some(_) => HeaderMap::from(response.headers()),
                    None => HeaderMap::new(),
                };
                response
                    .bytes()
                    .await
                    .map(|body| (status, headers, body))
            }
            Err(err) => Err(err),
        };

        if let Some(logger) = self.logger {
            let outcome = match &exchange {
                Ok((status, headers, body)) => ResponseOutcome::Response(ResponseLog {
                    status: *status,
                    headers,
                    body: &body[..],
                }),
                Err(err) => ResponseOutcome::Error(err),
            };
            logger.log_response(&log, outcome, started.elapsed());
        }

        match exchange {
            Ok((status, _, body)) => AttemptOutcome::from_response(status, body),
            Err(err) => AttemptOutcome::Transport(err),
        }
    }
}

fn server_error(status: u16, body: &[u8]) -> ServerError {
    ServerError::new(status, String::from_utf8_lossy(body))
}
