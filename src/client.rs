use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    executor::Executor,
    logger::{HttpLogger, TracingLogger},
    request::RequestDescriptor,
    retry::RetryPolicy,
    ClientOptions, HeaderMap, Method, RequestBuilder, RestError, Result,
};

#[derive(Clone)]
/// JSON-over-HTTP client with bounded, status-based retry.
///
/// Holds only immutable configuration and a pooled `reqwest::Client`, so a
/// single instance (or its clones) can serve concurrent requests. Per-call
/// state lives in the [`RequestBuilder`] returned by [`RestClient::request`].
pub struct RestClient {
    http: reqwest::Client,
    policy: RetryPolicy,
    logger: Option<Arc<dyn HttpLogger>>,
    options: ClientOptions,
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("options", &self.options)
            .field("logger", &self.logger.as_ref().map(|_| "<installed>"))
            .finish()
    }
}

impl RestClient {
    /// Creates a client from `options`.
    ///
    /// Fails only when the underlying HTTP client cannot be built.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!options.verify_tls)
            .build()
            .map_err(RestError::Builder)?;
        let logger: Option<Arc<dyn HttpLogger>> = if options.log_enabled {
            Some(Arc::new(TracingLogger))
        } else {
            None
        };

        Ok(Self {
            http,
            policy: RetryPolicy::from(&options),
            logger,
            options,
        })
    }

    /// Creates a client with [`ClientOptions::default`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(ClientOptions::default())
    }

    /// Installs a custom request/response logger and turns logging on.
    pub fn with_logger(mut self, logger: Arc<dyn HttpLogger>) -> Self {
        self.logger = Some(logger);
        self.options.log_enabled = true;
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Starts a new single-use request.
    pub fn request(&self) -> RequestBuilder<'_> {
        RequestBuilder::new(self)
    }

    /// Sends `body` unchanged and returns the raw body of a successful
    /// response.
    ///
    /// Status handling and retries match the JSON helpers, but no
    /// Content-Type is added and nothing is decoded. Use it for endpoints
    /// that do not speak JSON.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        headers: Option<HeaderMap>,
        body: Option<Bytes>,
    ) -> Result<Bytes> {
        let request = RequestDescriptor {
            method,
            url: url.to_owned(),
            headers: headers.unwrap_or_default(),
            body,
        };
        Executor::new(self).execute(&request).await
    }

    /// GETs `url` and decodes the JSON response into `response`.
    pub async fn get_for_json<T>(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        response: &mut T,
    ) -> Result<()>
    where
        T: DeserializeOwned + Send,
    {
        self.request()
            .headers(headers.unwrap_or_default())
            .result(response)
            .get(url)
            .await
    }

    /// GETs `url` with a JSON body and decodes the JSON response.
    pub async fn get_for_json_with_request_object<B, T>(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        request: &B,
        response: &mut T,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Send,
    {
        self.request()
            .headers(headers.unwrap_or_default())
            .body(request)
            .result(response)
            .get(url)
            .await
    }

    /// POSTs a JSON body to `url`, discarding the response body.
    pub async fn post_for_json<B>(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        request: &B,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.request()
            .headers(headers.unwrap_or_default())
            .body(request)
            .post(url)
            .await
    }

    /// POSTs a JSON body to `url` and decodes the JSON response.
    pub async fn post_for_json_with_response_object<B, T>(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        request: &B,
        response: &mut T,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Send,
    {
        self.request()
            .headers(headers.unwrap_or_default())
            .body(request)
            .result(response)
            .post(url)
            .await
    }

    /// PUTs a JSON body to `url`, discarding the response body.
    pub async fn put_for_json<B>(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        request: &B,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.request()
            .headers(headers.unwrap_or_default())
            .body(request)
            .put(url)
            .await
    }

    /// DELETEs `url` with a JSON body, discarding the response body.
    pub async fn delete_for_json<B>(
        &self,
        url: &str,
        headers: Option<HeaderMap>,
        request: &B,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.request()
            .headers(headers.unwrap_or_default())
            .body(request)
            .delete(url)
            .await
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub(crate) fn logger(&self) -> Option<&dyn HttpLogger> {
        self.logger.as_deref()
    }
}
