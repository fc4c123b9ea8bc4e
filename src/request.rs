use std::fmt;

use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};

use crate::{executor::Executor, HeaderMap, RestClient, RestError, Result};

/// Content type sent when the caller supplies none, or an empty one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

const CONTENT_TYPE: &str = "Content-Type";

/// HTTP methods supported by the request builder.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// Destination for a decoded JSON response body.
///
/// Implemented for every [`DeserializeOwned`] type, so any `&mut T` can be
/// handed to [`RequestBuilder::result`].
pub trait ResultSink {
    fn decode_json(&mut self, body: &[u8]) -> serde_json::Result<()>;
}

impl<T: DeserializeOwned> ResultSink for T {
    fn decode_json(&mut self, body: &[u8]) -> serde_json::Result<()> {
        *self = serde_json::from_slice(body)?;
        Ok(())
    }
}

/// Fully prepared request handed to the executor.
#[derive(Clone, Debug)]
pub(crate) struct RequestDescriptor {
    pub(crate) method: Method,
    pub(crate) url: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Option<Bytes>,
}

/// Fluent, single-use accumulator for one request.
///
/// Obtained from [`RestClient::request`]. Dispatching consumes the builder.
///
/// # Example
///
/// ```no_run
/// use rest_json::{ClientOptions, RestClient};
/// use serde::Deserialize;
///
/// #[derive(Default, Deserialize)]
/// struct User {
///     id: String,
///     name: String,
/// }
///
/// # async fn run() -> rest_json::Result<()> {
/// let client = RestClient::new(ClientOptions::default())?;
/// let mut user = User::default();
/// client
///     .request()
///     .header("Authorization", "Bearer token")
///     .result(&mut user)
///     .get("https://api.example.com/users/1")
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct RequestBuilder<'a> {
    client: &'a RestClient,
    headers: HeaderMap,
    body: Option<serde_json::Result<Bytes>>,
    result: Option<&'a mut (dyn ResultSink + Send)>,
}

impl<'a> RequestBuilder<'a> {
    pub(crate) fn new(client: &'a RestClient) -> Self {
        Self {
            client,
            headers: HeaderMap::new(),
            body: None,
            result: None,
        }
    }

    /// Sets `key` to `value`, replacing earlier values.
    pub fn header(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.set(key, value);
        self
    }

    /// Merges `headers` in; each key present in `headers` replaces the
    /// builder's values for that key.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        for (key, values) in headers.iter() {
            self.headers.remove(key);
            for value in values {
                self.headers.append(key, value.as_str());
            }
        }
        self
    }

    /// Sets the JSON request body. The last call wins.
    ///
    /// Serialization happens here; a failure is reported when the request
    /// is dispatched, before anything is sent.
    pub fn body<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_vec(body).map(Bytes::from));
        self
    }

    /// Decodes a successful response body into `sink`.
    ///
    /// Without a sink the body is read and discarded.
    pub fn result<T: DeserializeOwned + Send>(mut self, sink: &'a mut T) -> Self {
        self.result = Some(sink);
        self
    }

    pub async fn get(self, url: &str) -> Result<()> {
        self.dispatch(Method::Get, url).await
    }

    pub async fn post(self, url: &str) -> Result<()> {
        self.dispatch(Method::Post, url).await
    }

    pub async fn put(self, url: &str) -> Result<()> {
        self.dispatch(Method::Put, url).await
    }

    pub async fn delete(self, url: &str) -> Result<()> {
        self.dispatch(Method::Delete, url).await
    }

    async fn dispatch(self, method: Method, url: &str) -> Result<()> {
        let Self {
            client,
            mut headers,
            body,
            result,
        } = self;

        if headers.get(CONTENT_TYPE).is_empty() {
            headers.set(CONTENT_TYPE, DEFAULT_CONTENT_TYPE);
        }
        let body = body.transpose().map_err(RestError::Serialize)?;

        let request = RequestDescriptor {
            method,
            url: url.to_owned(),
            headers,
            body,
        };
        let payload = Executor::new(client).execute(&request).await?;

        if let Some(sink) = result {
            sink.decode_json(&payload)
                .map_err(|source| RestError::Deserialize {
                    source,
                    body: String::from_utf8_lossy(&payload).into_owned(),
                })?;
        }
        Ok(())
    }
}

impl fmt::Debug for RequestBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("headers", &self.headers)
            .field("has_body", &self.body.is_some())
            .field("has_result", &self.result.is_some())
            .finish()
    }
}
