use crate::error::{self, CommonRequestError};
use reqwest::{Method, RequestBuilder as ReqwestRequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace, warn};

/// HTTP method for API endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// Ordered query parameters where unset values are dropped entirely.
///
/// The API treats "parameter not sent" and "parameter sent empty" differently,
/// so `None` never turns into `key=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key=value` if `value` is `Some`, keeping insertion order.
    #[must_use]
    pub fn push_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.0.push((key.into(), value.to_string()));
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Borrow the collected pairs in insertion order
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    /// `None` when nothing was supplied, so the URL gets no `?` at all
    #[must_use]
    pub fn into_pairs(self) -> Option<Vec<(String, String)>> {
        if self.0.is_empty() { None } else { Some(self.0) }
    }
}

/// Represents an API endpoint with its configuration
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,
    pub extra_headers: Option<HashMap<String, String>>,
    pub query_params: Option<Vec<(String, String)>>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
            extra_headers: None,
            query_params: None,
        }
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.extra_headers.unwrap_or_default();
        headers.insert(key.into(), value.into());
        self.extra_headers = Some(headers);
        self
    }

    /// Attach query parameters; an empty set leaves the endpoint without a query.
    #[must_use]
    pub fn with_query(mut self, params: QueryParams) -> Self {
        self.query_params = params.into_pairs();
        self
    }
}

/// Configuration for request building
#[derive(Clone)]
pub struct RequestConfig {
    pub base_url: String,
    pub bearer_token: Option<String>,
    pub default_headers: HashMap<String, String>,
    pub user_agent: Option<String>,
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .field("default_headers", &self.default_headers)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl RequestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            bearer_token: None,
            default_headers: HashMap::new(),
            user_agent: None,
        }
    }

    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Join a path suffix onto the base URL with exactly one slash between them
    #[must_use]
    pub fn full_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Generic request builder that handles common HTTP patterns
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    /// Shared connection pool
    client: reqwest::Client,
    /// Base URL, auth and headers applied to every request
    config: RequestConfig,
}

impl RequestBuilder {
    #[must_use]
    pub fn new(client: reqwest::Client, config: RequestConfig) -> Self {
        Self { client, config }
    }

    /// Build a reqwest `RequestBuilder` for the given endpoint
    #[must_use]
    pub fn build_request(&self, endpoint: &Endpoint) -> ReqwestRequestBuilder {
        let url = self.config.full_url(&endpoint.path);
        let method: Method = endpoint.method.into();

        let mut req = self.client.request(method, &url);

        if let Some(ref params) = endpoint.query_params {
            req = req.query(params);
        }

        if let Some(ref token) = self.config.bearer_token {
            req = req.bearer_auth(token);
        }

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        // Endpoint headers go last so they win over defaults
        if let Some(ref headers) = endpoint.extra_headers {
            for (key, value) in headers {
                req = req.header(key, value);
            }
        }

        if let Some(ref user_agent) = self.config.user_agent {
            req = req.header("user-agent", user_agent);
        }

        if endpoint.method == HttpMethod::Post {
            req = req.header("content-type", "application/json");
        }

        req
    }

    /// Execute a request with an optional JSON body and decode the response.
    ///
    /// The body is serialized before anything goes on the wire; a failure
    /// there returns [`CommonRequestError::Serialize`] without sending.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn request_json<T, B>(
        &self,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<T, CommonRequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut req = self.build_request(endpoint);

        if let Some(body) = body {
            let val = serde_json::to_value(body).map_err(CommonRequestError::Serialize)?;
            trace!(path = %endpoint.path, payload = %val, "request body");
            req = req.json(&val);
        }

        debug!(
            method = ?endpoint.method,
            url = %self.config.full_url(&endpoint.path),
            "sending request"
        );
        let res = req.send().await?;
        Self::handle_response(res).await
    }

    /// Execute a request without body and decode the response
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and undecodable bodies.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<T, CommonRequestError> {
        self.request_json(endpoint, None::<&()>).await
    }

    /// Handle response and parse errors
    async fn handle_response<T: DeserializeOwned>(res: Response) -> Result<T, CommonRequestError> {
        let status = res.status();
        let bytes = res.bytes().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "request failed");
            return Err(error::parse_error_response(status, &bytes));
        }

        serde_json::from_slice::<T>(&bytes).map_err(|source| {
            warn!(status = status.as_u16(), error = %source, "failed to decode response body");
            CommonRequestError::Decode {
                status: status.as_u16(),
                source,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            }
        })
    }
}
