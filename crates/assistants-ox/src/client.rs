use std::future::Future;

use assistants_ox_common::{Endpoint, HttpMethod};
use serde::{Serialize, de::DeserializeOwned};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::{AssistantsRequestError, ClientConfig, internal::AssistantsRequestHelper};

/// Client for the thread messages resource of the OpenAI Assistants API.
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct Assistants {
    config: ClientConfig,
    helper: AssistantsRequestHelper,
    cancel: Option<CancellationToken>,
}

impl Assistants {
    /// Build a client, creating an HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// [`AssistantsRequestError::MissingApiKey`] for an empty key and
    /// [`AssistantsRequestError::InvalidConfig`] for a malformed base URL or
    /// an HTTP client that cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, AssistantsRequestError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AssistantsRequestError::InvalidConfig(e.to_string()))?;
        Self::with_http_client(config, client)
    }

    /// Build a client on top of an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Same validation as [`Assistants::new`].
    pub fn with_http_client(
        config: ClientConfig,
        client: reqwest::Client,
    ) -> Result<Self, AssistantsRequestError> {
        if config.api_key().is_empty() {
            return Err(AssistantsRequestError::MissingApiKey);
        }
        reqwest::Url::parse(config.base_url()).map_err(|e| {
            AssistantsRequestError::InvalidConfig(format!(
                "invalid base URL {:?}: {e}",
                config.base_url()
            ))
        })?;

        debug!(
            base_url = config.base_url(),
            assistant_version = config.assistant_version(),
            "building assistants client"
        );

        let helper = AssistantsRequestHelper::new(client, &config);
        Ok(Self {
            config,
            helper,
            cancel: None,
        })
    }

    /// Create a client from `OPENAI_API_KEY` and friends.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`] and [`Assistants::new`].
    pub fn from_env() -> Result<Self, AssistantsRequestError> {
        Self::new(ClientConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// A handle whose calls resolve to [`AssistantsRequestError::Cancelled`]
    /// once `token` is cancelled, aborting any request still in flight.
    ///
    /// Dropping a call's future also aborts it; the token is for callers that
    /// need an explicit error instead.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    pub(crate) fn endpoint(&self, path: impl Into<String>, method: HttpMethod) -> Endpoint {
        self.helper.endpoint(path, method)
    }

    /// Generic method for API requests that return JSON
    pub(crate) async fn api_request<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> Result<T, AssistantsRequestError> {
        self.cancellable(self.helper.request(&endpoint)).await
    }

    /// Generic method for API requests with JSON body
    pub(crate) async fn api_request_with_body<T, B>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, AssistantsRequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.cancellable(self.helper.request_json(&endpoint, body))
            .await
    }

    async fn cancellable<T>(
        &self,
        call: impl Future<Output = Result<T, AssistantsRequestError>>,
    ) -> Result<T, AssistantsRequestError> {
        let Some(token) = &self.cancel else {
            return call.await;
        };

        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("request cancelled");
                Err(AssistantsRequestError::Cancelled)
            }
            result = call => result,
        }
    }
}
