use std::fmt;
use std::time::Duration;

use bon::Builder;

use crate::AssistantsRequestError;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const DEFAULT_ASSISTANT_VERSION: &str = "v2";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Immutable client settings, fixed when the client is built.
#[derive(Clone, Builder)]
pub struct ClientConfig {
    /// API key for authentication
    #[builder(into)]
    pub(crate) api_key: String,

    /// Base URL for the API (allows for custom endpoints)
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    pub(crate) base_url: String,

    /// Assistants API version sent in the `OpenAI-Beta` header
    #[builder(default = DEFAULT_ASSISTANT_VERSION.to_string(), into)]
    pub(crate) assistant_version: String,

    /// Sent as `OpenAI-Organization` when set
    #[builder(into)]
    pub(crate) organization: Option<String>,

    #[builder(default = DEFAULT_TIMEOUT)]
    pub(crate) timeout: Duration,

    #[builder(default = concat!("assistants-ox/", env!("CARGO_PKG_VERSION")).to_string(), into)]
    pub(crate) user_agent: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("assistant_version", &self.assistant_version)
            .field("organization", &self.organization)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Defaults for everything but the key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Read `OPENAI_API_KEY`, and optionally `OPENAI_BASE_URL` and
    /// `OPENAI_ORGANIZATION`, from the environment.
    ///
    /// # Errors
    ///
    /// [`AssistantsRequestError::MissingApiKey`] if the key is unset or empty.
    pub fn from_env() -> Result<Self, AssistantsRequestError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(AssistantsRequestError::MissingApiKey)?;

        Ok(Self::builder()
            .api_key(api_key)
            .maybe_base_url(std::env::var("OPENAI_BASE_URL").ok())
            .maybe_organization(std::env::var("OPENAI_ORGANIZATION").ok())
            .build())
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn assistant_version(&self) -> &str {
        &self.assistant_version
    }

    #[must_use]
    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Value of the `OpenAI-Beta` header, e.g. `assistants=v2`
    #[must_use]
    pub fn beta_header_value(&self) -> String {
        format!("assistants={}", self.assistant_version)
    }
}
