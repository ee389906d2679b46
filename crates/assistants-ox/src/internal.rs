use assistants_ox_common::{Endpoint, HttpMethod, RequestBuilder, RequestConfig};
use serde::{Serialize, de::DeserializeOwned};

use crate::{AssistantsRequestError, ClientConfig};

const BETA_HEADER: &str = "OpenAI-Beta";
const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// Wraps the shared `RequestBuilder` with the Assistants-specific headers
#[derive(Debug, Clone)]
pub(crate) struct AssistantsRequestHelper {
    request_builder: RequestBuilder,
    beta_marker: String,
}

impl AssistantsRequestHelper {
    pub(crate) fn new(client: reqwest::Client, config: &ClientConfig) -> Self {
        let mut request_config = RequestConfig::new(config.base_url())
            .with_bearer_token(config.api_key())
            .with_user_agent(config.user_agent());

        if let Some(organization) = config.organization() {
            request_config = request_config.with_header(ORGANIZATION_HEADER, organization);
        }

        Self {
            request_builder: RequestBuilder::new(client, request_config),
            beta_marker: config.beta_header_value(),
        }
    }

    /// Every endpoint on this surface is a beta API and carries the marker.
    pub(crate) fn endpoint(&self, path: impl Into<String>, method: HttpMethod) -> Endpoint {
        Endpoint::new(path, method).with_header(BETA_HEADER, self.beta_marker.as_str())
    }

    pub(crate) async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<T, AssistantsRequestError> {
        Ok(self.request_builder.request(endpoint).await?)
    }

    pub(crate) async fn request_json<T, B>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<T, AssistantsRequestError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        Ok(self.request_builder.request_json(endpoint, Some(body)).await?)
    }
}
