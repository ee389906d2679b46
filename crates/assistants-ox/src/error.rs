use assistants_ox_common::CommonRequestError;
use thiserror::Error;

/// Errors that can occur when calling the Assistants messages API
#[derive(Debug, Error)]
pub enum AssistantsRequestError {
    /// Request construction, transport, API status or response decoding
    #[error(transparent)]
    Request(#[from] CommonRequestError),

    /// Missing API key
    #[error("Missing API key")]
    MissingApiKey,

    /// The client could not be built from its configuration
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The bound cancellation token fired before the call completed
    #[error("Request cancelled")]
    Cancelled,
}

impl AssistantsRequestError {
    /// HTTP status of the failed call, if the server answered
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request(e) => e.status(),
            _ => None,
        }
    }

    /// True when a success response could not be decoded into the result type
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Request(CommonRequestError::Decode { .. }))
    }
}
