use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while building, sending or decoding an API request
#[derive(Error, Debug)]
pub enum CommonRequestError {
    /// HTTP transport failed (connection, TLS, timeout, invalid header, ...)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request body could not be serialized; nothing was sent
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The API answered with a non-success status and a structured error body
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
        code: Option<String>,
    },

    /// The API answered with a non-success status and an unrecognized body
    #[error("Unexpected response from API: {0}")]
    UnexpectedResponse(String),

    /// The API answered with a success status but the body did not decode
    #[error("HTTP {status} but failed to decode response: {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

impl CommonRequestError {
    /// HTTP status attached to the error, when one was received
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Serialize(_) | Self::UnexpectedResponse(_) => None,
        }
    }
}

/// Envelope of an OpenAI-format error body: `{"error": {...}}`
#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    /// The nested error object, absent on some gateway responses
    error: Option<ApiErrorBody>,
}

/// Specific error information from the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    /// Human-readable description
    message: String,
    /// Error category, e.g. `invalid_request_error`
    #[serde(rename = "type")]
    error_type: Option<String>,
    /// Machine-readable code; the API sends strings, numbers or null here
    #[serde(default, deserialize_with = "code_as_string")]
    code: Option<String>,
}

/// Accept any scalar as an error code and keep its textual form.
fn code_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Parse error response from HTTP status and body
#[must_use]
pub fn parse_error_response(status: reqwest::StatusCode, body: &bytes::Bytes) -> CommonRequestError {
    if let Ok(ApiErrorPayload { error: Some(error) }) = serde_json::from_slice::<ApiErrorPayload>(body) {
        return CommonRequestError::Api {
            status: status.as_u16(),
            message: error.message,
            error_type: error.error_type,
            code: error.code,
        };
    }

    // Fall back to raw body
    CommonRequestError::UnexpectedResponse(format!(
        "HTTP status {}: {}",
        status.as_u16(),
        String::from_utf8_lossy(body)
    ))
}
