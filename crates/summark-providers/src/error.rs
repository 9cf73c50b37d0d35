//! Provider error types.

use thiserror::Error;

/// Errors that can occur when calling an external collaborator.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Authentication failed (missing or invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The service answered with a body we could not use.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Map a transport-level reqwest error.
    pub(crate) fn from_transport(e: reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            ProviderError::Timeout(timeout_secs)
        } else {
            ProviderError::NetworkError(e.to_string())
        }
    }
}

/// Turn anything but HTTP 200 into an error, keeping the body as the message.
pub(crate) async fn ensure_ok(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status().as_u16();
    if status == 200 {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    if status == 401 || status == 403 {
        return Err(ProviderError::AuthenticationFailed(body));
    }
    Err(ProviderError::ApiError {
        status,
        message: body,
    })
}
