//! The transport collaborator the client sends request documents through.
//!
//! The core never inspects HTTP status codes itself: a [`Transport`] either
//! returns the response body or a [`TransportError`] that already classifies the failure.

use std::fmt::Debug;

use url::Url;

/// HTTP Basic credentials for the gateway: the user id is the username, the API key the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub api_key: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Credentials {
            user_id: user_id.into(),
            api_key: api_key.into(),
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("api_key", &"***")
            .finish()
    }
}

/// Failures reported by a [`Transport`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// HTTP 401: the user id / API key pair was rejected.
    #[error("Unauthorized: the gateway rejected the credentials")]
    Unauthorized,

    /// HTTP 404.
    #[error("SOFORT resource not found: {0}")]
    NotFound(String),

    /// Any other non-2xx status.
    #[error("Unexpected response status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Network, TLS or body read failure.
    #[error("HTTP request failed: {0}")]
    Request(String),
}

/// Sends one request document and returns the response document.
///
/// Implementations must be safe to share between threads; the client issues
/// one request per call and never retries.
pub trait Transport: Send + Sync {
    fn send(&self, url: &Url, credentials: &Credentials, body: String)
    -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(
        &self,
        url: &Url,
        credentials: &Credentials,
        body: String,
    ) -> Result<String, TransportError> {
        (**self).send(url, credentials, body)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        url: &Url,
        credentials: &Credentials,
        body: String,
    ) -> Result<String, TransportError> {
        (**self).send(url, credentials, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_masks_api_key() {
        let credentials = Credentials::new("123456", "secret-key");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("123456"));
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn test_not_found_message_names_url() {
        let err = TransportError::NotFound("https://api.sofort.com/api/xml".to_string());
        assert_eq!(
            err.to_string(),
            "SOFORT resource not found: https://api.sofort.com/api/xml"
        );
    }
}
