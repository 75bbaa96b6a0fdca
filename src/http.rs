//! Blocking HTTP transport built on `reqwest`.
//!
//! [`HttpTransport`] uses `reqwest::blocking`; do not create or call it from
//! inside an async runtime.

use std::time::Duration;

use reqwest::{
    StatusCode,
    header::{ACCEPT, CONTENT_TYPE},
};
use url::Url;

use crate::transport::{Credentials, Transport, TransportError};

const XML_CONTENT_TYPE: &str = "application/xml; charset=UTF-8";

/// Posts request documents with HTTP Basic authentication.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    pub client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        HttpTransport {
            client: reqwest::blocking::Client::new(),
        }
    }

    /// A transport whose requests fail with [`TransportError::Request`] after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(request_error)?;
        Ok(HttpTransport { client })
    }

    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        HttpTransport { client }
    }
}

fn request_error(err: reqwest::Error) -> TransportError {
    TransportError::Request(err.to_string())
}

/// Maps a response status onto the transport's failure kinds.
pub fn classify_status(status: StatusCode, url: &Url) -> Result<(), TransportError> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED => Err(TransportError::Unauthorized),
        StatusCode::NOT_FOUND => Err(TransportError::NotFound(url.to_string())),
        s => Err(TransportError::UnexpectedStatus {
            status: s.as_u16(),
            url: url.to_string(),
        }),
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        url: &Url,
        credentials: &Credentials,
        body: String,
    ) -> Result<String, TransportError> {
        let response = self
            .client
            .post(url.clone())
            .basic_auth(&credentials.user_id, Some(&credentials.api_key))
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .header(ACCEPT, "application/xml")
            .body(body)
            .send()
            .map_err(request_error)?;

        if let Err(err) = classify_status(response.status(), url) {
            tracing::debug!(status = %response.status(), "SOFORT request failed: {err}");
            return Err(err);
        }

        response.text().map_err(request_error)
    }
}
