use crate::{transport::TransportError, types::GatewayErrors};

/// Error types for SOFORT client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mandatory request field was not provided. Raised before any network call.
    #[error("Mandatory field \"{0}\" is not specified")]
    MissingField(&'static str),

    /// An extra field name is not a valid element name or shadows a known field.
    /// Raised before any network call.
    #[error("Extra field \"{name}\" {reason}")]
    InvalidExtraField { name: String, reason: &'static str },

    /// The transport failed or classified the HTTP response as a failure.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request document could not be written.
    #[error("XML encode error: {0}")]
    Encode(String),

    /// The response document does not have a shape this client understands.
    #[error("XML decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The gateway answered with an `errors` document.
    #[error("Gateway rejected the request: {0}")]
    Gateway(#[from] GatewayErrors),
}

/// Errors raised while turning a response document into typed values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("document has no root element")]
    MissingRoot,

    #[error("unknown response root element <{0}>")]
    UnknownRoot(String),

    #[error("missing required element <{0}>")]
    MissingField(String),

    #[error("element <{field}> has an unexpected shape; expected {expected}")]
    UnexpectedShape {
        field: String,
        expected: &'static str,
    },

    #[error("element <{field}> holds invalid value \"{value}\": {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("expected a {expected} response, got {found}")]
    UnexpectedPayload {
        expected: &'static str,
        found: &'static str,
    },
}

/// A specialized `Result` type for SOFORT operations.
pub type Result<T> = std::result::Result<T, Error>;
