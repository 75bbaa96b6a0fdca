//! SOFORT gateway core library.
//!
//! This library provides the data model and the XML marshalling layer for the
//! SOFORT XML-over-HTTP API: request documents are built by [`xml::encoder`],
//! response documents are parsed by [`xml::decoder`] into [`types::ResponsePayload`].
//!
//! Network access is out of scope here; it is delegated to a [`transport::Transport`].

pub mod errors;
pub mod reason;
pub mod transport;
pub mod types;
pub mod warnings;
pub mod xml;

/// Token the gateway substitutes with the transaction id inside URLs and reasons.
pub const TRANSACTION_ID_PLACEHOLDER: &str = "-TRANSACTION-";
