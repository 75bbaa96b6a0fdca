//! XML marshalling for the gateway's request and response documents.
//!
//! - [`grouper`]: collapses notification addresses that share a destination.
//! - [`encoder`]: writes `multipay` and `transaction_request` documents.
//! - [`node`]: a generic parsed tree of a response document.
//! - [`normalizer`]: turns the gateway's container/item lists into sequences.
//! - [`decoder`]: maps a response tree onto [`ResponsePayload`](crate::types::ResponsePayload).

pub mod decoder;
pub mod encoder;
pub mod grouper;
pub mod node;
pub mod normalizer;

pub use decoder::decode_response;
pub use encoder::{encode_payment, encode_transaction_request};
