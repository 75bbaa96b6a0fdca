use serde::{Deserialize, Serialize};
use url::Url;

use crate::types::TransactionDetails;

/// A successfully created payment.
///
/// Warnings attached to the response are delivered through a
/// [`WarningHandler`](crate::warnings::WarningHandler), not stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Transaction id assigned by the gateway.
    pub transaction: String,
    /// Where the customer is redirected to pay.
    pub payment_url: Url,
}

/// A decoded, non-error response document.
///
/// `errors` documents never become a payload; they are returned as
/// [`Error::Gateway`](crate::errors::Error::Gateway).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePayload {
    NewTransaction(NewTransaction),
    TransactionList(Vec<TransactionDetails>),
    /// The root element was present but empty: nothing was found.
    Empty,
}

impl ResponsePayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResponsePayload::Empty)
    }

    /// A short name of the payload kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponsePayload::NewTransaction(_) => "new_transaction",
            ResponsePayload::TransactionList(_) => "transactions",
            ResponsePayload::Empty => "empty",
        }
    }

    pub fn as_new_transaction(&self) -> Option<&NewTransaction> {
        match self {
            ResponsePayload::NewTransaction(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_transaction_list(&self) -> Option<&[TransactionDetails]> {
        match self {
            ResponsePayload::TransactionList(items) => Some(items),
            _ => None,
        }
    }
}
