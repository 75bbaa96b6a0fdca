//! The gateway client.

use std::sync::Arc;

use bon::Builder;
use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;

use crate::{
    config::ClientConfig,
    errors::{DecodeError, Error, Result},
    transport::Transport,
    types::{
        NewTransaction, PaymentParams, ResponsePayload, SearchFilters, TransactionDetails,
        TransactionQuery,
    },
    warnings::{LogWarnings, WarningHandler},
    xml::{decode_response, encode_payment, encode_transaction_request},
};

/// Source of "now" for transaction searches.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

fn default_warnings() -> Arc<dyn WarningHandler> {
    Arc::new(LogWarnings)
}

fn default_clock() -> Clock {
    Arc::new(|| Local::now().naive_local())
}

/// A SOFORT client.
///
/// Every call works on its own copy of the configured defaults, so one client
/// can be shared between threads. Calls are never retried.
///
/// Each operation returns `Ok(None)` when the gateway answers with an empty
/// document, which it does when nothing matches the request.
#[derive(Builder)]
pub struct Client<T: Transport> {
    transport: T,
    config: ClientConfig,
    /// Receives gateway warnings; logs them with `tracing` unless replaced.
    #[builder(default = default_warnings())]
    warnings: Arc<dyn WarningHandler>,
    #[builder(default = default_clock())]
    clock: Clock,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Client::builder().transport(transport).config(config).build()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Creates a payment and returns the transaction id and the URL to send the customer to.
    ///
    /// `params` is merged over the configured defaults. Fails with
    /// [`Error::MissingField`] before anything is sent when `abort_url`,
    /// `reasons` or `success_url` is set in neither. Characters the gateway
    /// rejects are removed from the reasons.
    pub fn payment(
        &self,
        amount: impl Into<Decimal>,
        params: PaymentParams,
    ) -> Result<Option<NewTransaction>> {
        let amount = PaymentParams {
            amount: Some(amount.into()),
            ..PaymentParams::default()
        };
        let mut params = self.config.payment_defaults().merge(amount).merge(params);
        params.validate()?;
        params.strip_reasons();

        match self.request("payment", encode_payment(&params)?)? {
            ResponsePayload::NewTransaction(transaction) => Ok(Some(transaction)),
            ResponsePayload::Empty => Ok(None),
            other => Err(unexpected("new_transaction", &other)),
        }
    }

    /// Looks transactions up by id.
    ///
    /// ```no_run
    /// # fn run(client: sofort::Client<sofort::http::HttpTransport>) -> sofort::errors::Result<()> {
    /// let one = client.details(["123456-123456-56A29EC6-066A"])?;
    /// let many = client.details(vec![
    ///     "123456-123456-56A29EC6-066A".to_string(),
    ///     "123456-123456-56A2A0C3-CA99".to_string(),
    /// ])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn details<I, S>(&self, ids: I) -> Result<Option<Vec<TransactionDetails>>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transactions("details", TransactionQuery::by_ids(ids))
    }

    /// Searches transactions.
    ///
    /// Missing dates are filled in with [`SearchFilters::resolve`] against the
    /// client's clock.
    pub fn find_transactions(
        &self,
        filters: SearchFilters,
    ) -> Result<Option<Vec<TransactionDetails>>> {
        let filters = filters.resolve((self.clock)());
        self.transactions("find_transactions", filters.into())
    }

    fn transactions(
        &self,
        operation: &'static str,
        query: TransactionQuery,
    ) -> Result<Option<Vec<TransactionDetails>>> {
        match self.request(operation, encode_transaction_request(&query)?)? {
            ResponsePayload::TransactionList(items) => Ok(Some(items)),
            ResponsePayload::Empty => Ok(None),
            other => Err(unexpected("transactions", &other)),
        }
    }

    fn request(&self, operation: &'static str, body: String) -> Result<ResponsePayload> {
        tracing::debug!(operation, bytes = body.len(), "Sending SOFORT request");

        let response = self
            .transport
            .send(&self.config.base_url, &self.config.credentials, body)?;

        match decode_response(&response, self.warnings.as_ref()) {
            Ok(payload) => {
                tracing::debug!(operation, kind = payload.kind(), "SOFORT response decoded");
                Ok(payload)
            }
            Err(Error::Gateway(errors)) => {
                tracing::debug!(operation, codes = ?errors.codes(), "SOFORT request rejected");
                Err(Error::Gateway(errors))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(feature = "http-client")]
impl Client<crate::http::HttpTransport> {
    /// A client posting over HTTPS with a default [`HttpTransport`](crate::http::HttpTransport).
    pub fn http(config: ClientConfig) -> Self {
        Client::new(crate::http::HttpTransport::new(), config)
    }
}

fn unexpected(expected: &'static str, found: &ResponsePayload) -> Error {
    DecodeError::UnexpectedPayload {
        expected,
        found: found.kind(),
    }
    .into()
}
