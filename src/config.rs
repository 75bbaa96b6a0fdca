//! Client configuration.

use bon::Builder;
use url::Url;
use url_macro::url;

use crate::{transport::Credentials, types::PaymentParams};

/// Currency used when neither the configuration nor the call sets one.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Value of the `interface_version` field sent with every payment.
pub const INTERFACE_VERSION: &str = concat!("sofort-rs_v.", env!("CARGO_PKG_VERSION"));

/// Everything a [`Client`](crate::Client) needs besides its transport.
///
/// `defaults` holds fall-back values for any payment field. Values passed to
/// [`Client::payment`](crate::Client::payment) take precedence over them, and
/// they take precedence over the other fields of this struct.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Endpoint every document is posted to.
    #[builder(default = url!("https://api.sofort.com/api/xml"))]
    pub base_url: Url,
    pub credentials: Credentials,
    #[builder(into)]
    pub project_id: String,
    #[builder(into, default = DEFAULT_CURRENCY.to_string())]
    pub currency_code: String,
    #[builder(into, default = INTERFACE_VERSION.to_string())]
    pub interface_version: String,
    /// Redirect the customer to `success_url` automatically after paying.
    #[builder(default = true)]
    pub success_link_redirect: bool,
    #[builder(default)]
    pub defaults: PaymentParams,
}

impl ClientConfig {
    /// Payment parameters every call starts from.
    ///
    /// Returns a fresh copy; the configuration itself is never modified.
    pub fn payment_defaults(&self) -> PaymentParams {
        let base = PaymentParams {
            project_id: Some(self.project_id.clone()),
            currency_code: Some(self.currency_code.clone()),
            interface_version: Some(self.interface_version.clone()),
            success_link_redirect: Some(self.success_link_redirect),
            ..PaymentParams::default()
        };
        base.merge(self.defaults.clone())
    }
}
