//! Parameters of a payment (multipay) request.

use std::collections::BTreeMap;

use bon::Builder;
use rust_decimal::Decimal;

use crate::{
    errors::{Error, Result},
    reason::strip_reason,
    types::{NotificationAddresses, ParamValue},
};

/// Parameters of a payment request.
///
/// Every field is optional so the same record serves as client-wide defaults and
/// as per-call overrides; see [`PaymentParams::merge`]. Fields the gateway may
/// introduce later go into [`extra`](PaymentParams::extra) and are passed through.
///
/// ```
/// use sofort_core::types::PaymentParams;
///
/// let params = PaymentParams::builder()
///     .success_url("https://shop.example/paid")
///     .abort_url("https://shop.example/abort")
///     .reasons(vec!["Invoice 0001".to_string()])
///     .build();
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParams {
    #[builder(into)]
    pub project_id: Option<String>,
    #[builder(into)]
    pub amount: Option<Decimal>,
    #[builder(into)]
    pub currency_code: Option<String>,
    #[builder(into)]
    pub success_url: Option<String>,
    #[builder(into)]
    pub abort_url: Option<String>,

    #[builder(into)]
    pub interface_version: Option<String>,
    #[builder(into)]
    pub language_code: Option<String>,
    /// Seconds the customer has to finish the payment.
    pub timeout: Option<u32>,
    #[builder(into)]
    pub email_customer: Option<String>,
    #[builder(into)]
    pub phone_customer: Option<String>,
    #[builder(into)]
    pub timeout_url: Option<String>,
    pub success_link_redirect: Option<bool>,

    /// Reason lines shown on the customer's bank statement.
    pub reasons: Option<Vec<String>>,
    pub user_variables: Option<Vec<String>>,

    pub notification_urls: Option<NotificationAddresses>,
    pub notification_emails: Option<NotificationAddresses>,

    /// Passthrough fields, encoded after the known optional fields in key order.
    #[builder(default)]
    pub extra: BTreeMap<String, ParamValue>,
}

impl PaymentParams {
    /// Fields that must be present before a payment request is encoded.
    pub const MANDATORY: [&'static str; 3] = ["abort_url", "reasons", "success_url"];

    /// Returns a new record holding `overrides` where set and `self` elsewhere.
    ///
    /// `self` is left untouched; extra fields are merged key by key.
    pub fn merge(&self, overrides: PaymentParams) -> PaymentParams {
        let mut extra = self.extra.clone();
        extra.extend(overrides.extra);

        PaymentParams {
            project_id: overrides.project_id.or_else(|| self.project_id.clone()),
            amount: overrides.amount.or(self.amount),
            currency_code: overrides
                .currency_code
                .or_else(|| self.currency_code.clone()),
            success_url: overrides.success_url.or_else(|| self.success_url.clone()),
            abort_url: overrides.abort_url.or_else(|| self.abort_url.clone()),
            interface_version: overrides
                .interface_version
                .or_else(|| self.interface_version.clone()),
            language_code: overrides
                .language_code
                .or_else(|| self.language_code.clone()),
            timeout: overrides.timeout.or(self.timeout),
            email_customer: overrides
                .email_customer
                .or_else(|| self.email_customer.clone()),
            phone_customer: overrides
                .phone_customer
                .or_else(|| self.phone_customer.clone()),
            timeout_url: overrides.timeout_url.or_else(|| self.timeout_url.clone()),
            success_link_redirect: overrides
                .success_link_redirect
                .or(self.success_link_redirect),
            reasons: overrides.reasons.or_else(|| self.reasons.clone()),
            user_variables: overrides
                .user_variables
                .or_else(|| self.user_variables.clone()),
            notification_urls: overrides
                .notification_urls
                .or_else(|| self.notification_urls.clone()),
            notification_emails: overrides
                .notification_emails
                .or_else(|| self.notification_emails.clone()),
            extra,
        }
    }

    /// Checks that every field in [`PaymentParams::MANDATORY`] is present.
    pub fn validate(&self) -> Result<()> {
        if self.abort_url.is_none() {
            return Err(Error::MissingField("abort_url"));
        }
        if self.reasons.is_none() {
            return Err(Error::MissingField("reasons"));
        }
        if self.success_url.is_none() {
            return Err(Error::MissingField("success_url"));
        }
        Ok(())
    }

    /// Removes characters the gateway rejects from every reason line.
    pub fn strip_reasons(&mut self) {
        if let Some(reasons) = self.reasons.as_mut() {
            for reason in reasons.iter_mut() {
                *reason = strip_reason(reason);
            }
        }
    }

    /// Adds or replaces a passthrough field.
    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}
