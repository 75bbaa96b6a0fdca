//! Decoded transaction records.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One `transaction_details` record of a `transactions` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetails {
    pub project_id: Option<u64>,
    /// Transaction id, e.g. `123456-123456-56A29EC6-066A`.
    pub transaction: String,
    /// Whether the transaction ran against the test environment.
    pub test: Option<bool>,
    pub time: Option<DateTime<FixedOffset>>,
    pub status: Option<String>,
    pub status_reason: Option<String>,
    pub status_modified: Option<DateTime<FixedOffset>>,
    pub payment_method: Option<String>,
    pub language_code: Option<String>,
    pub amount: Option<Decimal>,
    pub amount_refunded: Option<Decimal>,
    pub currency_code: Option<String>,
    pub reasons: Vec<String>,
    pub user_variables: Vec<String>,
    pub sender: Option<BankAccount>,
    pub recipient: Option<BankAccount>,
    pub email_customer: Option<String>,
    pub phone_customer: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub costs: Option<Costs>,
    pub su: Option<SuDetails>,
    pub status_history_items: Vec<StatusHistoryItem>,
}

/// Sender or recipient bank account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub holder: Option<String>,
    pub account_number: Option<String>,
    pub bank_code: Option<String>,
    pub bank_name: Option<String>,
    pub bic: Option<String>,
    pub iban: Option<String>,
    pub country_code: Option<String>,
}

/// Fees charged by the gateway for a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Costs {
    pub fees: Option<Decimal>,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<Decimal>,
}

/// Flags of the `su` payment product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuDetails {
    pub consumer_protection: Option<bool>,
}

/// One status change of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryItem {
    pub status: Option<String>,
    pub status_reason: Option<String>,
    pub time: Option<DateTime<FixedOffset>>,
}
