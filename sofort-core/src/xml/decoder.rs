//! Response document decoding.
//!
//! The root tag selects the payload:
//!
//! | root              | result                                              |
//! |-------------------|-----------------------------------------------------|
//! | any, empty        | [`ResponsePayload::Empty`]                          |
//! | `errors`          | `Err(`[`Error::Gateway`]`)`                         |
//! | `new_transaction` | [`ResponsePayload::NewTransaction`], warnings emitted |
//! | `transactions`    | [`ResponsePayload::TransactionList`]                |
//!
//! Any other root is a [`DecodeError::UnknownRoot`].
//!
//! A `warning` or `error` item that cannot be read is skipped and logged at
//! `WARN` level; it never turns a created payment or a gateway rejection into
//! a [`DecodeError`].

use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, FixedOffset};
use url::Url;

use crate::{
    errors::{DecodeError, Error, Result},
    types::{
        BankAccount, Costs, ErrorItem, GatewayErrors, NewTransaction, ResponsePayload,
        StatusHistoryItem, SuDetails, TransactionDetails, WarningItem,
    },
    warnings::WarningHandler,
    xml::{
        node::{XmlMap, XmlValue, parse_document},
        normalizer::{ListContainer, list_field, normalize},
    },
};

/// Decodes a response document.
///
/// Warnings of a `new_transaction` response are passed to `warnings` in
/// document order before the payload is returned.
pub fn decode_response(xml: &str, warnings: &dyn WarningHandler) -> Result<ResponsePayload> {
    let (root, value) = parse_document(xml)?;

    if value.is_null() {
        return Ok(ResponsePayload::Empty);
    }

    match root.as_str() {
        "errors" => Err(Error::Gateway(decode_errors(&value)?)),
        "new_transaction" => {
            let map = record(&value, "new_transaction")?;
            let (transaction, found) = decode_new_transaction(map)?;
            for warning in &found {
                warnings.on_warning(warning);
            }
            Ok(ResponsePayload::NewTransaction(transaction))
        }
        "transactions" => Ok(ResponsePayload::TransactionList(decode_transactions(
            &value,
        )?)),
        _ => Err(DecodeError::UnknownRoot(root).into()),
    }
}

/// Root-level `error` items first, then the `errors` container of every child
/// element (e.g. `su`) in document order.
fn decode_errors(value: &XmlValue) -> std::result::Result<GatewayErrors, DecodeError> {
    let mut errors = problems(
        normalize(value, ListContainer::Errors.item_tag()),
        "error",
        decode_error,
    );

    if let Some(map) = value.as_map() {
        for (_, child) in map.iter().filter(|(tag, _)| *tag != "error") {
            let groups: Vec<&XmlValue> = match child {
                XmlValue::List(items) => items.iter().collect(),
                other => vec![other],
            };
            for group in groups.into_iter().filter_map(XmlValue::as_map) {
                let items = list_field(group, ListContainer::Errors);
                errors.extend(problems(items, "error", decode_error));
            }
        }
    }

    if errors.is_empty() {
        return Err(DecodeError::MissingField("error".to_string()));
    }
    Ok(GatewayErrors::new(errors))
}

fn decode_problem(
    map: &XmlMap,
) -> std::result::Result<(u32, String, Option<String>), DecodeError> {
    let code = parsed(map, "code")?.ok_or_else(|| DecodeError::MissingField("code".to_string()))?;
    let message = text(map, "message")?.unwrap_or_default().to_string();
    let field = owned(map, "field")?;
    Ok((code, message, field))
}

fn decode_error(map: &XmlMap) -> std::result::Result<ErrorItem, DecodeError> {
    let (code, message, field) = decode_problem(map)?;
    Ok(ErrorItem::new(code, message, field))
}

fn decode_warning(map: &XmlMap) -> std::result::Result<WarningItem, DecodeError> {
    let (code, message, field) = decode_problem(map)?;
    Ok(WarningItem::new(code, message, field))
}

/// Decodes `error`/`warning` items, logging and skipping those that cannot be read.
fn problems<T>(
    items: Vec<&XmlValue>,
    tag: &str,
    decode: impl Fn(&XmlMap) -> std::result::Result<T, DecodeError>,
) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match with_record(item, tag, &decode) {
            Ok(problem) => Some(problem),
            Err(err) => {
                tracing::warn!(element = tag, item = ?item, "Skipping unreadable SOFORT item: {err}");
                None
            }
        })
        .collect()
}

fn decode_new_transaction(
    map: &XmlMap,
) -> std::result::Result<(NewTransaction, Vec<WarningItem>), DecodeError> {
    let transaction = required(map, "transaction")?.to_string();
    let payment_url = required(map, "payment_url")?;
    let payment_url = Url::parse(payment_url).map_err(|e| invalid("payment_url", payment_url, e))?;

    let warnings = problems(
        list_field(map, ListContainer::Warnings),
        "warning",
        decode_warning,
    );

    Ok((
        NewTransaction {
            transaction,
            payment_url,
        },
        warnings,
    ))
}

fn decode_transactions(
    value: &XmlValue,
) -> std::result::Result<Vec<TransactionDetails>, DecodeError> {
    let tag = ListContainer::Transactions.item_tag();
    normalize(value, tag)
        .into_iter()
        .map(|item| with_record(item, tag, decode_transaction_details))
        .collect()
}

fn decode_transaction_details(
    map: &XmlMap,
) -> std::result::Result<TransactionDetails, DecodeError> {
    Ok(TransactionDetails {
        project_id: parsed(map, "project_id")?,
        transaction: required(map, "transaction")?.to_string(),
        test: flag(map, "test")?,
        time: timestamp(map, "time")?,
        status: owned(map, "status")?,
        status_reason: owned(map, "status_reason")?,
        status_modified: timestamp(map, "status_modified")?,
        payment_method: owned(map, "payment_method")?,
        language_code: owned(map, "language_code")?,
        amount: parsed(map, "amount")?,
        amount_refunded: parsed(map, "amount_refunded")?,
        currency_code: owned(map, "currency_code")?,
        reasons: text_items(map, ListContainer::Reasons)?,
        user_variables: text_items(map, ListContainer::UserVariables)?,
        sender: optional_record(map, "sender", decode_bank_account)?,
        recipient: optional_record(map, "recipient", decode_bank_account)?,
        email_customer: owned(map, "email_customer")?,
        phone_customer: owned(map, "phone_customer")?,
        exchange_rate: parsed(map, "exchange_rate")?,
        costs: optional_record(map, "costs", decode_costs)?,
        su: optional_record(map, "su", |su| {
            Ok(SuDetails {
                consumer_protection: flag(su, "consumer_protection")?,
            })
        })?,
        status_history_items: list_field(map, ListContainer::StatusHistoryItems)
            .into_iter()
            .map(|item| with_record(item, "status_history_item", decode_status_history_item))
            .collect::<std::result::Result<_, _>>()?,
    })
}

fn decode_bank_account(map: &XmlMap) -> std::result::Result<BankAccount, DecodeError> {
    Ok(BankAccount {
        holder: owned(map, "holder")?,
        account_number: owned(map, "account_number")?,
        bank_code: owned(map, "bank_code")?,
        bank_name: owned(map, "bank_name")?,
        bic: owned(map, "bic")?,
        iban: owned(map, "iban")?,
        country_code: owned(map, "country_code")?,
    })
}

fn decode_costs(map: &XmlMap) -> std::result::Result<Costs, DecodeError> {
    Ok(Costs {
        fees: parsed(map, "fees")?,
        currency_code: owned(map, "currency_code")?,
        exchange_rate: parsed(map, "exchange_rate")?,
    })
}

fn decode_status_history_item(
    map: &XmlMap,
) -> std::result::Result<StatusHistoryItem, DecodeError> {
    Ok(StatusHistoryItem {
        status: owned(map, "status")?,
        status_reason: owned(map, "status_reason")?,
        time: timestamp(map, "time")?,
    })
}

// Field helpers. An absent element and an empty one both read as `None`.

fn invalid(field: &str, value: &str, reason: impl Display) -> DecodeError {
    DecodeError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn shape(field: &str, expected: &'static str) -> DecodeError {
    DecodeError::UnexpectedShape {
        field: field.to_string(),
        expected,
    }
}

fn text<'a>(map: &'a XmlMap, name: &str) -> std::result::Result<Option<&'a str>, DecodeError> {
    match map.get(name) {
        None | Some(XmlValue::Null) => Ok(None),
        Some(XmlValue::Text(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(shape(name, "text")),
    }
}

fn owned(map: &XmlMap, name: &str) -> std::result::Result<Option<String>, DecodeError> {
    Ok(text(map, name)?.map(str::to_string))
}

fn required<'a>(map: &'a XmlMap, name: &str) -> std::result::Result<&'a str, DecodeError> {
    text(map, name)?.ok_or_else(|| DecodeError::MissingField(name.to_string()))
}

fn parsed<T>(map: &XmlMap, name: &str) -> std::result::Result<Option<T>, DecodeError>
where
    T: FromStr,
    T::Err: Display,
{
    text(map, name)?
        .map(|s| s.parse::<T>().map_err(|e| invalid(name, s, e)))
        .transpose()
}

/// `1`/`0`, also accepting `true`/`false`.
fn flag(map: &XmlMap, name: &str) -> std::result::Result<Option<bool>, DecodeError> {
    text(map, name)?
        .map(|s| match s {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(invalid(name, s, "expected 0 or 1")),
        })
        .transpose()
}

fn timestamp(
    map: &XmlMap,
    name: &str,
) -> std::result::Result<Option<DateTime<FixedOffset>>, DecodeError> {
    text(map, name)?
        .map(|s| DateTime::parse_from_rfc3339(s).map_err(|e| invalid(name, s, e)))
        .transpose()
}

/// The children of a record element; an empty element is a record with no fields.
fn with_record<T>(
    value: &XmlValue,
    name: &str,
    decode: impl FnOnce(&XmlMap) -> std::result::Result<T, DecodeError>,
) -> std::result::Result<T, DecodeError> {
    match value {
        XmlValue::Map(map) => decode(map),
        XmlValue::Null => decode(&XmlMap::default()),
        _ => Err(shape(name, "element with children")),
    }
}

fn record<'a>(value: &'a XmlValue, name: &str) -> std::result::Result<&'a XmlMap, DecodeError> {
    value
        .as_map()
        .ok_or_else(|| shape(name, "element with children"))
}

fn optional_record<T>(
    map: &XmlMap,
    name: &str,
    decode: impl FnOnce(&XmlMap) -> std::result::Result<T, DecodeError>,
) -> std::result::Result<Option<T>, DecodeError> {
    match map.get(name) {
        None | Some(XmlValue::Null) => Ok(None),
        Some(value) => with_record(value, name, decode).map(Some),
    }
}

fn text_items(
    map: &XmlMap,
    container: ListContainer,
) -> std::result::Result<Vec<String>, DecodeError> {
    list_field(map, container)
        .into_iter()
        .map(|item| match item {
            XmlValue::Text(s) => Ok(s.clone()),
            XmlValue::Null => Ok(String::new()),
            _ => Err(shape(container.tag(), "a list of text items")),
        })
        .collect()
}
