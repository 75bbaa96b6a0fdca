//! Request document writers.
//!
//! Output is compact (no indentation) and starts with an XML declaration.
//! Optional fields that are not set never appear in the document.

use std::{collections::BTreeMap, io::Cursor};

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::{
    errors::{Error, Result},
    types::{
        NotificationAddresses, ParamValue, PaymentParams, SearchFilters, TransactionQuery,
        render_bool, render_naive_datetime,
    },
    xml::grouper::group_addresses,
};

/// Version attribute of `transaction_request` documents.
pub const TRANSACTION_REQUEST_VERSION: &str = "2";

/// Children of `multipay` written by [`encode_payment`] itself.
pub const PAYMENT_FIELDS: &[&str] = &[
    "project_id",
    "amount",
    "currency_code",
    "success_url",
    "abort_url",
    "interface_version",
    "language_code",
    "timeout",
    "email_customer",
    "phone_customer",
    "timeout_url",
    "success_link_redirect",
    "reasons",
    "user_variables",
    "notification_urls",
    "notification_emails",
    "su",
];

/// Children of `transaction_request` written by [`encode_transaction_request`] itself.
pub const SEARCH_FIELDS: &[&str] = &["transaction", "from_time", "to_time", "number"];

struct Document {
    writer: Writer<Cursor<Vec<u8>>>,
}

fn encode_error(err: impl std::fmt::Display) -> Error {
    Error::Encode(err.to_string())
}

impl Document {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(encode_error)?;
        Ok(Document { writer })
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(encode_error)
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn start_with(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for attribute in attributes {
            start.push_attribute(*attribute);
        }
        self.write(Event::Start(start))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str) -> Result<()> {
        self.write(Event::Empty(BytesStart::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    /// `<name>text</name>`
    fn element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name)?;
        self.text(text)?;
        self.end(name)
    }

    fn optional(&mut self, name: &str, text: Option<&str>) -> Result<()> {
        match text {
            Some(text) => self.element(name, text),
            None => Ok(()),
        }
    }

    /// Writes a field value; lists become one element per item.
    fn value(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        match value {
            ParamValue::List(items) => items.iter().try_for_each(|item| self.element(name, item)),
            scalar => self.element(name, &scalar.render()),
        }
    }

    /// `<container><item>…</item>…</container>`
    fn list(&mut self, container: &str, item: &str, values: &[String]) -> Result<()> {
        self.start(container)?;
        for value in values {
            self.element(item, value)?;
        }
        self.end(container)
    }

    fn addresses(
        &mut self,
        container: &str,
        item: &str,
        addresses: &NotificationAddresses,
    ) -> Result<()> {
        self.start(container)?;
        for group in group_addresses(addresses) {
            match group.notify_on() {
                Some(events) => self.start_with(item, &[("notify_on", events.as_str())])?,
                None => self.start(item)?,
            }
            self.text(&group.address)?;
            self.end(item)?;
        }
        self.end(container)
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner().into_inner()).map_err(encode_error)
    }
}

/// `[A-Za-z_][A-Za-z0-9_.-]*`, plus non-ASCII letters and digits. Colons are
/// excluded so an extra field never lands in a namespace.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        _ => false,
    }
}

fn check_extra_fields(extra: &BTreeMap<String, ParamValue>, known: &[&str]) -> Result<()> {
    for name in extra.keys() {
        let reason = if !is_element_name(name) {
            "is not a valid XML element name"
        } else if known.contains(&name.as_str()) {
            "collides with a known field"
        } else {
            continue;
        };
        return Err(Error::InvalidExtraField {
            name: name.clone(),
            reason,
        });
    }
    Ok(())
}

fn mandatory<'a>(name: &'static str, value: Option<&'a str>) -> Result<&'a str> {
    value.ok_or(Error::MissingField(name))
}

/// Encodes a `multipay` (payment) document.
///
/// Fields are written in this order: the mandatory scalars, the optional
/// scalars that are set, the extra fields in key order, `reasons`,
/// `user_variables`, `notification_urls`, `notification_emails`, and finally
/// the empty `<su/>` marker.
///
/// Fails with [`Error::MissingField`] when `project_id`, `amount`,
/// `currency_code`, `success_url` or `abort_url` is not set, and with
/// [`Error::InvalidExtraField`] when an extra field is not a valid element
/// name or is one of [`PAYMENT_FIELDS`].
pub fn encode_payment(params: &PaymentParams) -> Result<String> {
    let project_id = mandatory("project_id", params.project_id.as_deref())?;
    let amount = params
        .amount
        .ok_or(Error::MissingField("amount"))?
        .to_string();
    let currency_code = mandatory("currency_code", params.currency_code.as_deref())?;
    let success_url = mandatory("success_url", params.success_url.as_deref())?;
    let abort_url = mandatory("abort_url", params.abort_url.as_deref())?;
    check_extra_fields(&params.extra, PAYMENT_FIELDS)?;

    let mut doc = Document::new()?;
    doc.start("multipay")?;

    doc.element("project_id", project_id)?;
    doc.element("amount", &amount)?;
    doc.element("currency_code", currency_code)?;
    doc.element("success_url", success_url)?;
    doc.element("abort_url", abort_url)?;

    doc.optional("interface_version", params.interface_version.as_deref())?;
    doc.optional("language_code", params.language_code.as_deref())?;
    doc.optional(
        "timeout",
        params.timeout.map(|t| t.to_string()).as_deref(),
    )?;
    doc.optional("email_customer", params.email_customer.as_deref())?;
    doc.optional("phone_customer", params.phone_customer.as_deref())?;
    doc.optional("timeout_url", params.timeout_url.as_deref())?;
    doc.optional(
        "success_link_redirect",
        params.success_link_redirect.map(render_bool),
    )?;

    for (name, value) in &params.extra {
        doc.value(name, value)?;
    }

    if let Some(reasons) = &params.reasons {
        doc.list("reasons", "reason", reasons)?;
    }
    if let Some(user_variables) = &params.user_variables {
        doc.list("user_variables", "user_variable", user_variables)?;
    }

    if let Some(urls) = &params.notification_urls {
        doc.addresses("notification_urls", "notification_url", urls)?;
    }
    if let Some(emails) = &params.notification_emails {
        doc.addresses("notification_emails", "notification_email", emails)?;
    }

    doc.empty("su")?;
    doc.end("multipay")?;
    doc.finish()
}

fn write_filters(doc: &mut Document, filters: &SearchFilters) -> Result<()> {
    doc.optional(
        "from_time",
        filters.from_time.as_ref().map(render_naive_datetime).as_deref(),
    )?;
    doc.optional(
        "to_time",
        filters.to_time.as_ref().map(render_naive_datetime).as_deref(),
    )?;
    doc.element("number", &filters.number.to_string())?;
    for (name, value) in &filters.extra {
        doc.value(name, value)?;
    }
    Ok(())
}

/// Encodes a `transaction_request` (lookup) document.
///
/// Search filters are written as given; resolve missing dates with
/// [`SearchFilters::resolve`] first. Extra filters are checked like the extra
/// fields of [`encode_payment`], against [`SEARCH_FIELDS`].
pub fn encode_transaction_request(query: &TransactionQuery) -> Result<String> {
    if let TransactionQuery::Search(filters) = query {
        check_extra_fields(&filters.extra, SEARCH_FIELDS)?;
    }

    let mut doc = Document::new()?;
    doc.start_with(
        "transaction_request",
        &[("version", TRANSACTION_REQUEST_VERSION)],
    )?;

    match query {
        TransactionQuery::ByIds(ids) => {
            for id in ids {
                doc.element("transaction", id)?;
            }
        }
        TransactionQuery::Search(filters) => write_filters(&mut doc, filters)?,
    }

    doc.end("transaction_request")?;
    doc.finish()
}
