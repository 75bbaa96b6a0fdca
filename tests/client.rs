use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sofort::{
    Client, ClientConfig, TRANSACTION_ID_PLACEHOLDER,
    errors::{DecodeError, Error},
    transport::{Credentials, Transport, TransportError},
    types::{NotificationAddresses, PaymentParams, SearchFilters, WarningItem},
    warnings::CollectWarnings,
};
use url::Url;
use url_macro::url;

const NEW_TRANSACTION: &str = include_str!("../sofort-core/tests/fixtures/new_transaction.xml");
const TRANSACTION_BY_ID: &str = include_str!("../sofort-core/tests/fixtures/transaction_by_id.xml");
const TRANSACTIONS_BY_IDS: &str =
    include_str!("../sofort-core/tests/fixtures/transactions_by_ids.xml");
const TRANSACTIONS_SEARCH: &str =
    include_str!("../sofort-core/tests/fixtures/transactions_search.xml");
const ROOT_ERROR: &str = include_str!("../sofort-core/tests/fixtures/root_error.xml");
const ROOT_ERRORS: &str = include_str!("../sofort-core/tests/fixtures/root_errors.xml");
const NESTED_ERRORS: &str = include_str!("../sofort-core/tests/fixtures/nested_errors.xml");
const WARNING: &str = include_str!("../sofort-core/tests/fixtures/warning.xml");

/// Answers every request with a canned document and records what was sent.
struct MockTransport {
    response: Result<String, TransportError>,
    requests: Mutex<Vec<(Url, Credentials, String)>>,
}

impl MockTransport {
    fn replying(body: &str) -> Self {
        MockTransport {
            response: Ok(body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn failing(err: TransportError) -> Self {
        MockTransport {
            response: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn bodies(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, body)| body.clone())
            .collect()
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        url: &Url,
        credentials: &Credentials,
        body: String,
    ) -> Result<String, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.clone(), credentials.clone(), body));
        self.response.clone()
    }
}

fn notify_url() -> String {
    format!("http://shop.example/notify?trn={TRANSACTION_ID_PLACEHOLDER}")
}

fn config() -> ClientConfig {
    ClientConfig::builder()
        .credentials(Credentials::new("123456", "secret"))
        .project_id("654321")
        .interface_version("sofort-rs_v.test")
        .defaults(
            PaymentParams::builder()
                .success_url(format!("http://shop.example/success?trn={TRANSACTION_ID_PLACEHOLDER}"))
                .abort_url(format!("http://shop.example/abort?trn={TRANSACTION_ID_PLACEHOLDER}"))
                .notification_urls(
                    NotificationAddresses::new()
                        .default_address(notify_url())
                        .on("loss", notify_url())
                        .on("refund", notify_url()),
                )
                .reasons(vec![TRANSACTION_ID_PLACEHOLDER.to_string()])
                .build(),
        )
        .build()
}

fn mock_client(transport: MockTransport) -> Client<Arc<MockTransport>> {
    Client::new(Arc::new(transport), config())
}

fn shared(body: &str) -> (Arc<MockTransport>, Client<Arc<MockTransport>>) {
    let transport = Arc::new(MockTransport::replying(body));
    (transport.clone(), Client::new(transport, config()))
}

fn at(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2016, 2, day)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap()
}

#[test]
fn test_payment() {
    let (transport, client) = shared(NEW_TRANSACTION);

    let payment = client
        .payment(
            Decimal::new(122, 1),
            PaymentParams::builder()
                .reasons(vec![
                    "Invoice 0001 payment".to_string(),
                    TRANSACTION_ID_PLACEHOLDER.to_string(),
                ])
                .build(),
        )
        .unwrap()
        .unwrap();

    assert_eq!(payment.transaction, "123456-123456-56A3BE0E-ACAB");
    assert_eq!(
        payment.payment_url,
        url!("https://www.sofort.com/payment/go/136b2012718da0160fac20c2ec2f51100c90406e")
    );

    let expected = [
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        "<multipay>",
        "<project_id>654321</project_id>",
        "<amount>12.2</amount>",
        "<currency_code>EUR</currency_code>",
        "<success_url>http://shop.example/success?trn=-TRANSACTION-</success_url>",
        "<abort_url>http://shop.example/abort?trn=-TRANSACTION-</abort_url>",
        "<interface_version>sofort-rs_v.test</interface_version>",
        "<success_link_redirect>1</success_link_redirect>",
        "<reasons>",
        "<reason>Invoice 0001 payment</reason>",
        "<reason>-TRANSACTION-</reason>",
        "</reasons>",
        "<notification_urls>",
        r#"<notification_url notify_on="loss,refund">http://shop.example/notify?trn=-TRANSACTION-</notification_url>"#,
        "<notification_url>http://shop.example/notify?trn=-TRANSACTION-</notification_url>",
        "</notification_urls>",
        "<su/>",
        "</multipay>",
    ]
    .concat();
    assert_eq!(transport.bodies(), vec![expected]);

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests[0].0.as_str(), "https://api.sofort.com/api/xml");
    assert_eq!(requests[0].1, Credentials::new("123456", "secret"));
}

#[test]
fn test_payment_strips_reasons() {
    let (transport, client) = shared(NEW_TRANSACTION);
    client
        .payment(
            1,
            PaymentParams::builder()
                .reasons(vec!["Bestellung Müller (#42)".to_string()])
                .build(),
        )
        .unwrap();
    assert!(
        transport.bodies()[0].contains("<reason>Bestellung Mller 42</reason>"),
        "{}",
        transport.bodies()[0]
    );
}

#[test]
fn test_payment_does_not_touch_client_defaults() {
    let (_, client) = shared(NEW_TRANSACTION);
    let before = client.config().clone();
    client
        .payment(
            5,
            PaymentParams::builder()
                .currency_code("USD")
                .reasons(vec!["Größe".to_string()])
                .notification_urls(NotificationAddresses::new().on("loss", "http://other.example"))
                .build(),
        )
        .unwrap();
    assert_eq!(client.config(), &before);
}

#[test]
fn test_payment_missing_field_fails_before_sending() {
    let transport = Arc::new(MockTransport::replying(NEW_TRANSACTION));
    let config = ClientConfig::builder()
        .credentials(Credentials::new("user", "password"))
        .project_id("123")
        .build();
    let client = Client::new(transport.clone(), config);

    let err = client
        .payment(
            12,
            PaymentParams::builder()
                .success_url("http://shop.example/success")
                .reasons(vec!["Invoice".to_string()])
                .build(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::MissingField("abort_url")));
    assert_eq!(err.to_string(), "Mandatory field \"abort_url\" is not specified");
    assert!(transport.bodies().is_empty());
}

#[test]
fn test_payment_rejects_bad_extra_fields_before_sending() {
    let (transport, client) = shared(NEW_TRANSACTION);

    for name in ["amount", "bad name<x"] {
        let err = client
            .payment(1, PaymentParams::default().with_extra(name, "999"))
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidExtraField { name: ref found, .. } if found == name),
            "{err}"
        );
    }
    assert!(transport.bodies().is_empty());
}

#[test]
fn test_payment_warning_does_not_fail() {
    let collector = Arc::new(CollectWarnings::default());
    let client = Client::builder()
        .transport(MockTransport::replying(WARNING))
        .config(config())
        .warnings(collector.clone())
        .build();

    let payment = client.payment(12, PaymentParams::default()).unwrap();
    assert!(payment.is_some());
    assert_eq!(
        collector.take(),
        vec![WarningItem::new(
            8049,
            "Unsupported language.",
            Some("language_code".to_string())
        )]
    );
}

#[test]
fn test_payment_empty_response() {
    let client = mock_client(MockTransport::replying("<transaction />"));
    assert_eq!(client.payment(12, PaymentParams::default()).unwrap(), None);
}

#[test]
fn test_payment_with_unexpected_payload() {
    let client = mock_client(MockTransport::replying(TRANSACTION_BY_ID));
    let err = client.payment(12, PaymentParams::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::UnexpectedPayload {
            expected: "new_transaction",
            found: "transactions",
        })
    ));
}

#[test]
fn test_details_multiple_transaction_ids() {
    let (transport, client) = shared(TRANSACTIONS_BY_IDS);
    let ids = ["123456-123456-56A29EC6-066A", "123456-123456-56A2A0C3-CA99"];

    let transactions = client.details(ids).unwrap().unwrap();
    assert_eq!(transactions.len(), 2);
    for transaction in &transactions {
        assert!(ids.contains(&transaction.transaction.as_str()));
    }

    let expected = [
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<transaction_request version="2">"#,
        "<transaction>123456-123456-56A29EC6-066A</transaction>",
        "<transaction>123456-123456-56A2A0C3-CA99</transaction>",
        "</transaction_request>",
    ]
    .concat();
    assert_eq!(transport.bodies(), vec![expected]);
}

#[test]
fn test_details_single_transaction_id() {
    let client = mock_client(MockTransport::replying(TRANSACTION_BY_ID));
    let info = client
        .details(["123456-123456-56A29EC6-066A"])
        .unwrap()
        .unwrap();

    assert_eq!(info.len(), 1);
    assert_eq!(info[0].transaction, "123456-123456-56A29EC6-066A");
    assert_eq!(info[0].reasons.len(), 2);
    assert!(info[0].reasons.iter().any(|r| r == "Testueberweisung"));
    assert_eq!(info[0].user_variables[0], "test");
    assert_eq!(
        info[0].sender.as_ref().and_then(|s| s.bank_code.as_deref()),
        Some("88888888")
    );
    assert_eq!(
        info[0].su.as_ref().and_then(|su| su.consumer_protection),
        Some(false)
    );
}

#[test]
fn test_details_serialize_to_json() {
    let client = mock_client(MockTransport::replying(TRANSACTION_BY_ID));
    let info = client
        .details(["123456-123456-56A29EC6-066A"])
        .unwrap()
        .unwrap();

    let json = serde_json::to_value(&info[0]).unwrap();
    assert_eq!(json["transaction"], "123456-123456-56A29EC6-066A");
    assert_eq!(json["amount"], "2.20");
    assert_eq!(json["sender"]["holder"], "李四");
    assert_eq!(json["status_history_items"][0]["status"], "untraceable");
}

#[test]
fn test_find_transactions_defaults() {
    let transport = Arc::new(MockTransport::replying(TRANSACTIONS_SEARCH));
    let client = Client::builder()
        .transport(transport.clone())
        .config(config())
        .clock(Arc::new(|| at(27)))
        .build();

    let found = client
        .find_transactions(SearchFilters::default())
        .unwrap()
        .unwrap();
    assert_eq!(found.len(), 3);

    let expected = [
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<transaction_request version="2">"#,
        "<from_time>2016-01-29T10:00:00</from_time>",
        "<to_time>2016-02-27T10:00:00</to_time>",
        "<number>10</number>",
        "</transaction_request>",
    ]
    .concat();
    assert_eq!(transport.bodies(), vec![expected]);
}

#[test]
fn test_find_transactions_with_filters() {
    let transport = Arc::new(MockTransport::replying("<transactions/>"));
    let client = Client::builder()
        .transport(transport.clone())
        .config(config())
        .clock(Arc::new(|| at(27)))
        .build();

    let found = client
        .find_transactions(
            SearchFilters::builder()
                .from_time(at(1))
                .number(50)
                .build()
                .with_extra("status", "pending"),
        )
        .unwrap();
    assert_eq!(found, None);
    assert!(transport.bodies()[0].contains(
        "<from_time>2016-02-01T10:00:00</from_time><to_time>2016-02-27T10:00:00</to_time><number>50</number><status>pending</status>"
    ));
}

#[test]
fn test_root_error() {
    let client = mock_client(MockTransport::replying(ROOT_ERROR));
    let err = client.details(["123456-123456-56A29EC6-066A"]).unwrap_err();
    let Error::Gateway(errors) = err else {
        panic!("expected gateway errors, got {err:?}");
    };
    assert_eq!(errors.codes(), vec![7000]);
    assert_eq!(errors.errors[0].field, None);
}

#[test]
fn test_root_many_errors() {
    let client = mock_client(MockTransport::replying(ROOT_ERRORS));
    let err = client.details(["123456-123456-56A29EC6-066A"]).unwrap_err();
    assert!(matches!(err, Error::Gateway(ref errors) if errors.codes() == vec![7000, 9999]));
}

#[test]
fn test_extended_errors() {
    let client = mock_client(MockTransport::replying(NESTED_ERRORS));
    let err = client.payment(12, PaymentParams::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Gateway rejected the request: All products deactivated due to errors, initiation aborted.; amount: Invalid amount."
    );
}

#[test]
fn test_transport_errors_surface_unchanged() {
    let client = mock_client(MockTransport::failing(TransportError::Unauthorized));
    assert!(matches!(
        client.details(["x"]),
        Err(Error::Transport(TransportError::Unauthorized))
    ));

    let client = mock_client(MockTransport::failing(TransportError::NotFound(
        "https://api.sofort.com/api/xml".to_string(),
    )));
    let err = client.find_transactions(SearchFilters::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "SOFORT resource not found: https://api.sofort.com/api/xml"
    );
}

#[test]
fn test_concurrent_payments_share_one_client() {
    let (transport, client) = shared(NEW_TRANSACTION);

    std::thread::scope(|scope| {
        for i in 0..8 {
            let client = &client;
            scope.spawn(move || {
                client
                    .payment(
                        i + 1,
                        PaymentParams::builder()
                            .reasons(vec![format!("Order {i}")])
                            .build(),
                    )
                    .unwrap()
            });
        }
    });

    let bodies = transport.bodies();
    assert_eq!(bodies.len(), 8);
    for i in 0..8 {
        let amount = format!("<amount>{}</amount>", i + 1);
        let reason = format!("<reason>Order {i}</reason>");
        assert!(
            bodies.iter().any(|b| b.contains(&amount) && b.contains(&reason)),
            "no request carried both {amount} and {reason}"
        );
    }
    assert_eq!(
        client.config().defaults.reasons,
        Some(vec![TRANSACTION_ID_PLACEHOLDER.to_string()])
    );
}
