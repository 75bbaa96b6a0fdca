//! # SOFORT
//!
//! A client for the SOFORT payment gateway XML API: create payments, look transactions
//! up by id and search them by date.
//!
//! ## Related Crates
//!
//! - **[`sofort-core`](https://docs.rs/sofort-core)**: the data model and the XML
//!   marshalling layer, usable without any HTTP stack.
//!
//! ## Components Overview
//!
//! - **[`Client`]**: the three gateway operations, composed from the pieces below.
//! - **[`config`]**: credentials, endpoint and payment defaults of a client.
//! - **[`types`]**: request parameters and decoded responses.
//! - **[`xml`]**: request encoding and response decoding.
//! - **[`transport`]**: the interface the client sends documents through.
//! - **[`http`]**: a blocking `reqwest` transport (feature `http-client`, on by default).
//! - **[`warnings`]**: where non-fatal gateway warnings go.
//! - **[`errors`]**: every way a call can fail.
//!
//! ## Creating a payment
//!
//! ```no_run
//! use sofort::{
//!     Client, ClientConfig, TRANSACTION_ID_PLACEHOLDER,
//!     transport::Credentials,
//!     types::{NotificationAddresses, PaymentParams},
//! };
//!
//! let config = ClientConfig::builder()
//!     .credentials(Credentials::new("123456", "api-key"))
//!     .project_id("654321")
//!     .defaults(
//!         PaymentParams::builder()
//!             .abort_url("https://shop.example/abort")
//!             .notification_urls(
//!                 NotificationAddresses::new()
//!                     .default_address(format!("https://shop.example/notify?trn={TRANSACTION_ID_PLACEHOLDER}")),
//!             )
//!             .build(),
//!     )
//!     .build();
//!
//! let client = Client::http(config);
//! let payment = client.payment(
//!     12,
//!     PaymentParams::builder()
//!         .success_url(format!("https://shop.example/paid?trn={TRANSACTION_ID_PLACEHOLDER}"))
//!         .reasons(vec!["Invoice 0001".to_string(), TRANSACTION_ID_PLACEHOLDER.to_string()])
//!         .build(),
//! )?;
//!
//! if let Some(payment) = payment {
//!     println!("redirect the customer to {}", payment.payment_url);
//! }
//! # Ok::<(), sofort::errors::Error>(())
//! ```

pub mod types {
    pub use sofort_core::types::*;
}

pub mod transport {
    pub use sofort_core::transport::*;
}

pub mod warnings {
    pub use sofort_core::warnings::*;
}

pub mod xml {
    pub use sofort_core::xml::*;
}

pub mod errors {
    pub use sofort_core::errors::*;
}

pub mod reason {
    pub use sofort_core::reason::*;
}

pub mod client;
pub mod config;

#[cfg(feature = "http-client")]
pub mod http;

pub use client::Client;
pub use config::ClientConfig;
pub use sofort_core::TRANSACTION_ID_PLACEHOLDER;
