//! Collapsing of notification addresses that share a destination.
//!
//! The gateway takes one `notification_url` (or `notification_email`) element per
//! destination with a `notify_on` attribute listing the events it is used for:
//!
//! ```text
//! default -> http://shop/notify         <notification_url notify_on="loss,refund">http://shop/notify</notification_url>
//! loss    -> http://shop/notify   ==>   <notification_url notify_on="received">http://shop/received</notification_url>
//! refund  -> http://shop/notify         <notification_url>http://shop/notify</notification_url>
//! received -> http://shop/received
//! ```
//!
//! The `default` entry is never merged with named events, even when the
//! addresses are equal.

use crate::types::{DEFAULT_EVENT, NotificationAddresses};

/// One encoded notification entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressGroup {
    /// Events sharing the address, in the order they were set; empty for the default entry.
    pub events: Vec<String>,
    pub address: String,
}

impl AddressGroup {
    pub fn is_default(&self) -> bool {
        self.events.is_empty()
    }

    /// Value of the `notify_on` attribute, `None` for the default entry.
    pub fn notify_on(&self) -> Option<String> {
        (!self.is_default()).then(|| self.events.join(","))
    }
}

/// Groups events by address.
///
/// Groups appear in the order their address was first seen; the default entry,
/// if any, comes last.
pub fn group_addresses(addresses: &NotificationAddresses) -> Vec<AddressGroup> {
    let mut groups: Vec<AddressGroup> = Vec::new();
    let mut default = None;

    for (event, address) in addresses.iter() {
        if event == DEFAULT_EVENT {
            default = Some(address);
            continue;
        }
        match groups.iter_mut().find(|g| g.address == address) {
            Some(group) => group.events.push(event.to_string()),
            None => groups.push(AddressGroup {
                events: vec![event.to_string()],
                address: address.to_string(),
            }),
        }
    }

    if let Some(address) = default {
        groups.push(AddressGroup {
            events: Vec::new(),
            address: address.to_string(),
        });
    }

    groups
}
