//! Notification destinations keyed by gateway event.

use serde::{Deserialize, Serialize};

/// Event key of the destination used for every event without its own entry.
pub const DEFAULT_EVENT: &str = "default";

/// An insertion-ordered mapping from event name (or [`DEFAULT_EVENT`]) to a
/// notification address (URL or e-mail).
///
/// Setting an event twice replaces its address but keeps its original position.
///
/// ```
/// use sofort_core::types::NotificationAddresses;
///
/// let urls = NotificationAddresses::new()
///     .default_address("https://shop.example/notify")
///     .on("loss", "https://shop.example/notify")
///     .on("refund", "https://shop.example/notify");
///
/// assert_eq!(urls.len(), 3);
/// assert_eq!(urls.get("loss"), Some("https://shop.example/notify"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAddresses {
    entries: Vec<(String, String)>,
}

impl NotificationAddresses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the address notified for `event`.
    pub fn on(mut self, event: impl Into<String>, address: impl Into<String>) -> Self {
        self.insert(event, address);
        self
    }

    /// Sets the address notified for events without their own entry.
    pub fn default_address(self, address: impl Into<String>) -> Self {
        self.on(DEFAULT_EVENT, address)
    }

    pub fn insert(&mut self, event: impl Into<String>, address: impl Into<String>) {
        let event = event.into();
        let address = address.into();
        match self.entries.iter_mut().find(|(e, _)| *e == event) {
            Some(entry) => entry.1 = address,
            None => self.entries.push((event, address)),
        }
    }

    pub fn get(&self, event: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(e, _)| e == event)
            .map(|(_, a)| a.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(e, a)| (e.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E, A> FromIterator<(E, A)> for NotificationAddresses
where
    E: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (E, A)>>(iter: I) -> Self {
        let mut addresses = NotificationAddresses::new();
        for (event, address) in iter {
            addresses.insert(event, address);
        }
        addresses
    }
}
