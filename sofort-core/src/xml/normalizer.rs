//! Canonicalization of the gateway's container/item list convention.
//!
//! The gateway wraps every list in a container element named after the plural,
//! whose children repeat the singular tag: `<reasons><reason>…</reason></reasons>`.
//! After generic parsing the container may hold a sequence, a lone scalar or map
//! (one item), nothing at all, or may already have been collapsed to its item.
//! [`normalize`] always returns the items as a sequence.

use crate::xml::node::{XmlMap, XmlValue};

/// The list containers the gateway uses, each with a fixed item tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListContainer {
    Errors,
    Reasons,
    StatusHistoryItems,
    Transactions,
    UserVariables,
    Warnings,
}

impl ListContainer {
    pub const ALL: [ListContainer; 6] = [
        ListContainer::Errors,
        ListContainer::Reasons,
        ListContainer::StatusHistoryItems,
        ListContainer::Transactions,
        ListContainer::UserVariables,
        ListContainer::Warnings,
    ];

    /// Tag of the container element.
    pub fn tag(self) -> &'static str {
        match self {
            ListContainer::Errors => "errors",
            ListContainer::Reasons => "reasons",
            ListContainer::StatusHistoryItems => "status_history_items",
            ListContainer::Transactions => "transactions",
            ListContainer::UserVariables => "user_variables",
            ListContainer::Warnings => "warnings",
        }
    }

    /// Tag of the items inside the container.
    pub fn item_tag(self) -> &'static str {
        match self {
            ListContainer::Errors => "error",
            ListContainer::Reasons => "reason",
            ListContainer::StatusHistoryItems => "status_history_item",
            ListContainer::Transactions => "transaction_details",
            ListContainer::UserVariables => "user_variable",
            ListContainer::Warnings => "warning",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|container| container.tag() == tag)
    }
}

/// Returns the items of a container value, in document order.
///
/// - `Null` (empty container) yields no items.
/// - A map yields its `item_tag` children; other children are ignored.
/// - A sequence is returned as is.
/// - A bare scalar is a single item.
pub fn normalize<'a>(container: &'a XmlValue, item_tag: &str) -> Vec<&'a XmlValue> {
    match container {
        XmlValue::Null => Vec::new(),
        XmlValue::Map(map) => match map.get(item_tag) {
            Some(XmlValue::List(items)) => items.iter().collect(),
            Some(item) => vec![item],
            None => Vec::new(),
        },
        XmlValue::List(items) => items.iter().collect(),
        XmlValue::Text(_) => vec![container],
    }
}

/// Items of the list field `container` inside `parent`; a missing container yields none.
pub fn list_field(parent: &XmlMap, container: ListContainer) -> Vec<&XmlValue> {
    match parent.get(container.tag()) {
        Some(value) => normalize(value, container.item_tag()),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::node::parse_document;

    fn texts<'a>(items: &[&'a XmlValue]) -> Vec<&'a str> {
        items.iter().filter_map(|v| v.as_text()).collect()
    }

    #[test]
    fn test_bare_scalar_becomes_single_item() {
        let value = XmlValue::Text("Testueberweisung".to_string());
        assert_eq!(texts(&normalize(&value, "reason")), vec!["Testueberweisung"]);
    }

    #[test]
    fn test_repeated_items_keep_document_order() {
        let (_, value) = parse_document(
            "<reasons><reason>Testueberweisung</reason><reason>123456-123456-56A29EC6-066A</reason></reasons>",
        )
        .unwrap();
        assert_eq!(
            texts(&normalize(&value, "reason")),
            vec!["Testueberweisung", "123456-123456-56A29EC6-066A"]
        );
    }

    #[test]
    fn test_single_item_container() {
        let (_, value) =
            parse_document("<user_variables><user_variable>test</user_variable></user_variables>")
                .unwrap();
        assert_eq!(texts(&normalize(&value, "user_variable")), vec!["test"]);
    }

    #[test]
    fn test_empty_container_has_no_items() {
        assert!(normalize(&XmlValue::Null, "user_variable").is_empty());
    }

    #[test]
    fn test_lone_map_item() {
        let (_, value) = parse_document(
            "<warnings><warning><code>8049</code><message>Unsupported language.</message></warning></warnings>",
        )
        .unwrap();
        let items = normalize(&value, "warning");
        assert_eq!(items.len(), 1);
        assert!(items[0].as_map().is_some());
    }

    #[test]
    fn test_foreign_children_are_ignored() {
        let (_, value) = parse_document(
            "<mixeds><mixed>List1</mixed><mixed>List2</mixed><extra>Corrupt</extra></mixeds>",
        )
        .unwrap();
        assert_eq!(texts(&normalize(&value, "mixed")), vec!["List1", "List2"]);
    }

    #[test]
    fn test_already_collapsed_sequence() {
        let value = XmlValue::List(vec![
            XmlValue::Text("I".to_string()),
            XmlValue::Text("II".to_string()),
        ]);
        assert_eq!(texts(&normalize(&value, "volume")), vec!["I", "II"]);
    }

    #[test]
    fn test_list_field_lookup() {
        let (_, value) = parse_document(
            "<transaction_details><reasons><reason>Donation</reason></reasons><user_variables /></transaction_details>",
        )
        .unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(
            texts(&list_field(map, ListContainer::Reasons)),
            vec!["Donation"]
        );
        assert!(list_field(map, ListContainer::UserVariables).is_empty());
        assert!(list_field(map, ListContainer::StatusHistoryItems).is_empty());
    }

    #[test]
    fn test_container_tags() {
        for container in ListContainer::ALL {
            assert_eq!(ListContainer::from_tag(container.tag()), Some(container));
        }
        assert_eq!(ListContainer::Warnings.item_tag(), "warning");
        assert_eq!(
            ListContainer::Transactions.item_tag(),
            "transaction_details"
        );
        assert_eq!(ListContainer::from_tag("volumes"), None);
    }
}
