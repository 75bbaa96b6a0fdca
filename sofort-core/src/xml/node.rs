//! A generic tree of a parsed response document.
//!
//! Elements map onto [`XmlValue`] the way the gateway's documents are shaped:
//!
//! - an element without children, attributes or text is [`XmlValue::Null`];
//! - a text-only element is [`XmlValue::Text`] (surrounding whitespace trimmed);
//! - anything else is an [`XmlValue::Map`] of child tag to value, with attributes
//!   stored under `@name` and mixed-in text under `#text`;
//! - a child tag repeated inside one parent becomes an [`XmlValue::List`].
//!
//! A lone child therefore stays a scalar or map; [`normalizer`](super::normalizer)
//! restores the sequence where one is expected.

use quick_xml::{Reader, events::Event};

use crate::errors::DecodeError;

const TEXT_KEY: &str = "#text";

/// A parsed element value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlValue {
    Null,
    Text(String),
    Map(XmlMap),
    List(Vec<XmlValue>),
}

impl XmlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, XmlValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            XmlValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&XmlMap> {
        match self {
            XmlValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn shape(&self) -> &'static str {
        match self {
            XmlValue::Null => "empty element",
            XmlValue::Text(_) => "text",
            XmlValue::Map(_) => "element with children",
            XmlValue::List(_) => "repeated element",
        }
    }
}

/// Children of an element in document order, keyed by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlMap {
    entries: Vec<(String, XmlValue)>,
}

impl XmlMap {
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Value of attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.strip_prefix('@') == Some(name))
            .and_then(|(_, v)| v.as_text())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &XmlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a child; a repeated key turns the existing value into a list.
    pub fn insert(&mut self, key: impl Into<String>, value: XmlValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, XmlValue::List(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, XmlValue::Null);
                *existing = XmlValue::List(vec![first, value]);
            }
            None => self.entries.push((key, value)),
        }
    }
}

struct Frame {
    name: String,
    children: XmlMap,
    text: String,
}

impl Frame {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        let mut children = XmlMap::default();
        for (key, value) in attributes {
            children.insert(format!("@{key}"), XmlValue::Text(value));
        }
        Frame {
            name,
            children,
            text: String::new(),
        }
    }

    fn finish(self) -> (String, XmlValue) {
        let text = self.text.trim();
        let value = if self.children.is_empty() {
            if text.is_empty() {
                XmlValue::Null
            } else {
                XmlValue::Text(text.to_string())
            }
        } else {
            let mut children = self.children;
            if !text.is_empty() {
                children.insert(TEXT_KEY, XmlValue::Text(text.to_string()));
            }
            XmlValue::Map(children)
        };
        (self.name, value)
    }
}

fn xml_error(err: impl std::fmt::Display) -> DecodeError {
    DecodeError::Xml(err.to_string())
}

fn start_frame(element: &quick_xml::events::BytesStart<'_>) -> Result<Frame, DecodeError> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(xml_error)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value().map_err(xml_error)?.into_owned();
        attributes.push((key, value));
    }
    Ok(Frame::new(name, attributes))
}

/// Parses a document into its root tag and value.
pub fn parse_document(xml: &str) -> Result<(String, XmlValue), DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, XmlValue)> = None;

    loop {
        let finished = match reader.read_event().map_err(xml_error)? {
            Event::Start(element) => {
                stack.push(start_frame(&element)?);
                None
            }
            Event::Empty(element) => Some(start_frame(&element)?.finish()),
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| DecodeError::Xml("unbalanced closing tag".to_string()))?;
                Some(frame.finish())
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape().map_err(xml_error)?);
                }
                None
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
                None
            }
            Event::Eof => break,
            _ => None,
        };

        if let Some((name, value)) = finished {
            match stack.last_mut() {
                Some(parent) => parent.children.insert(name, value),
                None if root.is_none() => root = Some((name, value)),
                None => return Err(DecodeError::Xml("more than one root element".to_string())),
            }
        }
    }

    if !stack.is_empty() {
        return Err(DecodeError::Xml("unexpected end of document".to_string()));
    }

    root.ok_or(DecodeError::MissingRoot)
}
