//! Problems reported by the gateway: fatal errors and non-fatal warnings.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One error reported by the gateway.
///
/// `field` names the request field the error refers to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorItem {
    pub code: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorItem {
    pub fn new(code: u32, message: impl Into<String>, field: Option<String>) -> Self {
        ErrorItem {
            code,
            message: message.into(),
            field,
        }
    }
}

impl Display for ErrorItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(f, self.field.as_deref(), &self.message)
    }
}

/// A non-fatal advisory attached to an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningItem {
    pub code: u32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl WarningItem {
    pub fn new(code: u32, message: impl Into<String>, field: Option<String>) -> Self {
        WarningItem {
            code,
            message: message.into(),
            field,
        }
    }
}

impl Display for WarningItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        render(f, self.field.as_deref(), &self.message)
    }
}

fn render(f: &mut std::fmt::Formatter<'_>, field: Option<&str>, message: &str) -> std::fmt::Result {
    match field {
        Some(field) => write!(f, "{field}: {message}"),
        None => write!(f, "{message}"),
    }
}

/// Every error of an `errors` response, in document order.
///
/// Root-level errors come first, followed by those of nested groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayErrors {
    pub errors: Vec<ErrorItem>,
}

impl GatewayErrors {
    pub fn new(errors: Vec<ErrorItem>) -> Self {
        GatewayErrors { errors }
    }

    pub fn codes(&self) -> Vec<u32> {
        self.errors.iter().map(|e| e.code).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorItem> {
        self.errors.iter()
    }
}

impl Display for GatewayErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for GatewayErrors {}

impl<'a> IntoIterator for &'a GatewayErrors {
    type Item = &'a ErrorItem;
    type IntoIter = std::slice::Iter<'a, ErrorItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
