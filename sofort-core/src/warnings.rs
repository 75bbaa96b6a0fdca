//! Side channel for non-fatal gateway warnings.
//!
//! A warning never fails a call. The decoder hands every decoded warning to a
//! [`WarningHandler`] and still returns the normal payload.

use std::sync::{Mutex, PoisonError};

use crate::types::WarningItem;

/// Receives gateway warnings as they are decoded.
pub trait WarningHandler: Send + Sync {
    fn on_warning(&self, warning: &WarningItem);
}

impl<F> WarningHandler for F
where
    F: Fn(&WarningItem) + Send + Sync,
{
    fn on_warning(&self, warning: &WarningItem) {
        self(warning)
    }
}

/// Emits each warning as a `tracing` event at `WARN` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWarnings;

impl WarningHandler for LogWarnings {
    fn on_warning(&self, warning: &WarningItem) {
        tracing::warn!(
            code = warning.code,
            field = warning.field.as_deref(),
            message = %warning.message,
            "SOFORT warning: {warning}"
        );
    }
}

/// Collects warnings in memory.
///
/// ```
/// use sofort_core::{types::WarningItem, warnings::{CollectWarnings, WarningHandler}};
///
/// let collector = CollectWarnings::default();
/// collector.on_warning(&WarningItem::new(8049, "Unsupported language.", Some("language_code".into())));
/// assert_eq!(collector.take().len(), 1);
/// assert!(collector.take().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct CollectWarnings {
    warnings: Mutex<Vec<WarningItem>>,
}

impl CollectWarnings {
    /// Returns a copy of the warnings received so far.
    pub fn warnings(&self) -> Vec<WarningItem> {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drains the warnings received so far.
    pub fn take(&self) -> Vec<WarningItem> {
        std::mem::take(
            &mut *self
                .warnings
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }
}

impl WarningHandler for CollectWarnings {
    fn on_warning(&self, warning: &WarningItem) {
        self.warnings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(warning.clone());
    }
}
