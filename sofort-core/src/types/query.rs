//! Parameters of a transaction lookup request.

use std::collections::BTreeMap;

use bon::Builder;
use chrono::{Duration, NaiveDateTime};

use crate::types::ParamValue;

/// How many days back the gateway keeps transactions searchable by date.
pub const TRANSACTION_HISTORY_DAYS: i64 = 29;

/// Page size used when a search does not set one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filters of a transaction search.
///
/// Unset dates are resolved against the current time with
/// [`SearchFilters::resolve`] before the request is encoded.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub from_time: Option<NaiveDateTime>,
    pub to_time: Option<NaiveDateTime>,
    /// Page size.
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub number: u32,
    /// Further gateway filters, encoded after the date range and page size in key order.
    #[builder(default)]
    pub extra: BTreeMap<String, ParamValue>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        SearchFilters::builder().build()
    }
}

impl SearchFilters {
    /// Fills in missing dates.
    ///
    /// `to_time` defaults to `now`; `from_time` defaults to the later of
    /// `now - 29 days` and `to_time - 29 days`.
    pub fn resolve(mut self, now: NaiveDateTime) -> Self {
        let limit = Duration::days(TRANSACTION_HISTORY_DAYS);
        let to_time = self.to_time.unwrap_or(now);
        let from_time = self
            .from_time
            .unwrap_or_else(|| std::cmp::max(now - limit, to_time - limit));
        self.to_time = Some(to_time);
        self.from_time = Some(from_time);
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// The two shapes of a transaction lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionQuery {
    /// Look transactions up by id.
    ByIds(Vec<String>),
    /// Search transactions by date range and filters.
    Search(SearchFilters),
}

impl TransactionQuery {
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TransactionQuery::ByIds(ids.into_iter().map(Into::into).collect())
    }
}

impl From<SearchFilters> for TransactionQuery {
    fn from(filters: SearchFilters) -> Self {
        TransactionQuery::Search(filters)
    }
}
