// ABOUTME: Record store abstraction for workouts, nutrition logs, and progress samples
// ABOUTME: Pluggable backends (in-memory, PostgREST over HTTP) behind one async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Backend selection from configuration
pub mod factory;
/// In-memory store with schema checks and failure injection
pub mod memory;
/// PostgREST-compatible HTTP store
pub mod rest;

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::StoreError;

/// One stored row: column name to JSON value
pub type Row = Map<String, Value>;

/// Row predicate understood by every backend
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `column = value`
    Eq {
        /// Column name
        column: String,
        /// Expected value
        value: Value,
    },
    /// `column >= value`
    Gte {
        /// Column name
        column: String,
        /// Lower bound, inclusive
        value: Value,
    },
}

impl Filter {
    /// Equality filter
    #[must_use]
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Self::Eq {
            column: column.to_owned(),
            value: value.into(),
        }
    }

    /// Inclusive lower-bound filter
    #[must_use]
    pub fn gte(column: &str, value: impl Into<Value>) -> Self {
        Self::Gte {
            column: column.to_owned(),
            value: value.into(),
        }
    }

    /// Column this filter tests
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Eq { column, .. } | Self::Gte { column, .. } => column,
        }
    }

    /// Evaluate against a row; a missing column never matches
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::Eq { column, value } => row.get(column).is_some_and(|v| v == value),
            Self::Gte { column, value } => row
                .get(column)
                .and_then(|v| compare_values(v, value))
                .is_some_and(Ordering::is_ge),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// Ordering clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column to sort by
    pub column: String,
    /// Direction
    pub direction: SortDirection,
}

/// Select query: filters, then ordering, then limit
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Table to read
    pub table: String,
    /// Columns to return; empty means all
    pub columns: Vec<String>,
    /// All filters must match
    pub filters: Vec<Filter>,
    /// Optional ordering
    pub order: Option<OrderBy>,
    /// Optional row bound applied after ordering
    pub limit: Option<usize>,
}

impl Query {
    /// Query over every row of `table`
    #[must_use]
    pub fn table(table: &str) -> Self {
        Self {
            table: table.to_owned(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Restrict returned columns
    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| (*c).to_owned()).collect();
        self
    }

    /// Add a filter
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set the ordering
    #[must_use]
    pub fn order_by(mut self, column: &str, direction: SortDirection) -> Self {
        self.order = Some(OrderBy {
            column: column.to_owned(),
            direction,
        });
        self
    }

    /// Bound the number of rows
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Compare two JSON scalars the way the store's SQL would.
///
/// Numbers compare numerically and strings lexicographically (timestamps
/// are stored in a fixed-width RFC 3339 form, so this is chronological).
/// Mixed or non-scalar pairs are incomparable.
#[must_use]
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Persistence for fitness records
///
/// Every write carries a `user_id` column and every personal read must
/// filter on it; the store itself enforces nothing client-side.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one row, returning the stored row as echoed by the store
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or rejects the row
    async fn insert(&self, table: &str, record: Row) -> Result<Row, StoreError>;

    /// Insert several rows as one all-or-nothing write
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any row is rejected; in that case no row is stored
    async fn insert_batch(&self, table: &str, records: Vec<Row>) -> Result<Vec<Row>, StoreError>;

    /// Run a select query
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store is unreachable or the query is invalid
    async fn query(&self, query: &Query) -> Result<Vec<Row>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn gte_on_timestamps_is_chronological() {
        let filter = Filter::gte("log_date", "2025-03-04T00:00:00.000Z");
        assert!(filter.matches(&row(json!({"log_date": "2025-03-04T07:15:00.000Z"}))));
        assert!(!filter.matches(&row(json!({"log_date": "2025-03-03T23:59:59.999Z"}))));
        assert!(!filter.matches(&row(json!({"other": 1}))));
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(compare_values(&json!(10), &json!(9.5)), Some(Ordering::Greater));
        assert_eq!(compare_values(&json!("a"), &json!(1)), None);
    }
}
