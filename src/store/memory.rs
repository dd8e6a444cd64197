// ABOUTME: In-memory record store with NOT NULL schema checks and failure injection
// ABOUTME: Shared Arc<RwLock> state so cloned handles observe the same tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fitlog_core::constants::{columns, tables};
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{compare_values, Query, RecordStore, Row, SortDirection};
use crate::errors::StoreError;

/// Required (NOT NULL) columns per table, mirroring the hosted schema
fn fitness_schema() -> HashMap<String, Vec<String>> {
    let required = |cols: &[&str]| cols.iter().map(|c| (*c).to_owned()).collect::<Vec<_>>();
    HashMap::from([
        (
            tables::WORKOUTS.to_owned(),
            required(&[columns::USER_ID, columns::EXERCISES, columns::CREATED_AT]),
        ),
        (
            tables::NUTRITION_LOGS.to_owned(),
            required(&[
                columns::USER_ID,
                columns::MEAL_TYPE,
                columns::FOOD_NAME,
                columns::CALORIES,
                columns::PROTEIN_GRAMS,
                columns::CARBS_GRAMS,
                columns::FATS_GRAMS,
                columns::LOG_DATE,
            ]),
        ),
        (
            tables::PROGRESS_TRACKING.to_owned(),
            required(&[columns::USER_ID, columns::WEIGHT, columns::TRACK_DATE]),
        ),
    ])
}

/// Injected failures, for exercising error paths
#[derive(Debug, Clone, Default)]
struct Faults {
    unavailable: bool,
    rejected_tables: HashMap<String, Option<String>>,
    rejected_queries: HashMap<String, Option<String>>,
}

#[derive(Debug, Default)]
struct StoreState {
    tables: HashMap<String, Vec<Row>>,
    schema: HashMap<String, Vec<String>>,
    faults: Faults,
    insert_attempts: usize,
    queries: usize,
}

impl StoreState {
    fn check_available(&self) -> Result<(), StoreError> {
        if self.faults.unavailable {
            return Err(StoreError::Unavailable {
                reason: "Failed to fetch".to_owned(),
            });
        }
        Ok(())
    }

    fn check_insert(&self, table: &str, row: &Row) -> Result<(), StoreError> {
        self.check_available()?;
        if let Some(message) = self.faults.rejected_tables.get(table) {
            return Err(StoreError::Rejected {
                table: table.to_owned(),
                message: message.clone(),
            });
        }
        let Some(required) = self.schema.get(table) else {
            return Err(StoreError::rejected(
                table,
                format!("relation \"{table}\" does not exist"),
            ));
        };
        if let Some(column) = required
            .iter()
            .find(|c| row.get(c.as_str()).is_none_or(Value::is_null))
        {
            return Err(StoreError::rejected(
                table,
                format!(
                    "null value in column \"{column}\" of relation \"{table}\" violates not-null constraint"
                ),
            ));
        }
        Ok(())
    }

    fn stored(mut row: Row) -> Row {
        row.entry("id")
            .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
        row
    }
}

/// In-memory record store
///
/// Uses `Arc<RwLock<..>>` so clones share one set of tables: a test keeps a
/// handle to inspect what the pipeline wrote.
#[derive(Clone)]
pub struct InMemoryRecordStore {
    state: Arc<RwLock<StoreState>>,
    latency: Option<Duration>,
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRecordStore {
    /// Store with the workouts, nutrition and progress tables
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState {
                schema: fitness_schema(),
                ..StoreState::default()
            })),
            latency: None,
        }
    }

    /// Delay every operation, to hold requests in flight
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Simulate a network outage for every operation
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.write().await.faults.unavailable = unavailable;
    }

    /// Reject every insert into `table`, optionally with a reason
    pub async fn reject_inserts(&self, table: &str, message: Option<&str>) {
        self.state
            .write()
            .await
            .faults
            .rejected_tables
            .insert(table.to_owned(), message.map(str::to_owned));
    }

    /// Fail every query against `table`, optionally with a reason
    pub async fn reject_queries(&self, table: &str, message: Option<&str>) {
        self.state
            .write()
            .await
            .faults
            .rejected_queries
            .insert(table.to_owned(), message.map(str::to_owned));
    }

    /// Remove every injected failure
    pub async fn clear_faults(&self) {
        self.state.write().await.faults = Faults::default();
    }

    /// Insert rows directly, bypassing schema checks and faults
    pub async fn seed(&self, table: &str, rows: impl IntoIterator<Item = Row> + Send) {
        let mut state = self.state.write().await;
        let stored = rows.into_iter().map(StoreState::stored);
        state
            .tables
            .entry(table.to_owned())
            .or_default()
            .extend(stored);
    }

    /// Snapshot of a table in insertion order
    pub async fn rows(&self, table: &str) -> Vec<Row> {
        self.state
            .read()
            .await
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of insert calls, successful or not (a batch counts once)
    pub async fn insert_attempts(&self) -> usize {
        self.state.read().await.insert_attempts
    }

    /// Number of queries served
    pub async fn query_count(&self) -> usize {
        self.state.read().await.queries
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert(&self, table: &str, record: Row) -> Result<Row, StoreError> {
        self.simulate_latency().await;
        let mut state = self.state.write().await;
        state.insert_attempts += 1;
        state.check_insert(table, &record)?;

        let stored = StoreState::stored(record);
        state
            .tables
            .entry(table.to_owned())
            .or_default()
            .push(stored.clone());
        drop(state);

        tracing::trace!(store.table = table, "Row inserted");
        Ok(stored)
    }

    async fn insert_batch(&self, table: &str, records: Vec<Row>) -> Result<Vec<Row>, StoreError> {
        self.simulate_latency().await;
        let mut state = self.state.write().await;
        state.insert_attempts += 1;
        for record in &records {
            state.check_insert(table, record)?;
        }

        let stored: Vec<Row> = records.into_iter().map(StoreState::stored).collect();
        state
            .tables
            .entry(table.to_owned())
            .or_default()
            .extend(stored.iter().cloned());
        drop(state);

        tracing::trace!(store.table = table, batch.size = stored.len(), "Batch inserted");
        Ok(stored)
    }

    async fn query(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        self.simulate_latency().await;
        let mut state = self.state.write().await;
        state.queries += 1;
        state.check_available()?;
        if let Some(message) = state.faults.rejected_queries.get(&query.table) {
            return Err(StoreError::Rejected {
                table: query.table.clone(),
                message: message.clone(),
            });
        }
        if !state.schema.contains_key(&query.table) {
            return Err(StoreError::rejected(
                &query.table,
                format!("relation \"{}\" does not exist", query.table),
            ));
        }

        let mut rows: Vec<Row> = state
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| query.filters.iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(state);

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ordering = match (a.get(&order.column), b.get(&order.column)) {
                    (Some(x), Some(y)) => compare_values(x, y).unwrap_or(std::cmp::Ordering::Equal),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                };
                match order.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        if !query.columns.is_empty() {
            for row in &mut rows {
                row.retain(|column, _| query.columns.iter().any(|c| c == column));
            }
        }

        Ok(rows)
    }
}
