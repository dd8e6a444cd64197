// ABOUTME: Submission pipeline: transform form rows, enforce the validation policy, persist
// ABOUTME: Workout and progress are single writes; nutrition follows the configured batch mode
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use fitlog_core::constants::tables;
use fitlog_core::errors::AppResult;
use fitlog_core::models::{ExerciseRow, FoodRow, MealType, SubmissionRecord, UserIdentity};
use futures_util::future::join_all;
use tracing::debug;

use super::transform;
use super::Submitted;
use crate::clock::Clock;
use crate::config::{BatchWriteMode, SubmissionConfig, ValidationPolicy};
use crate::context::require_identity;
use crate::editor::RowCollection;
use crate::errors::{SubmissionError, ValidationIssue};
use crate::logging::AppLogger;
use crate::store::{RecordStore, Row};

/// Counts submissions in flight for as long as it lives
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Validates and persists form submissions
pub struct SubmissionPipeline<S: RecordStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: SubmissionConfig,
    in_flight: Arc<AtomicUsize>,
}

impl<S: RecordStore> Clone for SubmissionPipeline<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            config: self.config,
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<S: RecordStore> SubmissionPipeline<S> {
    /// Pipeline writing to `store`, stamping records with `clock`
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: SubmissionConfig) -> Self {
        Self {
            store,
            clock,
            config,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Active policies
    #[must_use]
    pub const fn config(&self) -> SubmissionConfig {
        self.config
    }

    /// Whether any submission through this pipeline (or a clone) is in flight
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Persist one workout embedding every exercise row
    ///
    /// # Errors
    ///
    /// Returns `IdentityMissing` without an identity, `Validation` when a row
    /// fails local checks under `RejectLocally`, or `Store` when the write fails
    pub async fn submit_workout(
        &self,
        identity: Option<UserIdentity>,
        rows: &RowCollection<ExerciseRow>,
        notes: &str,
    ) -> Result<Submitted, SubmissionError> {
        let user = require_identity(identity)?;
        let started = Instant::now();
        let _in_flight = InFlight::enter(&self.in_flight);

        let result = self.store_workout(user, rows, notes).await;
        log_result("workout", user, rows.len(), started, &result);
        result
    }

    /// Persist one nutrition record per food row
    ///
    /// # Errors
    ///
    /// Returns `IdentityMissing`, `Validation`, `Store` when nothing was
    /// written, or `PartialBatch` when a best-effort batch stored only some rows
    pub async fn submit_nutrition(
        &self,
        identity: Option<UserIdentity>,
        rows: &RowCollection<FoodRow>,
        meal_type: MealType,
    ) -> Result<Submitted, SubmissionError> {
        let user = require_identity(identity)?;
        let started = Instant::now();
        let _in_flight = InFlight::enter(&self.in_flight);

        let result = self.store_nutrition(user, rows, meal_type).await;
        log_result("nutrition", user, rows.len(), started, &result);
        result
    }

    /// Persist one body-weight sample
    ///
    /// # Errors
    ///
    /// Returns `IdentityMissing`, `Validation`, or `Store`
    pub async fn submit_progress(
        &self,
        identity: Option<UserIdentity>,
        weight: &str,
        notes: &str,
    ) -> Result<Submitted, SubmissionError> {
        let user = require_identity(identity)?;
        let started = Instant::now();
        let _in_flight = InFlight::enter(&self.in_flight);

        let result = self.store_progress(user, weight, notes).await;
        log_result("progress", user, 1, started, &result);
        result
    }

    async fn store_workout(
        &self,
        user: UserIdentity,
        rows: &RowCollection<ExerciseRow>,
        notes: &str,
    ) -> Result<Submitted, SubmissionError> {
        let transformed = transform::workout_record(user, rows, notes, self.clock.now());
        self.enforce(transformed.issues)?;
        self.insert_one(transformed.record.into()).await
    }

    async fn store_progress(
        &self,
        user: UserIdentity,
        weight: &str,
        notes: &str,
    ) -> Result<Submitted, SubmissionError> {
        let transformed = transform::progress_record(user, weight, notes, self.clock.now());
        self.enforce(transformed.issues)?;
        self.insert_one(transformed.record.into()).await
    }

    async fn store_nutrition(
        &self,
        user: UserIdentity,
        rows: &RowCollection<FoodRow>,
        meal_type: MealType,
    ) -> Result<Submitted, SubmissionError> {
        let transformed = transform::nutrition_records(user, rows, meal_type, self.clock.now());
        self.enforce(transformed.issues)?;

        let table = tables::NUTRITION_LOGS;
        let encoded = transformed
            .record
            .into_iter()
            .map(|record| SubmissionRecord::from(record).to_row())
            .collect::<AppResult<Vec<Row>>>()?;

        match self.config.batch_mode {
            BatchWriteMode::Transactional => {
                let stored = self.store.insert_batch(table, encoded).await?;
                Ok(Submitted {
                    table,
                    records: stored.len(),
                })
            }
            BatchWriteMode::BestEffort => self.insert_each(table, encoded).await,
        }
    }

    async fn insert_one(&self, record: SubmissionRecord) -> Result<Submitted, SubmissionError> {
        let table = record.table();
        self.store.insert(table, record.to_row()?).await?;
        Ok(Submitted { table, records: 1 })
    }

    /// Concurrent per-row inserts; waits for every write to settle
    async fn insert_each(
        &self,
        table: &'static str,
        rows: Vec<Row>,
    ) -> Result<Submitted, SubmissionError> {
        let total = rows.len();
        let results = join_all(rows.into_iter().map(|row| self.store.insert(table, row))).await;

        let mut failures = results.into_iter().filter_map(Result::err);
        let Some(first_error) = failures.next() else {
            return Ok(Submitted {
                table,
                records: total,
            });
        };
        let failed = 1 + failures.count();
        let succeeded = total - failed;

        if succeeded == 0 {
            return Err(SubmissionError::Store(first_error));
        }
        Err(SubmissionError::PartialBatch {
            succeeded,
            failed,
            first_error,
        })
    }

    fn enforce(&self, issues: Vec<ValidationIssue>) -> Result<(), SubmissionError> {
        if issues.is_empty() {
            return Ok(());
        }
        match self.config.validation {
            ValidationPolicy::RejectLocally => Err(SubmissionError::Validation { issues }),
            ValidationPolicy::PassThrough => {
                debug!(
                    validation.issues = issues.len(),
                    "Forwarding unvalidated fields to the record store"
                );
                Ok(())
            }
        }
    }
}

fn log_result(
    kind: &str,
    user: UserIdentity,
    rows: usize,
    started: Instant,
    result: &Result<Submitted, SubmissionError>,
) {
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    AppLogger::log_submission(&user.to_string(), kind, rows, result.is_ok(), duration_ms);
    if let Err(error) = result {
        debug!(submission.kind = kind, error = %error, "Submission error detail");
    }
}
