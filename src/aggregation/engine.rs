// ABOUTME: Dashboard queries and reductions: bounded weight series and same-day nutrition totals
// ABOUTME: Reads are scoped to one user; missing or malformed numbers count as zero when summed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use fitlog_core::constants::{columns, tables};
use fitlog_core::models::{format_timestamp, NutritionTotals, UserIdentity, WeightSample};
use serde_json::Value;
use tracing::debug;

use crate::config::{AggregationConfig, WeightSeriesPolicy};
use crate::errors::AggregationError;
use crate::logging::AppLogger;
use crate::store::{Filter, Query, RecordStore, Row, SortDirection};

/// Reads and reduces dashboard data
pub struct AggregationEngine<S: RecordStore> {
    store: Arc<S>,
    config: AggregationConfig,
}

impl<S: RecordStore> Clone for AggregationEngine<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config,
        }
    }
}

impl<S: RecordStore> AggregationEngine<S> {
    /// Engine reading from `store`
    #[must_use]
    pub const fn new(store: Arc<S>, config: AggregationConfig) -> Self {
        Self { store, config }
    }

    /// Active settings
    #[must_use]
    pub const fn config(&self) -> AggregationConfig {
        self.config
    }

    /// Query selecting the user's weight samples under the configured policy
    #[must_use]
    pub fn weight_series_query(&self, user: UserIdentity) -> Query {
        let direction = match self.config.weight_series {
            WeightSeriesPolicy::MostRecent => SortDirection::Descending,
            WeightSeriesPolicy::OldestFirst => SortDirection::Ascending,
        };
        Query::table(tables::PROGRESS_TRACKING)
            .select(&[columns::TRACK_DATE, columns::WEIGHT])
            .filter(Filter::eq(columns::USER_ID, user.to_string()))
            .order_by(columns::TRACK_DATE, direction)
            .limit(self.config.weight_series_limit)
    }

    /// Query selecting the user's nutrition logs from the start of `day` (UTC)
    ///
    /// Only a lower bound is applied; logs dated after `day` are included.
    #[must_use]
    pub fn nutrition_totals_query(user: UserIdentity, day: NaiveDate) -> Query {
        Query::table(tables::NUTRITION_LOGS)
            .select(&[columns::CALORIES, columns::PROTEIN_GRAMS])
            .filter(Filter::eq(columns::USER_ID, user.to_string()))
            .filter(Filter::gte(columns::LOG_DATE, format_timestamp(&start_of_day(day))))
    }

    /// Weight samples ascending by date, bounded by the configured limit
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::Store` if the query fails
    pub async fn fetch_weight_series(
        &self,
        user: UserIdentity,
    ) -> Result<Vec<WeightSample>, AggregationError> {
        let query = self.weight_series_query(user);
        let rows = self.run(&query).await?;

        let mut series = weight_samples(&rows);
        if self.config.weight_series == WeightSeriesPolicy::MostRecent {
            series.reverse();
        }
        Ok(series)
    }

    /// Calories and protein logged since the start of `day`
    ///
    /// # Errors
    ///
    /// Returns `AggregationError::Store` if the query fails
    pub async fn fetch_nutrition_totals(
        &self,
        user: UserIdentity,
        day: NaiveDate,
    ) -> Result<NutritionTotals, AggregationError> {
        let rows = self.run(&Self::nutrition_totals_query(user, day)).await?;
        Ok(sum_nutrition(&rows))
    }

    async fn run(&self, query: &Query) -> Result<Vec<Row>, AggregationError> {
        let started = Instant::now();
        let result = self.store.query(query).await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_store_operation("query", &query.table, result.is_ok(), duration_ms);
        result.map_err(AggregationError::from)
    }
}

/// Midnight UTC at the start of `day`
#[must_use]
pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Rows to samples in row order; rows without a usable date or weight are skipped
#[must_use]
pub fn weight_samples(rows: &[Row]) -> Vec<WeightSample> {
    rows.iter()
        .filter_map(|row| {
            let raw_date = row.get(columns::TRACK_DATE).and_then(Value::as_str);
            let Some(date) = raw_date.and_then(parse_track_date) else {
                debug!(track_date = ?raw_date, "Skipping progress row without a usable date");
                return None;
            };
            let weight = row.get(columns::WEIGHT).and_then(Value::as_f64);
            let Some(weight) = weight.filter(|w| w.is_finite()) else {
                debug!(%date, "Skipping progress row without a numeric weight");
                return None;
            };
            Some(WeightSample { date, weight })
        })
        .collect()
}

/// Full RFC 3339 timestamp, or a bare `YYYY-MM-DD` date taken as midnight UTC
fn parse_track_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|at| at.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(start_of_day)
        })
}

/// Sum calories and protein; missing, null, non-numeric and negative values add zero
#[must_use]
pub fn sum_nutrition(rows: &[Row]) -> NutritionTotals {
    let (calories, protein) = rows.iter().fold((0.0_f64, 0.0_f64), |(cal, pro), row| {
        (
            cal + amount(row.get(columns::CALORIES)),
            pro + amount(row.get(columns::PROTEIN_GRAMS)),
        )
    });
    NutritionTotals {
        total_calories: calories.round() as i64,
        total_protein: protein,
    }
}

fn amount(value: Option<&Value>) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: &[Value]) -> Vec<Row> {
        values
            .iter()
            .filter_map(|v| v.as_object().cloned())
            .collect()
    }

    #[test]
    fn null_and_missing_fields_add_zero() {
        let totals = sum_nutrition(&rows(&[
            json!({"calories": 500, "protein_grams": 20}),
            json!({"calories": null, "protein_grams": 10}),
        ]));
        assert_eq!(totals.total_calories, 500);
        assert!((totals.total_protein - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn strings_and_negatives_add_zero() {
        let totals = sum_nutrition(&rows(&[
            json!({"calories": "250", "protein_grams": -4}),
            json!({"calories": 99.6}),
            json!({}),
        ]));
        assert_eq!(totals.total_calories, 100);
        assert!(totals.total_protein.abs() < f64::EPSILON);
    }

    #[test]
    fn unusable_weight_rows_are_skipped() {
        let samples = weight_samples(&rows(&[
            json!({"track_date": "2025-03-01T08:00:00.000Z", "weight": 182.5}),
            json!({"track_date": "2025-03-02T08:00:00.000Z", "weight": null}),
            json!({"track_date": "yesterday", "weight": 181}),
        ]));
        assert_eq!(samples.len(), 1);
        assert!((samples[0].weight - 182.5).abs() < f64::EPSILON);
    }

    #[test]
    fn plain_dates_are_read_as_utc_midnight() {
        let samples = weight_samples(&rows(&[
            json!({"track_date": "2025-03-03", "weight": 183}),
            json!({"track_date": "2025-03-04T07:30:00+02:00", "weight": 182}),
        ]));
        let dates: Vec<String> = samples.iter().map(|s| format_timestamp(&s.date)).collect();
        assert_eq!(
            dates,
            vec!["2025-03-03T00:00:00.000Z", "2025-03-04T05:30:00.000Z"]
        );
    }

    #[test]
    fn day_bound_is_utc_midnight() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(format_timestamp(&start_of_day(day)), "2025-03-04T00:00:00.000Z");
    }
}
