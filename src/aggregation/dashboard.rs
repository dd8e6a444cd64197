// ABOUTME: Dashboard loading: both fetches run concurrently and settle independently
// ABOUTME: View state applies a load only if no newer load or close happened meanwhile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use fitlog_core::constants::messages;
use fitlog_core::models::{
    ChartPoint, DashboardStatus, DashboardSummary, NutritionTotals, UserIdentity, WeightSample,
};
use serde::Serialize;
use tracing::debug;

use super::engine::AggregationEngine;
use crate::errors::AggregationError;
use crate::logging::AppLogger;
use crate::store::RecordStore;

/// Settled results of one dashboard load
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLoad {
    /// Weight series half
    pub weight_series: Result<Vec<WeightSample>, AggregationError>,
    /// Nutrition totals half
    pub nutrition_totals: Result<NutritionTotals, AggregationError>,
}

impl DashboardLoad {
    /// A load that never queried because nobody is signed in
    #[must_use]
    pub const fn identity_missing() -> Self {
        Self {
            weight_series: Err(AggregationError::IdentityMissing),
            nutrition_totals: Err(AggregationError::IdentityMissing),
        }
    }

    /// `Ready` when both halves succeeded, otherwise `Failed`
    #[must_use]
    pub const fn status(&self) -> DashboardStatus {
        if self.weight_series.is_ok() && self.nutrition_totals.is_ok() {
            DashboardStatus::Ready
        } else {
            DashboardStatus::Failed
        }
    }

    /// Full summary when both halves succeeded
    #[must_use]
    pub fn summary(&self) -> Option<DashboardSummary> {
        match (&self.weight_series, &self.nutrition_totals) {
            (Ok(weight_series), Ok(nutrition_totals)) => Some(DashboardSummary {
                weight_series: weight_series.clone(),
                nutrition_totals: *nutrition_totals,
            }),
            _ => None,
        }
    }
}

impl<S: RecordStore> AggregationEngine<S> {
    /// Run both dashboard fetches concurrently and wait for both to settle
    pub async fn load_dashboard(&self, user: UserIdentity, day: NaiveDate) -> DashboardLoad {
        let (weight_series, nutrition_totals) = tokio::join!(
            self.fetch_weight_series(user),
            self.fetch_nutrition_totals(user, day)
        );
        AppLogger::log_dashboard_load(
            &user.to_string(),
            weight_series.is_ok(),
            nutrition_totals.is_ok(),
        );
        DashboardLoad {
            weight_series,
            nutrition_totals,
        }
    }
}

/// Permission to apply one dashboard load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

/// What the dashboard page renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    status: DashboardStatus,
    weight_series: Option<Vec<WeightSample>>,
    nutrition_totals: Option<NutritionTotals>,
    message: Option<String>,
    #[serde(skip)]
    generation: u64,
}

impl DashboardView {
    /// View of a dashboard that has not loaded yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> DashboardStatus {
        self.status
    }

    /// Weight series, if that half loaded
    #[must_use]
    pub fn weight_series(&self) -> Option<&[WeightSample]> {
        self.weight_series.as_deref()
    }

    /// Nutrition totals, if that half loaded
    #[must_use]
    pub const fn nutrition_totals(&self) -> Option<NutritionTotals> {
        self.nutrition_totals
    }

    /// Failure message, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Weight series as bar chart input
    #[must_use]
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.weight_series
            .iter()
            .flatten()
            .map(WeightSample::to_chart_point)
            .collect()
    }

    /// Full summary once both halves loaded
    #[must_use]
    pub fn summary(&self) -> Option<DashboardSummary> {
        match (&self.weight_series, self.nutrition_totals) {
            (Some(weight_series), Some(nutrition_totals)) if self.status == DashboardStatus::Ready => {
                Some(DashboardSummary {
                    weight_series: weight_series.clone(),
                    nutrition_totals,
                })
            }
            _ => None,
        }
    }

    /// Start a load; any earlier outstanding ticket becomes stale
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.status = DashboardStatus::Loading;
        self.message = None;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Apply a settled load. Returns `false` (and changes nothing) when the
    /// ticket was superseded or the view was closed.
    pub fn apply_load(&mut self, ticket: LoadTicket, load: DashboardLoad) -> bool {
        if ticket.generation != self.generation || self.status != DashboardStatus::Loading {
            debug!(
                ticket.generation = ticket.generation,
                view.generation = self.generation,
                "Discarding superseded dashboard load"
            );
            return false;
        }

        self.status = load.status();
        self.message = (self.status == DashboardStatus::Failed)
            .then(|| messages::DASHBOARD_LOAD_FAILED.to_owned());
        self.weight_series = load.weight_series.ok();
        self.nutrition_totals = load.nutrition_totals.ok();
        true
    }

    /// Close the view; outstanding loads are discarded when they settle
    pub fn close(&mut self) {
        self.generation += 1;
    }

    /// Begin, load, and apply in one call
    pub async fn refresh<S: RecordStore>(
        &mut self,
        engine: &AggregationEngine<S>,
        identity: Option<UserIdentity>,
        day: NaiveDate,
    ) -> DashboardStatus {
        let ticket = self.begin_load();
        let load = match identity {
            Some(user) => engine.load_dashboard(user, day).await,
            None => DashboardLoad::identity_missing(),
        };
        self.apply_load(ticket, load);
        self.status
    }
}
