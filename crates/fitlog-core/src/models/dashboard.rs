// ABOUTME: Dashboard presentation types handed to the chart and summary widgets
// ABOUTME: WeightSample series, same-day NutritionTotals, and the load status enum
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One point of the weight trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSample {
    /// When the weight was tracked
    pub date: DateTime<Utc>,
    /// Weight in lbs
    pub weight: f64,
}

impl WeightSample {
    /// Chart point labelled the way the weight chart axis shows dates ("Mar 4")
    #[must_use]
    pub fn to_chart_point(&self) -> ChartPoint {
        ChartPoint {
            label: self.date.format("%b %-d").to_string(),
            weight: self.weight,
        }
    }
}

/// Bar chart input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Axis label
    pub label: String,
    /// Bar height in lbs
    pub weight: f64,
}

/// Calories and protein summed over one day's nutrition logs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    /// Total calories
    pub total_calories: i64,
    /// Total protein grams
    pub total_protein: f64,
}

/// Everything the dashboard renders
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Weight samples, ascending by date
    pub weight_series: Vec<WeightSample>,
    /// Today's nutrition totals
    pub nutrition_totals: NutritionTotals,
}

/// Dashboard load state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardStatus {
    /// A load is in flight
    #[default]
    Loading,
    /// Both halves loaded
    Ready,
    /// At least one half failed
    Failed,
}
