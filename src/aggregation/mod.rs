// ABOUTME: Aggregation engine module computing dashboard summaries from the record store
// ABOUTME: Weight series and daily nutrition totals, plus the dashboard view state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Concurrent dashboard load and view state
pub mod dashboard;
/// Queries and reductions
pub mod engine;

pub use dashboard::{DashboardLoad, DashboardView, LoadTicket};
pub use engine::{start_of_day, sum_nutrition, weight_samples, AggregationEngine};
