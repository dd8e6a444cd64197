// ABOUTME: Configuration module for the fitness client
// ABOUTME: Environment loading plus the validation, batch-write, and weight-series policies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: `ClientConfig` loaded from `FITLOG_*` variables
//! - **Types**: policy enums shared by the pipeline and the aggregation engine

/// Environment-driven client configuration
pub mod environment;
/// Policy enums
pub mod types;

pub use environment::{
    parse_base_url, AggregationConfig, ClientConfig, StoreBackend, SubmissionConfig,
};
pub use types::{BatchWriteMode, ValidationPolicy, WeightSeriesPolicy};
