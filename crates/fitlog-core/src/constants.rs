// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Table and column names, user-facing messages, environment keys, and defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Record store table names
pub mod tables {
    /// Workout sessions with embedded exercise lists
    pub const WORKOUTS: &str = "workouts";
    /// One row per logged food item
    pub const NUTRITION_LOGS: &str = "nutrition_logs";
    /// Body-weight samples
    pub const PROGRESS_TRACKING: &str = "progress_tracking";
}

/// Record store column names
pub mod columns {
    /// Owning user identity, present on every table
    pub const USER_ID: &str = "user_id";
    /// Free-text notes (workouts, progress)
    pub const NOTES: &str = "notes";
    /// Embedded exercise list (workouts)
    pub const EXERCISES: &str = "exercises";
    /// Workout creation timestamp
    pub const CREATED_AT: &str = "created_at";
    /// Meal type (nutrition)
    pub const MEAL_TYPE: &str = "meal_type";
    /// Food name (nutrition)
    pub const FOOD_NAME: &str = "food_name";
    /// Calories (nutrition)
    pub const CALORIES: &str = "calories";
    /// Protein grams (nutrition)
    pub const PROTEIN_GRAMS: &str = "protein_grams";
    /// Carbohydrate grams (nutrition)
    pub const CARBS_GRAMS: &str = "carbs_grams";
    /// Fat grams (nutrition)
    pub const FATS_GRAMS: &str = "fats_grams";
    /// Nutrition log timestamp
    pub const LOG_DATE: &str = "log_date";
    /// Body weight in lbs (progress)
    pub const WEIGHT: &str = "weight";
    /// Progress sample timestamp
    pub const TRACK_DATE: &str = "track_date";
}

/// Messages shown inline after a submission
pub mod messages {
    /// Fallback when a failure carries no reason
    pub const GENERIC_FAILURE: &str = "An error occurred.";
    /// Workout form success
    pub const WORKOUT_LOGGED: &str = "Workout logged successfully!";
    /// Nutrition form success
    pub const NUTRITION_LOGGED: &str = "Nutrition logged successfully!";
    /// Progress form success
    pub const PROGRESS_LOGGED: &str = "Progress logged successfully!";
    /// Dashboard failure
    pub const DASHBOARD_LOAD_FAILED: &str = "Could not load dashboard data.";
}

/// Default values
pub mod defaults {
    /// Number of weight samples shown on the dashboard
    pub const WEIGHT_SERIES_LIMIT: usize = 10;
    /// REST store request timeout
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
    /// REST store connect timeout
    pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Environment variable names read by the client configuration
pub mod env_config {
    /// Store backend selector (`memory` or `rest`)
    pub const STORE: &str = "FITLOG_STORE";
    /// REST store base URL
    pub const STORE_URL: &str = "FITLOG_STORE_URL";
    /// REST store API key
    pub const STORE_API_KEY: &str = "FITLOG_STORE_API_KEY";
    /// Signed-in user's access token for the REST store (optional)
    pub const ACCESS_TOKEN: &str = "FITLOG_ACCESS_TOKEN";
    /// Validation policy
    pub const VALIDATION: &str = "FITLOG_VALIDATION";
    /// Nutrition batch write mode
    pub const BATCH_MODE: &str = "FITLOG_BATCH_MODE";
    /// Weight series policy
    pub const WEIGHT_SERIES: &str = "FITLOG_WEIGHT_SERIES";
    /// Weight series bound
    pub const WEIGHT_SERIES_LIMIT: &str = "FITLOG_WEIGHT_SERIES_LIMIT";
    /// REST request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "FITLOG_HTTP_TIMEOUT_SECS";
}

/// Service identity for structured logs
pub mod service_names {
    /// Client service name
    pub const FITLOG_CLIENT: &str = "fitlog-client";
}
