// ABOUTME: Typed submission records produced from form rows and written to the record store
// ABOUTME: Serialized field names match the store's column layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use super::{MealType, UserIdentity};
use crate::constants::tables;
use crate::errors::{AppError, AppResult};
use crate::parse::Parsed;

/// Canonical timestamp text: RFC 3339, UTC, millisecond precision.
///
/// A fixed width keeps lexicographic order equal to chronological order,
/// which range filters on the store rely on.
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(at))
}

/// One exercise inside a workout record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseEntry {
    /// Exercise name
    pub name: String,
    /// Number of sets
    pub sets: Parsed<i64>,
    /// Reps per set
    pub reps: Parsed<i64>,
    /// Load in lbs
    pub weight: Parsed<f64>,
}

/// A workout session: one store row embedding every exercise
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutRecord {
    /// Owning user
    pub user_id: UserIdentity,
    /// Exercises in form order
    pub exercises: Vec<ExerciseEntry>,
    /// Free-text notes
    pub notes: String,
    /// Submission time
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// One food item logged for a meal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionRecord {
    /// Owning user
    pub user_id: UserIdentity,
    /// Meal the food belongs to
    pub meal_type: MealType,
    /// Food name
    pub food_name: String,
    /// Calories
    pub calories: Parsed<i64>,
    /// Protein grams
    pub protein_grams: Parsed<f64>,
    /// Carbohydrate grams
    pub carbs_grams: Parsed<f64>,
    /// Fat grams
    pub fats_grams: Parsed<f64>,
    /// Submission time
    #[serde(serialize_with = "serialize_timestamp")]
    pub log_date: DateTime<Utc>,
}

/// A body-weight sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressRecord {
    /// Owning user
    pub user_id: UserIdentity,
    /// Weight in lbs
    pub weight: Parsed<f64>,
    /// Free-text notes
    pub notes: String,
    /// Submission time
    #[serde(serialize_with = "serialize_timestamp")]
    pub track_date: DateTime<Utc>,
}

/// Any record the submission pipeline writes
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionRecord {
    /// Workout session
    Workout(WorkoutRecord),
    /// Food item
    Nutrition(NutritionRecord),
    /// Weight sample
    Progress(ProgressRecord),
}

impl SubmissionRecord {
    /// Destination table
    #[must_use]
    pub const fn table(&self) -> &'static str {
        match self {
            Self::Workout(_) => tables::WORKOUTS,
            Self::Nutrition(_) => tables::NUTRITION_LOGS,
            Self::Progress(_) => tables::PROGRESS_TRACKING,
        }
    }

    /// Owning user
    #[must_use]
    pub const fn user_id(&self) -> UserIdentity {
        match self {
            Self::Workout(r) => r.user_id,
            Self::Nutrition(r) => r.user_id,
            Self::Progress(r) => r.user_id,
        }
    }

    /// Column map sent to the store
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not serialize to a JSON object
    pub fn to_row(&self) -> AppResult<Map<String, Value>> {
        let value = match self {
            Self::Workout(r) => serde_json::to_value(r)?,
            Self::Nutrition(r) => serde_json::to_value(r)?,
            Self::Progress(r) => serde_json::to_value(r)?,
        };
        match value {
            Value::Object(map) => Ok(map),
            other => Err(AppError::internal(format!(
                "record serialized to {other} instead of an object"
            ))),
        }
    }
}

impl From<WorkoutRecord> for SubmissionRecord {
    fn from(record: WorkoutRecord) -> Self {
        Self::Workout(record)
    }
}

impl From<NutritionRecord> for SubmissionRecord {
    fn from(record: NutritionRecord) -> Self {
        Self::Nutrition(record)
    }
}

impl From<ProgressRecord> for SubmissionRecord {
    fn from(record: ProgressRecord) -> Self {
        Self::Progress(record)
    }
}
