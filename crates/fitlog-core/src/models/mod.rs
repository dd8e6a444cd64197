// ABOUTME: Core data models for the Fitlog client
// ABOUTME: Re-exports entry rows, meal types, identity, submission records, and dashboard types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `ExerciseRow` / `FoodRow`: one editable form row, every field held as raw text
//! - `WorkoutRecord` / `NutritionRecord` / `ProgressRecord`: typed rows sent to the store
//! - `WeightSample` / `NutritionTotals`: dashboard reductions

mod dashboard;
mod entry;
mod identity;
mod nutrition;
mod records;

// Editable rows
pub use entry::{EntryRow, ExerciseField, ExerciseRow, FoodField, FoodRow};

// Identity
pub use identity::UserIdentity;

// Nutrition domain
pub use nutrition::MealType;

// Submission records
pub use records::{
    format_timestamp, ExerciseEntry, NutritionRecord, ProgressRecord, SubmissionRecord,
    WorkoutRecord,
};

// Dashboard domain
pub use dashboard::{ChartPoint, DashboardStatus, DashboardSummary, NutritionTotals, WeightSample};
