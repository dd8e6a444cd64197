// ABOUTME: Transform step turning raw form rows into typed submission records
// ABOUTME: Parses numeric text and collects every local validation issue without raising
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Transform
//!
//! Parsing never fails outright: an unparsable number becomes
//! `Parsed::Invalid` and a matching `ValidationIssue` is recorded. Whether
//! the issues block the write is the pipeline's decision
//! (`ValidationPolicy`), not this module's.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use fitlog_core::models::{
    EntryRow, ExerciseEntry, ExerciseField, ExerciseRow, FoodField, FoodRow, MealType,
    NutritionRecord, ProgressRecord, UserIdentity, WorkoutRecord,
};
use fitlog_core::parse::{parse_decimal, parse_integer, Parsed};

use crate::editor::RowCollection;
use crate::errors::{IssueKind, ValidationIssue};

/// Records built from a form plus the issues found while building them
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed<T> {
    /// The typed record(s), with invalid numbers marked
    pub record: T,
    /// Local validation issues, in row then field order
    pub issues: Vec<ValidationIssue>,
}

impl<T> Transformed<T> {
    /// Whether every field passed local validation
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Collects issues for one form
#[derive(Debug, Default)]
struct Checker {
    issues: Vec<ValidationIssue>,
}

impl Checker {
    fn push(&mut self, row: Option<usize>, field: impl Display, kind: IssueKind, message: String) {
        self.issues.push(ValidationIssue {
            row,
            field: field.to_string(),
            kind,
            message,
        });
    }

    fn name(&mut self, row: Option<usize>, field: impl Display, label: &str, text: &str) -> String {
        let name = text.trim();
        if name.is_empty() {
            self.push(row, field, IssueKind::Required, format!("{label} is required"));
        }
        name.to_owned()
    }

    fn positive_integer(&mut self, row: Option<usize>, field: impl Display + Copy, text: &str) -> Parsed<i64> {
        let parsed = parse_integer(text);
        match parsed {
            Parsed::Invalid => self.push(
                row,
                field,
                IssueKind::Unparsable,
                format!("{field} must be a whole number"),
            ),
            Parsed::Value(v) if v <= 0 => self.push(
                row,
                field,
                IssueKind::OutOfRange,
                format!("{field} must be greater than zero"),
            ),
            Parsed::Value(_) => {}
        }
        parsed
    }

    fn non_negative_integer(&mut self, row: Option<usize>, field: impl Display + Copy, text: &str) -> Parsed<i64> {
        let parsed = parse_integer(text);
        match parsed {
            Parsed::Invalid => self.push(
                row,
                field,
                IssueKind::Unparsable,
                format!("{field} must be a whole number"),
            ),
            Parsed::Value(v) if v < 0 => self.push(
                row,
                field,
                IssueKind::OutOfRange,
                format!("{field} cannot be negative"),
            ),
            Parsed::Value(_) => {}
        }
        parsed
    }

    fn non_negative_decimal(&mut self, row: Option<usize>, field: impl Display + Copy, text: &str) -> Parsed<f64> {
        let parsed = parse_decimal(text);
        match parsed {
            Parsed::Invalid => self.push(
                row,
                field,
                IssueKind::Unparsable,
                format!("{field} must be a number"),
            ),
            Parsed::Value(v) if v < 0.0 => self.push(
                row,
                field,
                IssueKind::OutOfRange,
                format!("{field} cannot be negative"),
            ),
            Parsed::Value(_) => {}
        }
        parsed
    }
}

/// One workout record embedding every exercise row in order
#[must_use]
pub fn workout_record(
    user_id: UserIdentity,
    rows: &RowCollection<ExerciseRow>,
    notes: &str,
    at: DateTime<Utc>,
) -> Transformed<WorkoutRecord> {
    let mut check = Checker::default();
    let exercises = rows
        .rows()
        .enumerate()
        .map(|(index, row)| exercise_entry(&mut check, index, row))
        .collect();

    Transformed {
        record: WorkoutRecord {
            user_id,
            exercises,
            notes: notes.to_owned(),
            created_at: at,
        },
        issues: check.issues,
    }
}

fn exercise_entry(check: &mut Checker, index: usize, row: &ExerciseRow) -> ExerciseEntry {
    use ExerciseField::{Name, Reps, Sets, Weight};
    let at = Some(index);
    ExerciseEntry {
        name: check.name(at, Name, "Exercise name", row.field(Name)),
        sets: check.positive_integer(at, Sets, row.field(Sets)),
        reps: check.positive_integer(at, Reps, row.field(Reps)),
        weight: check.non_negative_decimal(at, Weight, row.field(Weight)),
    }
}

/// One nutrition record per food row, all sharing the meal type and log date
#[must_use]
pub fn nutrition_records(
    user_id: UserIdentity,
    rows: &RowCollection<FoodRow>,
    meal_type: MealType,
    at: DateTime<Utc>,
) -> Transformed<Vec<NutritionRecord>> {
    let mut check = Checker::default();
    let records = rows
        .rows()
        .enumerate()
        .map(|(index, row)| food_record(&mut check, index, row, user_id, meal_type, at))
        .collect();

    Transformed {
        record: records,
        issues: check.issues,
    }
}

fn food_record(
    check: &mut Checker,
    index: usize,
    row: &FoodRow,
    user_id: UserIdentity,
    meal_type: MealType,
    log_date: DateTime<Utc>,
) -> NutritionRecord {
    use FoodField::{Calories, Carbs, Fats, Name, Protein};
    let at = Some(index);
    NutritionRecord {
        user_id,
        meal_type,
        food_name: check.name(at, Name, "Food name", row.field(Name)),
        calories: check.non_negative_integer(at, Calories, row.field(Calories)),
        protein_grams: check.non_negative_decimal(at, Protein, row.field(Protein)),
        carbs_grams: check.non_negative_decimal(at, Carbs, row.field(Carbs)),
        fats_grams: check.non_negative_decimal(at, Fats, row.field(Fats)),
        log_date,
    }
}

/// A single body-weight sample
#[must_use]
pub fn progress_record(
    user_id: UserIdentity,
    weight: &str,
    notes: &str,
    at: DateTime<Utc>,
) -> Transformed<ProgressRecord> {
    let mut check = Checker::default();
    let weight = match check.non_negative_decimal(None, "weight", weight) {
        Parsed::Value(v) if v.abs() < f64::EPSILON => {
            check.push(
                None,
                "weight",
                IssueKind::OutOfRange,
                "weight must be greater than zero".to_owned(),
            );
            Parsed::Value(v)
        }
        other => other,
    };

    Transformed {
        record: ProgressRecord {
            user_id,
            weight,
            notes: notes.to_owned(),
            track_date: at,
        },
        issues: check.issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 4, 9, 0, 0).unwrap()
    }

    #[test]
    fn squat_row_becomes_typed_exercise() {
        let rows = RowCollection::from_rows([ExerciseRow::new("Squat", "3", "5", "135")]);
        let out = workout_record(UserIdentity::generate(), &rows, "felt good", at());

        assert!(out.is_valid());
        let squat = &out.record.exercises[0];
        assert_eq!(squat.sets, Parsed::Value(3));
        assert_eq!(squat.reps, Parsed::Value(5));
        assert_eq!(squat.weight, Parsed::Value(135.0));
        assert_eq!(out.record.notes, "felt good");
    }

    #[test]
    fn every_bad_field_is_reported_in_order() {
        let rows = RowCollection::from_rows([
            FoodRow::new("Rice", "300", "6", "65", "0.5"),
            FoodRow::new(" ", "abc", "-1", "", "2"),
        ]);
        let out = nutrition_records(UserIdentity::generate(), &rows, MealType::Lunch, at());

        let fields: Vec<_> = out
            .issues
            .iter()
            .map(|i| (i.row, i.field.as_str(), i.kind))
            .collect();
        assert_eq!(
            fields,
            vec![
                (Some(1), "name", IssueKind::Required),
                (Some(1), "calories", IssueKind::Unparsable),
                (Some(1), "protein", IssueKind::OutOfRange),
                (Some(1), "carbs", IssueKind::Unparsable),
            ]
        );
        assert_eq!(out.record[1].calories, Parsed::Invalid);
        assert_eq!(out.record[0].calories, Parsed::Value(300));
    }

    #[test]
    fn zero_sets_are_out_of_range() {
        let rows = RowCollection::from_rows([ExerciseRow::new("Plank", "0", "1", "0")]);
        let out = workout_record(UserIdentity::generate(), &rows, "", at());
        assert_eq!(out.issues.len(), 1);
        assert_eq!(out.issues[0].to_string(), "Row 1: sets must be greater than zero");
    }

    #[test]
    fn progress_weight_must_parse() {
        let out = progress_record(UserIdentity::generate(), "", "", at());
        assert_eq!(out.record.weight, Parsed::Invalid);
        assert_eq!(out.issues[0].message, "weight must be a number");
        assert_eq!(out.issues[0].to_string(), "weight must be a number");
    }
}
