// ABOUTME: Editable entry rows for the workout and nutrition forms
// ABOUTME: Every field is raw text so partially typed numbers survive until submission
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// One editable row of a multi-row form.
///
/// `Default` is the all-empty row appended by "add row". Numeric fields are
/// stored as text and only parsed when the form is submitted.
pub trait EntryRow: Clone + Default + PartialEq + fmt::Debug {
    /// Field selector for this row shape
    type Field: Copy + Eq + fmt::Debug + fmt::Display + 'static;

    /// Every field in display order
    const FIELDS: &'static [Self::Field];

    /// Current text of a field
    fn field(&self, field: Self::Field) -> &str;

    /// Replace the text of a field
    fn set_field(&mut self, field: Self::Field, value: String);

    /// Whether every field is empty
    fn is_blank(&self) -> bool {
        Self::FIELDS.iter().all(|f| self.field(*f).is_empty())
    }
}

/// Exercise row fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseField {
    /// Exercise name
    Name,
    /// Number of sets
    Sets,
    /// Reps per set
    Reps,
    /// Load in lbs
    Weight,
}

impl fmt::Display for ExerciseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Sets => "sets",
            Self::Reps => "reps",
            Self::Weight => "weight",
        })
    }
}

/// One exercise being typed into the workout form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRow {
    /// Exercise name (required)
    pub name: String,
    /// Sets, positive integer text
    pub sets: String,
    /// Reps, positive integer text
    pub reps: String,
    /// Weight in lbs, decimal text
    pub weight: String,
}

impl ExerciseRow {
    /// Convenience constructor used by tests and demo data
    #[must_use]
    pub fn new(name: &str, sets: &str, reps: &str, weight: &str) -> Self {
        Self {
            name: name.to_owned(),
            sets: sets.to_owned(),
            reps: reps.to_owned(),
            weight: weight.to_owned(),
        }
    }
}

impl EntryRow for ExerciseRow {
    type Field = ExerciseField;

    const FIELDS: &'static [ExerciseField] = &[
        ExerciseField::Name,
        ExerciseField::Sets,
        ExerciseField::Reps,
        ExerciseField::Weight,
    ];

    fn field(&self, field: ExerciseField) -> &str {
        match field {
            ExerciseField::Name => &self.name,
            ExerciseField::Sets => &self.sets,
            ExerciseField::Reps => &self.reps,
            ExerciseField::Weight => &self.weight,
        }
    }

    fn set_field(&mut self, field: ExerciseField, value: String) {
        match field {
            ExerciseField::Name => self.name = value,
            ExerciseField::Sets => self.sets = value,
            ExerciseField::Reps => self.reps = value,
            ExerciseField::Weight => self.weight = value,
        }
    }
}

/// Food row fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodField {
    /// Food name
    Name,
    /// Calories
    Calories,
    /// Protein grams
    Protein,
    /// Carbohydrate grams
    Carbs,
    /// Fat grams
    Fats,
}

impl fmt::Display for FoodField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbs => "carbs",
            Self::Fats => "fats",
        })
    }
}

/// One food item being typed into the nutrition form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodRow {
    /// Food name (required)
    pub name: String,
    /// Calories, integer text
    pub calories: String,
    /// Protein grams, decimal text
    pub protein: String,
    /// Carbohydrate grams, decimal text
    pub carbs: String,
    /// Fat grams, decimal text
    pub fats: String,
}

impl FoodRow {
    /// Convenience constructor used by tests and demo data
    #[must_use]
    pub fn new(name: &str, calories: &str, protein: &str, carbs: &str, fats: &str) -> Self {
        Self {
            name: name.to_owned(),
            calories: calories.to_owned(),
            protein: protein.to_owned(),
            carbs: carbs.to_owned(),
            fats: fats.to_owned(),
        }
    }
}

impl EntryRow for FoodRow {
    type Field = FoodField;

    const FIELDS: &'static [FoodField] = &[
        FoodField::Name,
        FoodField::Calories,
        FoodField::Protein,
        FoodField::Carbs,
        FoodField::Fats,
    ];

    fn field(&self, field: FoodField) -> &str {
        match field {
            FoodField::Name => &self.name,
            FoodField::Calories => &self.calories,
            FoodField::Protein => &self.protein,
            FoodField::Carbs => &self.carbs,
            FoodField::Fats => &self.fats,
        }
    }

    fn set_field(&mut self, field: FoodField, value: String) {
        match field {
            FoodField::Name => self.name = value,
            FoodField::Calories => self.calories = value,
            FoodField::Protein => self.protein = value,
            FoodField::Carbs => self.carbs = value,
            FoodField::Fats => self.fats = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rows_are_blank() {
        assert!(ExerciseRow::default().is_blank());
        assert!(FoodRow::default().is_blank());
        assert!(!ExerciseRow::new("Squat", "", "", "").is_blank());
    }

    #[test]
    fn field_accessors_round_trip() {
        let mut row = FoodRow::default();
        for (i, field) in FoodRow::FIELDS.iter().enumerate() {
            row.set_field(*field, i.to_string());
        }
        assert_eq!(row, FoodRow::new("0", "1", "2", "3", "4"));
        assert_eq!(row.field(FoodField::Carbs), "3");
    }
}
