// ABOUTME: Integration tests for the row collection editor
// ABOUTME: Blank-row floor, order preservation, and structural sharing of untouched rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use fitlog::editor::RowCollection;
use fitlog::models::{EntryRow, ExerciseField, ExerciseRow, FoodField, FoodRow};

fn three_exercises() -> RowCollection<ExerciseRow> {
    RowCollection::from_rows([
        ExerciseRow::new("Squat", "3", "5", "225"),
        ExerciseRow::new("Bench", "3", "5", "185"),
        ExerciseRow::new("Row", "3", "8", "135"),
    ])
}

fn names(rows: &RowCollection<ExerciseRow>) -> Vec<&str> {
    rows.rows().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_append_adds_blank_row_at_the_end() {
    let before = three_exercises();
    let after = before.append_blank_row();

    assert_eq!(after.len(), 4);
    assert!(after.get(3).is_some_and(EntryRow::is_blank));
    for i in 0..3 {
        assert!(Arc::ptr_eq(
            before.row_handle(i).unwrap(),
            after.row_handle(i).unwrap()
        ));
    }
    // The previous value is untouched
    assert_eq!(before.len(), 3);
}

#[test]
fn test_update_field_replaces_only_the_target_row() {
    let before = three_exercises();
    let after = before.update_field(1, ExerciseField::Weight, "190");

    assert_eq!(after.get(1), Some(&ExerciseRow::new("Bench", "3", "5", "190")));
    assert!(!Arc::ptr_eq(
        before.row_handle(1).unwrap(),
        after.row_handle(1).unwrap()
    ));
    assert!(Arc::ptr_eq(before.row_handle(0).unwrap(), after.row_handle(0).unwrap()));
    assert!(Arc::ptr_eq(before.row_handle(2).unwrap(), after.row_handle(2).unwrap()));
    assert_eq!(before.get(1).map(|r| r.weight.as_str()), Some("185"));
}

#[test]
fn test_update_field_keeps_raw_text() {
    let rows = RowCollection::<FoodRow>::new()
        .update_field(0, FoodField::Calories, "12.")
        .update_field(0, FoodField::Protein, "-");

    let row = rows.get(0).unwrap();
    assert_eq!(row.calories, "12.");
    assert_eq!(row.protein, "-");
}

#[test]
fn test_update_out_of_range_is_a_no_op() {
    let before = three_exercises();
    let after = before.update_field(7, ExerciseField::Name, "Ghost");
    assert_eq!(after, before);
}

#[test]
fn test_remove_preserves_order_of_the_rest() {
    let before = three_exercises();
    let after = before.remove_row(1);

    assert_eq!(names(&after), vec!["Squat", "Row"]);
    assert!(Arc::ptr_eq(before.row_handle(2).unwrap(), after.row_handle(1).unwrap()));
}

#[test]
fn test_remove_on_single_row_is_a_no_op() {
    let single = RowCollection::from_rows([ExerciseRow::new("Squat", "3", "5", "225")]);
    assert!(!single.can_remove());

    let after = single.remove_row(0);
    assert_eq!(after.len(), 1);
    assert_eq!(after, single);
}

#[test]
fn test_remove_out_of_range_is_a_no_op() {
    let before = three_exercises();
    assert_eq!(before.remove_row(3), before);
}

#[test]
fn test_removing_down_to_one_row_stops_there() {
    let rows = three_exercises().remove_row(0).remove_row(0).remove_row(0);
    assert_eq!(names(&rows), vec!["Row"]);
}

#[test]
fn test_reset_and_empty_input_yield_one_blank_row() {
    let reset = three_exercises().reset();
    assert_eq!(reset.len(), 1);
    assert!(reset.get(0).is_some_and(EntryRow::is_blank));

    let empty = RowCollection::<FoodRow>::from_rows(Vec::new());
    assert_eq!(empty.len(), 1);
    assert!(!empty.is_empty());
}
