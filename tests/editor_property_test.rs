// ABOUTME: Property-based tests for the row collection editor
// ABOUTME: Random edit sequences never empty the collection or disturb untouched rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Property tests for `RowCollection`.
//!
//! ```bash
//! cargo test --test editor_property_test
//! PROPTEST_CASES=10000 cargo test --test editor_property_test
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::sync::Arc;

use fitlog::editor::RowCollection;
use fitlog::models::{ExerciseField, ExerciseRow};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Append,
    Update(usize, ExerciseField, String),
    Remove(usize),
    Reset,
}

fn field() -> impl Strategy<Value = ExerciseField> {
    prop_oneof![
        Just(ExerciseField::Name),
        Just(ExerciseField::Sets),
        Just(ExerciseField::Reps),
        Just(ExerciseField::Weight),
    ]
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => Just(Edit::Append),
        4 => (0..8_usize, field(), "[a-z0-9.]{0,6}")
            .prop_map(|(i, f, v)| Edit::Update(i, f, v)),
        3 => (0..8_usize).prop_map(Edit::Remove),
        1 => Just(Edit::Reset),
    ]
}

fn apply(rows: &RowCollection<ExerciseRow>, edit: &Edit) -> RowCollection<ExerciseRow> {
    match edit {
        Edit::Append => rows.append_blank_row(),
        Edit::Update(i, f, v) => rows.update_field(*i, *f, v.clone()),
        Edit::Remove(i) => rows.remove_row(*i),
        Edit::Reset => rows.reset(),
    }
}

fn rows_from(names: &[String]) -> RowCollection<ExerciseRow> {
    RowCollection::from_rows(names.iter().map(|n| ExerciseRow::new(n, "1", "1", "1")))
}

proptest! {
    /// Any edit sequence leaves at least one row
    #[test]
    fn prop_edits_never_empty_the_collection(edits in prop::collection::vec(edit(), 0..40)) {
        let mut rows = RowCollection::<ExerciseRow>::new();
        for e in &edits {
            rows = apply(&rows, e);
            prop_assert!(rows.get(0).is_some());
        }
    }

    /// Updating one row shares every other row's allocation
    #[test]
    fn prop_update_shares_untouched_rows(
        names in prop::collection::vec("[A-Z][a-z]{0,5}", 1..8),
        target in 0..8_usize,
        f in field(),
        value in "[0-9]{0,4}",
    ) {
        let before = rows_from(&names);
        let after = before.update_field(target, f, value);
        prop_assert_eq!(after.len(), before.len());
        for i in (0..before.len()).filter(|i| *i != target) {
            prop_assert!(Arc::ptr_eq(
                before.row_handle(i).unwrap(),
                after.row_handle(i).unwrap()
            ));
        }
    }

    /// Removing keeps the remaining rows in their original relative order
    #[test]
    fn prop_remove_preserves_relative_order(
        names in prop::collection::vec("[A-Z][a-z]{0,5}", 1..8),
        target in 0..8_usize,
    ) {
        let before = rows_from(&names);
        let after = before.remove_row(target);

        let mut expected = names.clone();
        if names.len() > 1 && target < names.len() {
            expected.remove(target);
        }
        let actual: Vec<String> = after.rows().map(|r| r.name.clone()).collect();
        prop_assert_eq!(actual, expected);
    }

    /// Appending never touches existing rows
    #[test]
    fn prop_append_keeps_prefix(names in prop::collection::vec("[A-Z][a-z]{0,5}", 1..8)) {
        let before = rows_from(&names);
        let after = before.append_blank_row();
        prop_assert_eq!(after.len(), before.len() + 1);
        for i in 0..before.len() {
            prop_assert!(Arc::ptr_eq(
                before.row_handle(i).unwrap(),
                after.row_handle(i).unwrap()
            ));
        }
    }
}
