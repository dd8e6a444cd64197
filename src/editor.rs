// ABOUTME: Row collection editor backing the multi-row workout and nutrition forms
// ABOUTME: Copy-on-write sequence of shared rows; every edit returns a new collection value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Row Collection Editor
//!
//! A `RowCollection` is an immutable value. Editing returns a new collection
//! that shares every untouched row with the previous one (`Arc` per row), so
//! state transitions can be checked by plain value comparison and untouched
//! rows can be checked by pointer identity.
//!
//! The collection never drops below one row: removing the last row is a no-op.

use std::sync::Arc;

use fitlog_core::models::EntryRow;
use tracing::debug;

/// Ordered rows of one open form
#[derive(Debug, Clone, PartialEq)]
pub struct RowCollection<R: EntryRow> {
    rows: Arc<[Arc<R>]>,
}

impl<R: EntryRow> Default for RowCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: EntryRow> RowCollection<R> {
    /// Collection holding a single blank row, the state of a freshly opened form
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Arc::from(vec![Arc::new(R::default())]),
        }
    }

    /// Collection from existing rows; an empty input yields one blank row
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = R>) -> Self {
        let rows: Vec<Arc<R>> = rows.into_iter().map(Arc::new).collect();
        if rows.is_empty() {
            return Self::new();
        }
        Self {
            rows: Arc::from(rows),
        }
    }

    /// Number of rows, always at least one
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; present for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        self.rows.get(index).map(AsRef::as_ref)
    }

    /// Shared handle of the row at `index`, for identity checks
    #[must_use]
    pub fn row_handle(&self, index: usize) -> Option<&Arc<R>> {
        self.rows.get(index)
    }

    /// Rows in display order
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &R> + '_ {
        self.rows.iter().map(AsRef::as_ref)
    }

    /// Whether a remove control should be offered
    #[must_use]
    pub fn can_remove(&self) -> bool {
        self.rows.len() > 1
    }

    /// Append one blank row at the end
    #[must_use]
    pub fn append_blank_row(&self) -> Self {
        let mut rows = self.rows.to_vec();
        rows.push(Arc::new(R::default()));
        Self {
            rows: Arc::from(rows),
        }
    }

    /// Replace one field of the row at `index`.
    ///
    /// Every other row keeps its existing allocation. An out-of-bounds index
    /// returns an unchanged collection; this happens when an edit event races
    /// a removal.
    #[must_use]
    pub fn update_field(&self, index: usize, field: R::Field, value: impl Into<String>) -> Self {
        let Some(current) = self.rows.get(index) else {
            debug!(index, len = self.rows.len(), "Ignoring field update for missing row");
            return self.clone();
        };

        let mut updated = R::clone(current);
        updated.set_field(field, value.into());

        let mut rows = self.rows.to_vec();
        rows[index] = Arc::new(updated);
        Self {
            rows: Arc::from(rows),
        }
    }

    /// Remove the row at `index` unless it is the only row left
    #[must_use]
    pub fn remove_row(&self, index: usize) -> Self {
        if !self.can_remove() || index >= self.rows.len() {
            debug!(index, len = self.rows.len(), "Ignoring row removal");
            return self.clone();
        }

        let rows: Vec<Arc<R>> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, row)| Arc::clone(row))
            .collect();
        Self {
            rows: Arc::from(rows),
        }
    }

    /// Back to the single blank row of a fresh form
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::new()
    }
}
