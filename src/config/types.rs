// ABOUTME: Policy enums selecting validation, batch-write, and weight-series behavior
// ABOUTME: Each parses from its snake_case environment value with a typed error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::errors::AppError;

/// What to do with numeric fields that fail to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Reject the whole submission before any write
    #[default]
    RejectLocally,
    /// Send invalid numbers as `null` and let the store's constraints decide
    PassThrough,
}

/// How a multi-row nutrition submission is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchWriteMode {
    /// One concurrent insert per row. Rows that succeed stay stored even when
    /// a sibling fails; the failure is reported as a partial batch.
    #[default]
    BestEffort,
    /// One all-or-nothing batch insert
    Transactional,
}

/// Which samples the bounded weight series keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSeriesPolicy {
    /// The latest samples, shown oldest to newest
    #[default]
    MostRecent,
    /// The earliest samples on record
    OldestFirst,
}

macro_rules! snake_case_enum {
    ($ty:ty, $label:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Environment value for this variant
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Display for $ty {
            fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().replace('-', "_").as_str() {
                    $($text => Ok(Self::$variant),)+
                    other => Err(AppError::config(format!(
                        concat!("unknown ", $label, " '{}'"),
                        other
                    ))),
                }
            }
        }
    };
}

snake_case_enum!(ValidationPolicy, "validation policy", {
    RejectLocally => "reject_locally",
    PassThrough => "pass_through",
});

snake_case_enum!(BatchWriteMode, "batch write mode", {
    BestEffort => "best_effort",
    Transactional => "transactional",
});

snake_case_enum!(WeightSeriesPolicy, "weight series policy", {
    MostRecent => "most_recent",
    OldestFirst => "oldest_first",
});
