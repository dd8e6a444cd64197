// ABOUTME: Error types for the record store, submission pipeline, and aggregation engine
// ABOUTME: Structured thiserror enums that convert into the core AppError for display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Each component keeps a structured error enum. Anything that ends up in
//! front of the user goes through `user_message()`, which prefers the record
//! store's own reason and falls back to a generic message.

use std::fmt;

use fitlog_core::constants::messages;
pub use fitlog_core::errors::{AppError, AppResult, ErrorCode};
use thiserror::Error;

/// Failures reported by a record store backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached
    #[error("record store unavailable: {reason}")]
    Unavailable {
        /// Transport-level reason
        reason: String,
    },
    /// The store refused the request (constraint violation, expired auth, bad query)
    #[error("record store rejected request on '{table}'{}", reason_suffix(.message.as_deref()))]
    Rejected {
        /// Table the request targeted
        table: String,
        /// Reason reported by the store, if it gave one
        message: Option<String>,
    },
    /// The store answered with something that is not a row set
    #[error("could not decode record store response: {0}")]
    Decode(String),
}

fn reason_suffix(message: Option<&str>) -> String {
    message
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl StoreError {
    /// Rejection with a reason
    #[must_use]
    pub fn rejected(table: &str, message: impl Into<String>) -> Self {
        Self::Rejected {
            table: table.to_owned(),
            message: Some(message.into()),
        }
    }

    /// The reason to show a user, when the store provided one
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        let reason = match self {
            Self::Unavailable { reason } => Some(reason.as_str()),
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Decode(detail) => Some(detail.as_str()),
        };
        reason.filter(|r| !r.trim().is_empty())
    }

    /// `reason()` or the generic failure message
    #[must_use]
    pub fn user_message(&self) -> String {
        self.reason()
            .map_or_else(|| messages::GENERIC_FAILURE.to_owned(), str::to_owned)
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        let code = match error {
            StoreError::Unavailable { .. } => ErrorCode::ExternalServiceUnavailable,
            StoreError::Rejected { .. } => ErrorCode::ExternalServiceError,
            StoreError::Decode(_) => ErrorCode::SerializationError,
        };
        Self::new(code, error.user_message()).with_source(error)
    }
}

/// What was wrong with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Required text was empty
    Required,
    /// Numeric text did not parse
    Unparsable,
    /// Parsed but outside the accepted range
    OutOfRange,
}

impl IssueKind {
    /// Matching error code
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Required => ErrorCode::MissingRequiredField,
            Self::Unparsable => ErrorCode::InvalidFormat,
            Self::OutOfRange => ErrorCode::ValueOutOfRange,
        }
    }
}

/// One field that failed local validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Zero-based row index; `None` for single-field forms
    pub row: Option<usize>,
    /// Field name as shown in the form
    pub field: String,
    /// Failure class
    pub kind: IssueKind,
    /// Human-readable explanation
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.row {
            Some(row) => write!(f, "Row {}: {}", row + 1, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Why a submission did not complete
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SubmissionError {
    /// No authenticated identity; nothing was attempted
    #[error("no authenticated identity")]
    IdentityMissing,
    /// A submission for this form is already in flight
    #[error("a submission is already in progress")]
    Busy,
    /// Local validation failed; nothing was written
    #[error("{} field(s) failed validation", .issues.len())]
    Validation {
        /// Every offending field, in row then field order
        issues: Vec<ValidationIssue>,
    },
    /// The store rejected an all-or-nothing write; nothing was written
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A best-effort batch where some writes landed and others failed.
    ///
    /// The successful writes stay in the store; nothing is rolled back.
    #[error("{} of {} batch writes succeeded: {first_error}", .succeeded, .succeeded + .failed)]
    PartialBatch {
        /// Writes that were persisted
        succeeded: usize,
        /// Writes that failed
        failed: usize,
        /// First failure in row order
        first_error: StoreError,
    },
    /// A record could not be encoded as a store row; nothing was written
    #[error("could not encode record: {0}")]
    Encoding(String),
}

impl SubmissionError {
    /// Inline message for the form
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::IdentityMissing => "You must be signed in to log entries.".to_owned(),
            Self::Busy => "A submission is already in progress.".to_owned(),
            Self::Validation { issues } => issues.first().map_or_else(
                || messages::GENERIC_FAILURE.to_owned(),
                |first| {
                    if issues.len() > 1 {
                        format!("{first} (and {} more)", issues.len() - 1)
                    } else {
                        first.to_string()
                    }
                },
            ),
            Self::Store(error) => error.user_message(),
            Self::Encoding(_) => messages::GENERIC_FAILURE.to_owned(),
            Self::PartialBatch {
                succeeded,
                failed,
                first_error,
            } => format!(
                "{} ({succeeded} of {} entries were saved)",
                first_error.user_message(),
                succeeded + failed
            ),
        }
    }

    /// Number of writes that were persisted despite the failure
    #[must_use]
    pub const fn persisted_writes(&self) -> usize {
        match self {
            Self::PartialBatch { succeeded, .. } => *succeeded,
            _ => 0,
        }
    }
}

impl From<AppError> for SubmissionError {
    fn from(error: AppError) -> Self {
        Self::Encoding(error.message)
    }
}

impl From<SubmissionError> for AppError {
    fn from(error: SubmissionError) -> Self {
        let code = match &error {
            SubmissionError::IdentityMissing => ErrorCode::AuthRequired,
            SubmissionError::Busy => ErrorCode::ResourceLocked,
            SubmissionError::Validation { issues } => issues
                .first()
                .map_or(ErrorCode::InvalidInput, |issue| issue.kind.code()),
            SubmissionError::Store(StoreError::Unavailable { .. }) => {
                ErrorCode::ExternalServiceUnavailable
            }
            SubmissionError::Store(_) => ErrorCode::ExternalServiceError,
            SubmissionError::PartialBatch { .. } => ErrorCode::PartialBatchFailure,
            SubmissionError::Encoding(_) => ErrorCode::SerializationError,
        };
        Self::new(code, error.user_message()).with_source(error)
    }
}

/// Dashboard fetch failure
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregationError {
    /// No authenticated identity; nothing was queried
    #[error("no authenticated identity")]
    IdentityMissing,
    /// The underlying query failed
    #[error("dashboard query failed: {0}")]
    Store(#[from] StoreError),
}

impl From<AggregationError> for AppError {
    fn from(error: AggregationError) -> Self {
        let code = match error {
            AggregationError::IdentityMissing => ErrorCode::AuthRequired,
            AggregationError::Store(_) => ErrorCode::ExternalServiceError,
        };
        Self::new(code, messages::DASHBOARD_LOAD_FAILED).with_source(error)
    }
}
