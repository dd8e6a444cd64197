// ABOUTME: Submission pipeline module: transform, persist, and form-session outcome handling
// ABOUTME: Exposes the typed success/error outcome returned to the form consumer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Submission
//!
//! - `transform`: rows to typed records, collecting validation issues
//! - `pipeline`: policy enforcement and store writes
//! - `forms`: per-form state with the busy flag and the liveness check

/// Form sessions
pub mod forms;
/// Validation policy enforcement and persistence
pub mod pipeline;
/// Row to record conversion
pub mod transform;

use serde::Serialize;

use crate::errors::SubmissionError;

pub use forms::{
    FormStatus, NutritionDraft, NutritionForm, ProgressDraft, ProgressForm, SubmitTicket,
    WorkoutDraft, WorkoutForm,
};
pub use pipeline::SubmissionPipeline;

/// Receipt for a completed write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submitted {
    /// Table written
    pub table: &'static str,
    /// Records stored
    pub records: usize,
}

/// Outcome discriminant; styling keys off this, never the message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStatus {
    /// Everything was stored
    Success,
    /// Nothing, or not everything, was stored
    Error,
}

/// What the form shows after a submit settles
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// Success or error
    pub status: SubmitStatus,
    /// Inline message
    pub message: Option<String>,
}

impl SubmitOutcome {
    /// Success with a message
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: SubmitStatus::Success,
            message: Some(message.into()),
        }
    }

    /// Error with a message
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SubmitStatus::Error,
            message: Some(message.into()),
        }
    }

    /// Map a pipeline result, using `success_message` on success
    #[must_use]
    pub fn from_result(result: &Result<Submitted, SubmissionError>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self::success(success_message),
            Err(error) => Self::error(error.user_message()),
        }
    }

    /// Whether the submission succeeded
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SubmitStatus::Success
    }
}
