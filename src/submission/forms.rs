// ABOUTME: Form sessions for the workout, nutrition, and progress forms
// ABOUTME: Own editor state and a busy flag; submit outcomes apply only to a live session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Form Sessions
//!
//! A submit is split into `begin_submit`, which snapshots the form and marks
//! it busy, and `finish_submit`, which applies the pipeline's result. The
//! pipeline call itself runs in between without borrowing the form, so the
//! form stays editable while the write is in flight.
//!
//! Every ticket carries the session generation it was issued for. Closing
//! the form bumps the generation, and a result arriving for an older
//! generation is dropped.

use fitlog_core::constants::messages;
use fitlog_core::models::{
    EntryRow, ExerciseRow, FoodRow, MealType, UserIdentity,
};
use serde::Serialize;
use tracing::debug;

use super::pipeline::SubmissionPipeline;
use super::{SubmitOutcome, Submitted};
use crate::context::require_identity;
use crate::editor::RowCollection;
use crate::errors::SubmissionError;
use crate::store::RecordStore;

/// Inline status shown under a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum FormStatus {
    /// Nothing to show
    #[default]
    Idle,
    /// A submission is in flight; the submit control is disabled
    Submitting,
    /// Last submission succeeded
    Succeeded(String),
    /// Last submission failed; the entered rows are kept
    Failed(String),
}

impl FormStatus {
    /// Whether a submission is in flight
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// The inline message, if any
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded(message) | Self::Failed(message) => Some(message),
            Self::Idle | Self::Submitting => None,
        }
    }

    /// Outcome view of a settled status
    #[must_use]
    pub fn outcome(&self) -> Option<SubmitOutcome> {
        match self {
            Self::Succeeded(message) => Some(SubmitOutcome::success(message.clone())),
            Self::Failed(message) => Some(SubmitOutcome::error(message.clone())),
            Self::Idle | Self::Submitting => None,
        }
    }
}

/// Permission to complete one submission, plus the snapshot it submits
#[derive(Debug, Clone)]
pub struct SubmitTicket<P> {
    generation: u64,
    identity: UserIdentity,
    payload: P,
}

impl<P> SubmitTicket<P> {
    /// Session generation the ticket was issued for
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// User the submission is made for
    #[must_use]
    pub const fn identity(&self) -> UserIdentity {
        self.identity
    }

    /// Form contents captured at submit time
    #[must_use]
    pub const fn payload(&self) -> &P {
        &self.payload
    }
}

/// Busy flag and generation counter shared by every form
#[derive(Debug, Default)]
struct Session {
    status: FormStatus,
    generation: u64,
}

impl Session {
    fn begin(&mut self, identity: Option<UserIdentity>) -> Result<(u64, UserIdentity), SubmissionError> {
        if self.status.is_busy() {
            debug!("Submit refused: already submitting");
            return Err(SubmissionError::Busy);
        }
        let user = require_identity(identity)?;
        self.generation += 1;
        self.status = FormStatus::Submitting;
        Ok((self.generation, user))
    }

    /// Apply a result; `Some(true)` on success, `None` for a stale ticket
    fn finish(
        &mut self,
        generation: u64,
        result: &Result<Submitted, SubmissionError>,
        success_message: &str,
    ) -> Option<bool> {
        if generation != self.generation || !self.status.is_busy() {
            debug!(
                ticket.generation = generation,
                session.generation = self.generation,
                "Discarding result for a closed or superseded form"
            );
            return None;
        }
        self.status = match result {
            Ok(_) => FormStatus::Succeeded(success_message.to_owned()),
            Err(error) => FormStatus::Failed(error.user_message()),
        };
        Some(result.is_ok())
    }

    fn close(&mut self) {
        self.generation += 1;
        self.status = FormStatus::Idle;
    }

    fn dismiss(&mut self) {
        if !self.status.is_busy() {
            self.status = FormStatus::Idle;
        }
    }
}

/// Row editing shared by the two multi-row forms
macro_rules! row_editing {
    ($row:ty) => {
        /// Current rows
        #[must_use]
        pub const fn rows(&self) -> &RowCollection<$row> {
            &self.rows
        }

        /// Append a blank row
        pub fn add_row(&mut self) {
            self.rows = self.rows.append_blank_row();
        }

        /// Replace one field of one row; out-of-range rows are ignored
        pub fn edit(
            &mut self,
            index: usize,
            field: <$row as EntryRow>::Field,
            value: impl Into<String>,
        ) {
            self.rows = self.rows.update_field(index, field, value);
        }

        /// Remove a row unless it is the only one
        pub fn remove_row(&mut self, index: usize) {
            self.rows = self.rows.remove_row(index);
        }
    };
}

/// Session controls shared by every form
macro_rules! session_controls {
    () => {
        /// Inline status
        #[must_use]
        pub const fn status(&self) -> &FormStatus {
            &self.session.status
        }

        /// Whether a submission is in flight
        #[must_use]
        pub const fn is_busy(&self) -> bool {
            self.session.status.is_busy()
        }

        /// Clear the inline message
        pub fn dismiss_message(&mut self) {
            self.session.dismiss();
        }

        /// Close the form; results of outstanding submissions are discarded
        pub fn close(&mut self) {
            self.session.close();
        }
    };
}

/// Snapshot submitted by the workout form
#[derive(Debug, Clone)]
pub struct WorkoutDraft {
    /// Exercise rows
    pub rows: RowCollection<ExerciseRow>,
    /// Workout notes
    pub notes: String,
}

/// Workout form: exercise rows plus notes
#[derive(Debug, Default)]
pub struct WorkoutForm {
    rows: RowCollection<ExerciseRow>,
    notes: String,
    session: Session,
}

impl WorkoutForm {
    /// Freshly opened form with one blank row
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    row_editing!(ExerciseRow);
    session_controls!();

    /// Workout notes
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replace the notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Mark the form busy and snapshot it
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a submission is in flight, `IdentityMissing`
    /// when nobody is signed in
    pub fn begin_submit(
        &mut self,
        identity: Option<UserIdentity>,
    ) -> Result<SubmitTicket<WorkoutDraft>, SubmissionError> {
        let (generation, identity) = self.session.begin(identity)?;
        Ok(SubmitTicket {
            generation,
            identity,
            payload: WorkoutDraft {
                rows: self.rows.clone(),
                notes: self.notes.clone(),
            },
        })
    }

    /// Apply a result; on success the rows and notes are reset.
    /// Returns `false` if the ticket is stale and nothing changed.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmitTicket<WorkoutDraft>,
        result: &Result<Submitted, SubmissionError>,
    ) -> bool {
        match self.session.finish(ticket.generation, result, messages::WORKOUT_LOGGED) {
            Some(true) => {
                self.rows = self.rows.reset();
                self.notes.clear();
                true
            }
            Some(false) => true,
            None => false,
        }
    }

    /// Begin, run the pipeline, and finish in one call
    ///
    /// # Errors
    ///
    /// Returns `Busy` or `IdentityMissing` if the submit could not start;
    /// store and validation failures are reported through the returned outcome
    pub async fn submit<S: RecordStore>(
        &mut self,
        pipeline: &SubmissionPipeline<S>,
        identity: Option<UserIdentity>,
    ) -> Result<SubmitOutcome, SubmissionError> {
        let ticket = self.begin_submit(identity)?;
        let draft = ticket.payload();
        let result = pipeline
            .submit_workout(Some(ticket.identity()), &draft.rows, &draft.notes)
            .await;
        self.finish_submit(&ticket, &result);
        Ok(SubmitOutcome::from_result(&result, messages::WORKOUT_LOGGED))
    }
}

/// Snapshot submitted by the nutrition form
#[derive(Debug, Clone)]
pub struct NutritionDraft {
    /// Food rows
    pub rows: RowCollection<FoodRow>,
    /// Meal the foods belong to
    pub meal_type: MealType,
}

/// Nutrition form: food rows plus meal type
#[derive(Debug, Default)]
pub struct NutritionForm {
    rows: RowCollection<FoodRow>,
    meal_type: MealType,
    session: Session,
}

impl NutritionForm {
    /// Freshly opened form: one blank row, breakfast
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    row_editing!(FoodRow);
    session_controls!();

    /// Selected meal type
    #[must_use]
    pub const fn meal_type(&self) -> MealType {
        self.meal_type
    }

    /// Select the meal type
    pub fn set_meal_type(&mut self, meal_type: MealType) {
        self.meal_type = meal_type;
    }

    /// Mark the form busy and snapshot it
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a submission is in flight, `IdentityMissing`
    /// when nobody is signed in
    pub fn begin_submit(
        &mut self,
        identity: Option<UserIdentity>,
    ) -> Result<SubmitTicket<NutritionDraft>, SubmissionError> {
        let (generation, identity) = self.session.begin(identity)?;
        Ok(SubmitTicket {
            generation,
            identity,
            payload: NutritionDraft {
                rows: self.rows.clone(),
                meal_type: self.meal_type,
            },
        })
    }

    /// Apply a result; on success the rows are reset and the meal type kept.
    /// Returns `false` if the ticket is stale and nothing changed.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmitTicket<NutritionDraft>,
        result: &Result<Submitted, SubmissionError>,
    ) -> bool {
        match self.session.finish(ticket.generation, result, messages::NUTRITION_LOGGED) {
            Some(true) => {
                self.rows = self.rows.reset();
                true
            }
            Some(false) => true,
            None => false,
        }
    }

    /// Begin, run the pipeline, and finish in one call
    ///
    /// # Errors
    ///
    /// Returns `Busy` or `IdentityMissing` if the submit could not start
    pub async fn submit<S: RecordStore>(
        &mut self,
        pipeline: &SubmissionPipeline<S>,
        identity: Option<UserIdentity>,
    ) -> Result<SubmitOutcome, SubmissionError> {
        let ticket = self.begin_submit(identity)?;
        let draft = ticket.payload();
        let result = pipeline
            .submit_nutrition(Some(ticket.identity()), &draft.rows, draft.meal_type)
            .await;
        self.finish_submit(&ticket, &result);
        Ok(SubmitOutcome::from_result(&result, messages::NUTRITION_LOGGED))
    }
}

/// Snapshot submitted by the progress form
#[derive(Debug, Clone)]
pub struct ProgressDraft {
    /// Weight text
    pub weight: String,
    /// Notes
    pub notes: String,
}

/// Progress form: one weight field plus notes
#[derive(Debug, Default)]
pub struct ProgressForm {
    weight: String,
    notes: String,
    session: Session,
}

impl ProgressForm {
    /// Freshly opened, empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    session_controls!();

    /// Weight text as typed
    #[must_use]
    pub fn weight(&self) -> &str {
        &self.weight
    }

    /// Replace the weight text
    pub fn set_weight(&mut self, weight: impl Into<String>) {
        self.weight = weight.into();
    }

    /// Notes
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Replace the notes
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Mark the form busy and snapshot it
    ///
    /// # Errors
    ///
    /// Returns `Busy` while a submission is in flight, `IdentityMissing`
    /// when nobody is signed in
    pub fn begin_submit(
        &mut self,
        identity: Option<UserIdentity>,
    ) -> Result<SubmitTicket<ProgressDraft>, SubmissionError> {
        let (generation, identity) = self.session.begin(identity)?;
        Ok(SubmitTicket {
            generation,
            identity,
            payload: ProgressDraft {
                weight: self.weight.clone(),
                notes: self.notes.clone(),
            },
        })
    }

    /// Apply a result; on success both fields are cleared.
    /// Returns `false` if the ticket is stale and nothing changed.
    pub fn finish_submit(
        &mut self,
        ticket: &SubmitTicket<ProgressDraft>,
        result: &Result<Submitted, SubmissionError>,
    ) -> bool {
        match self.session.finish(ticket.generation, result, messages::PROGRESS_LOGGED) {
            Some(true) => {
                self.weight.clear();
                self.notes.clear();
                true
            }
            Some(false) => true,
            None => false,
        }
    }

    /// Begin, run the pipeline, and finish in one call
    ///
    /// # Errors
    ///
    /// Returns `Busy` or `IdentityMissing` if the submit could not start
    pub async fn submit<S: RecordStore>(
        &mut self,
        pipeline: &SubmissionPipeline<S>,
        identity: Option<UserIdentity>,
    ) -> Result<SubmitOutcome, SubmissionError> {
        let ticket = self.begin_submit(identity)?;
        let draft = ticket.payload();
        let result = pipeline
            .submit_progress(Some(ticket.identity()), &draft.weight, &draft.notes)
            .await;
        self.finish_submit(&ticket, &result);
        Ok(SubmitOutcome::from_result(&result, messages::PROGRESS_LOGGED))
    }
}
