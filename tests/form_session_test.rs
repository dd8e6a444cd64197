// ABOUTME: Integration tests for form sessions driving the submission pipeline
// ABOUTME: Busy flag, reset on success, no reset on failure, and stale-result discarding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::time::Duration;

use anyhow::Result;
use common::{test_client, test_client_with_store};
use fitlog::config::ClientConfig;
use fitlog::constants::tables;
use fitlog::context::IdentityProvider;
use fitlog::errors::SubmissionError;
use fitlog::models::{EntryRow, ExerciseField, ExerciseRow, FoodField, MealType};
use fitlog::store::memory::InMemoryRecordStore;
use fitlog::submission::{
    FormStatus, NutritionForm, ProgressForm, SubmitStatus, WorkoutForm,
};

fn filled_workout() -> WorkoutForm {
    let mut form = WorkoutForm::new();
    form.edit(0, ExerciseField::Name, "Squat");
    form.edit(0, ExerciseField::Sets, "3");
    form.edit(0, ExerciseField::Reps, "5");
    form.edit(0, ExerciseField::Weight, "135");
    form.set_notes("felt good");
    form
}

#[tokio::test]
async fn test_form_refuses_submit_while_in_flight() -> Result<()> {
    let store = InMemoryRecordStore::new().with_latency(Duration::from_millis(25));
    let client = test_client_with_store(store, ClientConfig::default());
    let pipeline = client.context.submission_pipeline();
    let mut form = filled_workout();

    let ticket = form.begin_submit(Some(client.user))?;
    let draft = ticket.payload().clone();
    assert_eq!(form.status(), &FormStatus::Submitting);

    let (result, (pipeline_busy, second)) = tokio::join!(
        pipeline.submit_workout(Some(ticket.identity()), &draft.rows, &draft.notes),
        async { (pipeline.is_busy(), form.begin_submit(Some(client.user)).map(|_| ())) }
    );

    assert!(pipeline_busy);
    assert_eq!(second, Err(SubmissionError::Busy));
    assert!(!pipeline.is_busy());

    assert!(form.finish_submit(&ticket, &result));
    assert!(!form.is_busy());
    assert_eq!(client.store.rows(tables::WORKOUTS).await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_success_resets_rows_and_notes() -> Result<()> {
    let client = test_client(ClientConfig::default());
    let pipeline = client.context.submission_pipeline();
    let mut form = filled_workout();

    let outcome = form.submit(&pipeline, Some(client.user)).await?;

    assert_eq!(outcome.status, SubmitStatus::Success);
    assert_eq!(outcome.message.as_deref(), Some("Workout logged successfully!"));
    assert_eq!(form.rows().len(), 1);
    assert!(form.rows().get(0).is_some_and(EntryRow::is_blank));
    assert_eq!(form.notes(), "");
    assert_eq!(form.status().outcome(), Some(outcome));

    form.dismiss_message();
    assert_eq!(form.status(), &FormStatus::Idle);
    Ok(())
}

#[tokio::test]
async fn test_success_collapses_several_rows_to_one_blank_row() -> Result<()> {
    let client = test_client(ClientConfig::default());
    let pipeline = client.context.submission_pipeline();
    let mut form = filled_workout();
    form.add_row();
    form.edit(1, ExerciseField::Name, "Bench");
    form.edit(1, ExerciseField::Sets, "3");
    form.edit(1, ExerciseField::Reps, "8");
    form.edit(1, ExerciseField::Weight, "155");
    assert_eq!(form.rows().len(), 2);

    let outcome = form.submit(&pipeline, Some(client.user)).await?;

    assert!(outcome.is_success());
    assert_eq!(form.rows().len(), 1);
    assert!(form.rows().get(0).is_some_and(EntryRow::is_blank));
    let stored = client.store.rows(tables::WORKOUTS).await;
    assert_eq!(stored[0]["exercises"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn test_failure_keeps_entered_rows() -> Result<()> {
    let client = test_client(ClientConfig::default());
    client
        .store
        .reject_inserts(tables::WORKOUTS, Some("new row violates row-level security policy"))
        .await;
    let pipeline = client.context.submission_pipeline();
    let mut form = filled_workout();
    let before = form.rows().clone();

    let outcome = form.submit(&pipeline, Some(client.user)).await?;

    assert_eq!(outcome.status, SubmitStatus::Error);
    assert_eq!(
        form.status(),
        &FormStatus::Failed("new row violates row-level security policy".to_owned())
    );
    assert_eq!(form.rows(), &before);
    assert_eq!(form.notes(), "felt good");
    Ok(())
}

#[tokio::test]
async fn test_validation_failure_is_shown_inline() -> Result<()> {
    let client = test_client(ClientConfig::default());
    let pipeline = client.context.submission_pipeline();
    let mut form = filled_workout();
    form.edit(0, ExerciseField::Sets, "three");

    let outcome = form.submit(&pipeline, Some(client.user)).await?;

    assert_eq!(outcome.message.as_deref(), Some("Row 1: sets must be a whole number"));
    assert_eq!(form.rows().get(0).map(|r| r.sets.as_str()), Some("three"));
    assert_eq!(client.store.insert_attempts().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_result_for_closed_form_is_discarded() -> Result<()> {
    let client = test_client(ClientConfig::default());
    let pipeline = client.context.submission_pipeline();
    let mut form = filled_workout();

    let ticket = form.begin_submit(Some(client.user))?;
    form.close();
    assert!(!form.is_busy());

    let draft = ticket.payload();
    let result = pipeline
        .submit_workout(Some(ticket.identity()), &draft.rows, &draft.notes)
        .await;
    assert!(result.is_ok());

    assert!(!form.finish_submit(&ticket, &result));
    assert_eq!(form.status(), &FormStatus::Idle);
    assert_eq!(form.rows().get(0).map(|r| r.name.as_str()), Some("Squat"));
    // No cancellation: the write itself still landed
    assert_eq!(client.store.rows(tables::WORKOUTS).await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_superseded_ticket_cannot_finish_a_newer_submit() -> Result<()> {
    let client = test_client(ClientConfig::default());
    let mut form = ProgressForm::new();
    form.set_weight("182");

    let stale = form.begin_submit(Some(client.user))?;
    form.close();
    let current = form.begin_submit(Some(client.user))?;
    assert!(current.generation() > stale.generation());

    let done = client
        .context
        .submission_pipeline()
        .submit_progress(Some(current.identity()), &current.payload().weight, "")
        .await;
    assert!(!form.finish_submit(&stale, &done));
    assert!(form.is_busy());
    assert!(form.finish_submit(&current, &done));
    assert_eq!(form.weight(), "");
    Ok(())
}

#[tokio::test]
async fn test_signed_out_user_cannot_submit() -> Result<()> {
    let client = test_client(ClientConfig::default());
    client.session.sign_out();
    let pipeline = client.context.submission_pipeline();
    let mut form = filled_workout();

    let error = form
        .submit(&pipeline, client.session.current_user())
        .await
        .unwrap_err();

    assert_eq!(error, SubmissionError::IdentityMissing);
    assert!(!form.is_busy());
    assert_eq!(client.store.insert_attempts().await, 0);
    Ok(())
}

#[tokio::test]
async fn test_nutrition_form_keeps_meal_type_after_success() -> Result<()> {
    let client = test_client(ClientConfig::default());
    let pipeline = client.context.submission_pipeline();
    let mut form = NutritionForm::new();
    form.set_meal_type(MealType::Snack);
    form.edit(0, FoodField::Name, "Apple");
    form.edit(0, FoodField::Calories, "95");
    form.edit(0, FoodField::Protein, "0.5");
    form.edit(0, FoodField::Carbs, "25");
    form.edit(0, FoodField::Fats, "0.3");

    let outcome = form.submit(&pipeline, client.context.current_user()).await?;

    assert!(outcome.is_success());
    assert_eq!(outcome.message.as_deref(), Some("Nutrition logged successfully!"));
    assert_eq!(form.meal_type(), MealType::Snack);
    assert!(form.rows().get(0).is_some_and(EntryRow::is_blank));
    Ok(())
}

#[tokio::test]
async fn test_editing_while_submitting_is_allowed() -> Result<()> {
    let client = test_client(ClientConfig::default());
    let mut form = filled_workout();

    let ticket = form.begin_submit(Some(client.user))?;
    form.edit(0, ExerciseField::Reps, "6");

    // The snapshot is what gets submitted
    assert_eq!(
        ticket.payload().rows.get(0).map(|r| r.reps.clone()),
        Some("5".to_owned())
    );
    assert_eq!(form.rows().get(0), Some(&ExerciseRow::new("Squat", "3", "6", "135")));
    Ok(())
}
