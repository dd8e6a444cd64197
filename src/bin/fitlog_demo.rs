// ABOUTME: Demo CLI that seeds sample history, submits a workout and a meal, prints the dashboard
// ABOUTME: Uses the configured record store; sample history is only seeded into the in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # In-memory store, random user, twelve days of weight history
//! cargo run --bin fitlog-demo
//!
//! # Fixed user and a shorter history
//! cargo run --bin fitlog-demo -- --user 7f1c5b9e-0000-4000-8000-000000000001 --days 5
//!
//! # Against a hosted PostgREST store
//! FITLOG_STORE=rest FITLOG_STORE_URL=https://project.example.co \
//!     FITLOG_STORE_API_KEY=anon cargo run --bin fitlog-demo -- --user <uuid>
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;
use clap::Parser;
use fitlog::aggregation::{start_of_day, DashboardView};
use fitlog::clock::{Clock, SystemClock};
use fitlog::config::ClientConfig;
use fitlog::constants::{columns, tables};
use fitlog::context::{ClientContext, SessionIdentity};
use fitlog::logging;
use fitlog::models::{format_timestamp, ExerciseField, FoodField, MealType, UserIdentity};
use fitlog::store::factory::Store;
use fitlog::store::memory::InMemoryRecordStore;
use fitlog::store::Row;
use fitlog::submission::{NutritionForm, WorkoutForm};
use serde_json::{json, Value};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "fitlog-demo",
    about = "Fitlog client demo",
    long_about = "Seeds sample history, submits a workout and a meal through the form sessions, and prints the dashboard as JSON."
)]
struct DemoArgs {
    /// User id to act as (random when omitted)
    #[arg(long)]
    user: Option<String>,

    /// Days of weight history to seed (1 to 3650)
    #[arg(long, default_value = "12", value_parser = clap::value_parser!(u32).range(1..=3650))]
    days: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = DemoArgs::parse();
    logging::init_from_env()?;

    let config = ClientConfig::from_env().context("Failed to load client configuration")?;
    let user = match args.user.as_deref() {
        Some(raw) => raw.parse::<UserIdentity>().context("Invalid --user value")?,
        None => UserIdentity::generate(),
    };

    let store = Store::from_config(&config).context("Failed to create record store")?;
    info!(store.backend = store.backend_name(), user.id = %user, "Demo starting");
    if let Store::Memory(memory) = &store {
        seed_history(memory, user, args.days).await;
    }

    let context = ClientContext::new(
        Arc::new(store),
        Arc::new(SystemClock),
        Arc::new(SessionIdentity::signed_in(user)),
        config,
    );
    let pipeline = context.submission_pipeline();

    let mut workout = WorkoutForm::new();
    workout.edit(0, ExerciseField::Name, "Squat");
    workout.edit(0, ExerciseField::Sets, "3");
    workout.edit(0, ExerciseField::Reps, "5");
    workout.edit(0, ExerciseField::Weight, "135");
    workout.set_notes("felt good");
    let workout_outcome = workout.submit(&pipeline, context.current_user()).await?;

    let mut meal = NutritionForm::new();
    meal.set_meal_type(MealType::Lunch);
    meal.edit(0, FoodField::Name, "Chicken breast");
    meal.edit(0, FoodField::Calories, "330");
    meal.edit(0, FoodField::Protein, "62");
    meal.edit(0, FoodField::Carbs, "0");
    meal.edit(0, FoodField::Fats, "7.2");
    meal.add_row();
    meal.edit(1, FoodField::Name, "Rice");
    meal.edit(1, FoodField::Calories, "205");
    meal.edit(1, FoodField::Protein, "4.3");
    meal.edit(1, FoodField::Carbs, "44.5");
    meal.edit(1, FoodField::Fats, "0.4");
    let meal_outcome = meal.submit(&pipeline, context.current_user()).await?;

    let mut dashboard = DashboardView::new();
    dashboard
        .refresh(
            &context.aggregation_engine(),
            context.current_user(),
            context.clock().today(),
        )
        .await;

    let report = json!({
        "user": user,
        "workout": workout_outcome,
        "nutrition": meal_outcome,
        "dashboard": dashboard,
        "chart": dashboard.chart_points(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render report")?
    );
    Ok(())
}

/// One weight sample per day, ending yesterday, plus an early breakfast today
async fn seed_history(store: &InMemoryRecordStore, user: UserIdentity, days: u32) {
    let now = SystemClock.now();
    let progress = (1..=days).rev().map(|ago| {
        let weight = 185.0 - f64::from(days - ago) * 0.4;
        row([
            (columns::USER_ID, json!(user)),
            (columns::WEIGHT, json!(weight)),
            (columns::NOTES, json!("")),
            (
                columns::TRACK_DATE,
                json!(format_timestamp(&(now - Duration::days(i64::from(ago))))),
            ),
        ])
    });
    store.seed(tables::PROGRESS_TRACKING, progress).await;

    let breakfast_at = start_of_day(now.date_naive()) + Duration::minutes(6 * 60 + 30);
    let breakfast = row([
        (columns::USER_ID, json!(user)),
        (columns::MEAL_TYPE, json!(MealType::Breakfast)),
        (columns::FOOD_NAME, json!("Oatmeal")),
        (columns::CALORIES, json!(150)),
        (columns::PROTEIN_GRAMS, json!(5)),
        (columns::CARBS_GRAMS, json!(27)),
        (columns::FATS_GRAMS, json!(2.5)),
        (columns::LOG_DATE, json!(format_timestamp(&breakfast_at))),
    ]);
    store.seed(tables::NUTRITION_LOGS, [breakfast]).await;
    info!(days, "Seeded sample history");
}

fn row<const N: usize>(values: [(&str, Value); N]) -> Row {
    values
        .into_iter()
        .map(|(column, value)| (column.to_owned(), value))
        .collect()
}
