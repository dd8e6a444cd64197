// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Quiet logging, fixed clock, in-memory store contexts, and row builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `fitlog`

use std::sync::{Arc, Once};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fitlog::clock::FixedClock;
use fitlog::config::ClientConfig;
use fitlog::constants::{columns, tables};
use fitlog::context::{ClientContext, SessionIdentity};
use fitlog::models::{format_timestamp, UserIdentity};
use fitlog::store::memory::InMemoryRecordStore;
use fitlog::store::Row;
use serde_json::{json, Value};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Noon UTC on 2025-03-04, the "now" of every test
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 4, 12, 0, 0).unwrap()
}

/// The calendar day of `test_now()`
pub fn test_day() -> NaiveDate {
    test_now().date_naive()
}

/// Everything an integration test needs to drive the client
pub struct TestClient {
    /// Handle onto the same tables the context writes to
    pub store: InMemoryRecordStore,
    /// Client context over `store`
    pub context: ClientContext<InMemoryRecordStore>,
    /// Clock used for every timestamp
    pub clock: FixedClock,
    /// Signed-in user
    pub user: UserIdentity,
    /// Identity session, for sign-out tests
    pub session: SessionIdentity,
}

/// Client over a fresh in-memory store with the given configuration
pub fn test_client(config: ClientConfig) -> TestClient {
    test_client_with_store(InMemoryRecordStore::new(), config)
}

/// Client over an existing store
pub fn test_client_with_store(store: InMemoryRecordStore, config: ClientConfig) -> TestClient {
    init_test_logging();
    let user = UserIdentity::generate();
    let clock = FixedClock::new(test_now());
    let session = SessionIdentity::signed_in(user);
    let context = ClientContext::new(
        Arc::new(store.clone()),
        Arc::new(clock.clone()),
        Arc::new(session.clone()),
        config,
    );
    TestClient {
        store,
        context,
        clock,
        user,
        session,
    }
}

/// Object value to a store row
pub fn row(value: Value) -> Row {
    value.as_object().cloned().unwrap()
}

/// `days` daily progress samples for `user`, `days` days ago up to yesterday,
/// with weight `200 + n` on the n-th day
pub async fn seed_progress(store: &InMemoryRecordStore, user: UserIdentity, days: u32) {
    let start = test_now() - Duration::days(i64::from(days));
    let rows = (1..=days).map(|n| {
        row(json!({
            (columns::USER_ID): user.to_string(),
            (columns::WEIGHT): 200 + n,
            (columns::NOTES): "",
            (columns::TRACK_DATE): format_timestamp(&(start + Duration::days(i64::from(n - 1)))),
        }))
    });
    store.seed(tables::PROGRESS_TRACKING, rows).await;
}

/// One nutrition log for `user` at `at`
pub fn nutrition_row(user: UserIdentity, calories: Value, protein: Value, at: DateTime<Utc>) -> Row {
    row(json!({
        (columns::USER_ID): user.to_string(),
        (columns::MEAL_TYPE): "lunch",
        (columns::FOOD_NAME): "Test food",
        (columns::CALORIES): calories,
        (columns::PROTEIN_GRAMS): protein,
        (columns::CARBS_GRAMS): 0,
        (columns::FATS_GRAMS): 0,
        (columns::LOG_DATE): format_timestamp(&at),
    }))
}
