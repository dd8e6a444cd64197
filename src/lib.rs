// ABOUTME: Main library entry point for the Fitlog fitness tracking client
// ABOUTME: Row editing, submission pipeline, record stores, and dashboard aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitlog
//!
//! Client core for a personal fitness tracker: users log workouts, meals
//! and body weight, and see a dashboard of recent trends.
//!
//! ## Architecture
//!
//! - **Editor**: copy-on-write row collections behind the multi-row forms
//! - **Submission**: rows to typed records, validation policy, store writes,
//!   and form sessions with a busy flag
//! - **Aggregation**: weight series and daily nutrition totals, loaded
//!   concurrently into the dashboard view
//! - **Store**: `RecordStore` trait with in-memory and `PostgREST` backends
//! - **Config / Logging**: environment configuration and `tracing` setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use fitlog::clock::SystemClock;
//! use fitlog::config::ClientConfig;
//! use fitlog::context::{ClientContext, SessionIdentity};
//! use fitlog::models::{ExerciseField, UserIdentity};
//! use fitlog::store::memory::InMemoryRecordStore;
//! use fitlog::submission::WorkoutForm;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let user = UserIdentity::generate();
//!     let context = ClientContext::new(
//!         Arc::new(InMemoryRecordStore::new()),
//!         Arc::new(SystemClock),
//!         Arc::new(SessionIdentity::signed_in(user)),
//!         ClientConfig::from_env()?,
//!     );
//!
//!     let mut form = WorkoutForm::new();
//!     form.edit(0, ExerciseField::Name, "Squat");
//!     form.edit(0, ExerciseField::Sets, "3");
//!     form.edit(0, ExerciseField::Reps, "5");
//!     form.edit(0, ExerciseField::Weight, "135");
//!
//!     let outcome = form
//!         .submit(&context.submission_pipeline(), context.current_user())
//!         .await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

/// Dashboard aggregation engine
pub mod aggregation;

/// Time source
pub mod clock;

/// Environment configuration and policies
pub mod config;

/// Client context and identity provider
pub mod context;

/// Row collection editor
pub mod editor;

/// Error types
pub mod errors;

/// Logging setup and structured log events
pub mod logging;

/// Record store trait and backends
pub mod store;

/// Submission pipeline and form sessions
pub mod submission;

/// Domain models, re-exported from the core crate
pub mod models {
    pub use fitlog_core::models::*;
    pub use fitlog_core::parse::{parse_decimal, parse_integer, Parsed};
}

/// Constants, re-exported from the core crate
pub use fitlog_core::constants;
