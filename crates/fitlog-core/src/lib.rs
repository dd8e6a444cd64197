// ABOUTME: Core types and constants for the Fitlog fitness tracking client
// ABOUTME: Foundation crate with entry rows, record DTOs, error handling, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitlog Core
//!
//! Foundation crate providing shared types and constants for the Fitlog
//! fitness tracking client. Everything here is free of I/O so the editor,
//! submission pipeline and aggregation engine can share one vocabulary.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Table names, column names, user-facing messages and defaults
//! - **models**: Entry rows, submission records, identity and dashboard types
//! - **parse**: Text-to-number parsing with explicit invalid markers

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (entry rows, records, dashboard summary)
pub mod models;

/// Numeric parsing for raw form text
pub mod parse;
