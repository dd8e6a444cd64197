// ABOUTME: Client context bundling the store, clock, identity provider, and configuration
// ABOUTME: Hands out submission pipelines and aggregation engines wired to the same store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Client Context
//!
//! The host application builds one `ClientContext` and passes it to its
//! pages. Components receive only the pieces they use: a form gets a
//! `SubmissionPipeline`, the dashboard gets an `AggregationEngine`.

/// Identity provider seam
pub mod identity;

use std::sync::Arc;

use fitlog_core::models::UserIdentity;

pub use identity::{require_identity, IdentityProvider, SessionIdentity};

use crate::aggregation::AggregationEngine;
use crate::clock::Clock;
use crate::config::ClientConfig;
use crate::store::RecordStore;
use crate::submission::SubmissionPipeline;

/// Shared client dependencies
pub struct ClientContext<S: RecordStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    identity: Arc<dyn IdentityProvider>,
    config: Arc<ClientConfig>,
}

impl<S: RecordStore> Clone for ClientContext<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            identity: Arc::clone(&self.identity),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: RecordStore> ClientContext<S> {
    /// Create a new context
    #[must_use]
    pub fn new(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        identity: Arc<dyn IdentityProvider>,
        config: ClientConfig,
    ) -> Self {
        Self {
            store,
            clock,
            identity,
            config: Arc::new(config),
        }
    }

    /// Record store
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Time source
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Loaded configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Signed-in user, if any
    #[must_use]
    pub fn current_user(&self) -> Option<UserIdentity> {
        self.identity.current_user()
    }

    /// Pipeline configured with the submission policies
    #[must_use]
    pub fn submission_pipeline(&self) -> SubmissionPipeline<S> {
        SubmissionPipeline::new(
            Arc::clone(&self.store),
            Arc::clone(&self.clock),
            self.config.submission,
        )
    }

    /// Engine configured with the aggregation policies
    #[must_use]
    pub fn aggregation_engine(&self) -> AggregationEngine<S> {
        AggregationEngine::new(Arc::clone(&self.store), self.config.aggregation)
    }
}
