// ABOUTME: Identity provider seam exposing the currently signed-in user
// ABOUTME: Session-backed implementation with sign-in/sign-out for the host application
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::{Arc, PoisonError, RwLock};

use fitlog_core::models::UserIdentity;

use crate::errors::SubmissionError;

/// Answers "who is signed in right now"
pub trait IdentityProvider: Send + Sync {
    /// The signed-in user, if any
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Identity held by the host application's auth session
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    user: Arc<RwLock<Option<UserIdentity>>>,
}

impl SessionIdentity {
    /// Session already signed in as `user`
    #[must_use]
    pub fn signed_in(user: UserIdentity) -> Self {
        Self {
            user: Arc::new(RwLock::new(Some(user))),
        }
    }

    /// Session with nobody signed in
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Record a sign-in
    pub fn sign_in(&self, user: UserIdentity) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
        tracing::debug!(user.id = %user, "Identity signed in");
    }

    /// Record a sign-out
    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
        tracing::debug!("Identity signed out");
    }
}

impl IdentityProvider for SessionIdentity {
    fn current_user(&self) -> Option<UserIdentity> {
        *self.user.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// The signed-in user, or `IdentityMissing`
///
/// # Errors
///
/// Returns `SubmissionError::IdentityMissing` when nobody is signed in
pub fn require_identity(identity: Option<UserIdentity>) -> Result<UserIdentity, SubmissionError> {
    identity.ok_or(SubmissionError::IdentityMissing)
}
