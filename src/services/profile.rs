// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile lookup: resolve a role string for an identity, tolerating
//! backend unavailability.
//!
//! A missing document and a backend error are deliberately folded into the
//! same `None` outcome: the document may legitimately not exist yet (fresh
//! sign-up before provisioning), and the caller's fallback is identical
//! either way.

use std::time::Duration;

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::UserProfile;

/// Deadline for the role lookup; on expiry the role resolves to `None`.
pub const ROLE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Profile document reader.
#[derive(Clone)]
pub struct ProfileService {
    db: FirestoreDb,
    timeout: Duration,
}

impl ProfileService {
    pub fn new(db: FirestoreDb) -> Self {
        Self {
            db,
            timeout: ROLE_LOOKUP_TIMEOUT,
        }
    }

    /// Override the lookup deadline. Tests use short deadlines.
    pub fn with_timeout(db: FirestoreDb, timeout: Duration) -> Self {
        Self { db, timeout }
    }

    /// Resolve the role string for `uid`.
    ///
    /// Never fails: timeout, read errors, a missing document, and a
    /// document without an `activeRole` field all yield `None`. A present
    /// role is returned with its case preserved; lower-casing happens in
    /// the router.
    pub async fn get_role(&self, uid: &str) -> Option<String> {
        match tokio::time::timeout(self.timeout, self.db.get_user_profile(uid)).await {
            Err(_) => {
                tracing::warn!(uid, timeout_secs = self.timeout.as_secs(), "Role lookup timed out");
                None
            }
            Ok(Err(e)) => {
                tracing::warn!(uid, error = %e, "Role lookup failed");
                None
            }
            Ok(Ok(None)) => {
                tracing::debug!(uid, "No profile document");
                None
            }
            Ok(Ok(Some(profile))) => profile.active_role,
        }
    }

    /// Fetch the full profile document for authenticated API reads.
    ///
    /// Unlike [`ProfileService::get_role`], errors propagate here: the
    /// caller is an API handler that should report them, not a routing
    /// decision with a defined fallback.
    pub async fn get_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        self.db.get_user_profile(uid).await
    }
}
