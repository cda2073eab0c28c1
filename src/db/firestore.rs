// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! The role-resolution flow only ever reads: one profile document fetched
//! by identity uid. No writes are issued from this service; profile
//! documents are provisioned out-of-band.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::db::collections;
use crate::error::AppError;
use crate::models::UserProfile;

enum Backend {
    /// Real Firestore connection.
    Live(firestore::FirestoreDb),
    /// In-memory documents for tests, with optional artificial read latency.
    Mock {
        profiles: DashMap<String, UserProfile>,
        latency: Option<Duration>,
    },
    /// No connection; every operation fails. Exercises error paths in tests.
    Offline,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Arc<Backend>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development against the emulator, set
    /// FIRESTORE_EMULATOR_HOST; the underlying client honors it.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Arc::new(Backend::Live(client)),
        })
    }

    /// Create an in-memory mock client for testing.
    ///
    /// Documents are seeded with [`FirestoreDb::seed_profile`].
    pub fn new_mock() -> Self {
        Self {
            backend: Arc::new(Backend::Mock {
                profiles: DashMap::new(),
                latency: None,
            }),
        }
    }

    /// Create an in-memory mock whose reads take `latency` to complete.
    ///
    /// Used to exercise the lookup timeout and stale-response handling.
    pub fn new_mock_with_latency(latency: Duration) -> Self {
        Self {
            backend: Arc::new(Backend::Mock {
                profiles: DashMap::new(),
                latency: Some(latency),
            }),
        }
    }

    /// Create a client with no connection (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_offline() -> Self {
        Self {
            backend: Arc::new(Backend::Offline),
        }
    }

    /// Seed a profile document into a mock backend. No-op on live/offline.
    pub fn seed_profile(&self, uid: &str, profile: UserProfile) {
        match self.backend.as_ref() {
            Backend::Mock { profiles, .. } => {
                profiles.insert(uid.to_string(), profile);
            }
            _ => tracing::warn!(uid, "seed_profile called on a non-mock backend"),
        }
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile document by identity uid.
    ///
    /// Returns `Ok(None)` when no document exists at that uid, which is a
    /// legitimate state (fresh sign-up before provisioning has run).
    pub async fn get_user_profile(&self, uid: &str) -> Result<Option<UserProfile>, AppError> {
        match self.backend.as_ref() {
            Backend::Live(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USERS)
                .obj()
                .one(uid)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Mock { profiles, latency } => {
                if let Some(latency) = latency {
                    tokio::time::sleep(*latency).await;
                }
                Ok(profiles.get(uid).map(|entry| entry.value().clone()))
            }
            Backend::Offline => Err(AppError::Database(
                "Database not connected (offline mode)".to_string(),
            )),
        }
    }
}
