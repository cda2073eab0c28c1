// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use carelink_api::config::Config;
use carelink_api::db::FirestoreDb;
use carelink_api::models::UserProfile;
use carelink_api::routes::create_router;
use carelink_api::services::{IdentityService, MockAccount, ProfileService, RoleRouter};
use carelink_api::AppState;
use std::sync::Arc;

/// Create a test app with mock identity and database backends.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = FirestoreDb::new_mock();
    let identity = IdentityService::new_mock();
    let profiles = ProfileService::new(db.clone());
    let router = Arc::new(RoleRouter::new(profiles.clone()));

    let state = Arc::new(AppState {
        config,
        db,
        identity,
        profiles,
        router,
    });

    (create_router(state.clone()), state)
}

/// Create a session JWT the way the auth routes do.
#[allow(dead_code)]
pub fn create_test_jwt(uid: &str, signing_key: &[u8]) -> String {
    carelink_api::middleware::auth::create_jwt(uid, signing_key).expect("Failed to create JWT")
}

/// Register an account with the mock identity provider.
#[allow(dead_code)]
pub fn seed_account(state: &AppState, email: &str, password: &str, uid: &str) {
    state.identity.add_mock_account(
        email,
        MockAccount {
            uid: uid.to_string(),
            password: password.to_string(),
            disabled: false,
            email_verified: true,
        },
    );
}

/// A profile document carrying only a role.
#[allow(dead_code)]
pub fn profile_with_role(role: &str) -> UserProfile {
    UserProfile {
        active_role: Some(role.to_string()),
        ..Default::default()
    }
}
