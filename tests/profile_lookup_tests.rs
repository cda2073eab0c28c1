// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile lookup properties: the `None` collapse, the timeout, and
//! idempotence.

use std::time::{Duration, Instant};

use carelink_api::db::FirestoreDb;
use carelink_api::services::{ProfileService, ROLE_LOOKUP_TIMEOUT};

mod common;

#[tokio::test]
async fn role_is_returned_case_preserved() {
    let db = FirestoreDb::new_mock();
    db.seed_profile("uid-nurse", common::profile_with_role("Nurse"));
    let profiles = ProfileService::new(db);

    // Lower-casing is the router's job, not the lookup's
    assert_eq!(
        profiles.get_role("uid-nurse").await.as_deref(),
        Some("Nurse")
    );
}

#[tokio::test]
async fn missing_document_resolves_to_none() {
    let profiles = ProfileService::new(FirestoreDb::new_mock());
    assert_eq!(profiles.get_role("uid-ghost").await, None);
}

#[tokio::test]
async fn document_without_role_field_resolves_to_none() {
    let db = FirestoreDb::new_mock();
    db.seed_profile("uid-bare", carelink_api::models::UserProfile::default());
    let profiles = ProfileService::new(db);

    assert_eq!(profiles.get_role("uid-bare").await, None);
}

#[tokio::test]
async fn lookup_is_idempotent_against_unchanged_backend() {
    let db = FirestoreDb::new_mock();
    db.seed_profile("uid-doctor", common::profile_with_role("doctor"));
    let profiles = ProfileService::new(db);

    let first = profiles.get_role("uid-doctor").await;
    let second = profiles.get_role("uid-doctor").await;
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("doctor"));
}

#[tokio::test]
async fn slow_backend_times_out_to_none_without_raising() {
    let db = FirestoreDb::new_mock_with_latency(Duration::from_millis(500));
    db.seed_profile("uid-slow", common::profile_with_role("nurse"));
    let profiles = ProfileService::with_timeout(db, Duration::from_millis(50));

    let started = Instant::now();
    let role = profiles.get_role("uid-slow").await;

    assert_eq!(role, None);
    // Resolved at the deadline, not after the backend finally answered
    assert!(started.elapsed() < Duration::from_millis(400));
}

#[tokio::test]
async fn backend_error_resolves_to_none() {
    let profiles = ProfileService::new(FirestoreDb::new_offline());
    assert_eq!(profiles.get_role("uid-any").await, None);
}

#[tokio::test]
async fn full_profile_read_propagates_backend_errors() {
    // get_profile serves API reads, which report failures instead of
    // folding them into a fallback
    let profiles = ProfileService::new(FirestoreDb::new_offline());
    assert!(profiles.get_profile("uid-any").await.is_err());
}

#[test]
fn default_deadline_is_ten_seconds() {
    assert_eq!(ROLE_LOOKUP_TIMEOUT, Duration::from_secs(10));
}
