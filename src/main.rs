// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CareLink API Server
//!
//! Authenticates the CareLink mobile clients against the hosted identity
//! provider, resolves each identity's role from its profile document, and
//! tells the client which dashboard to render.

use carelink_api::{
    config::Config,
    db::FirestoreDb,
    services::{IdentityService, ProfileService, RoleRouter},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting CareLink API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Identity provider client (owns the identity-change channel)
    let identity = IdentityService::new(&config);
    tracing::info!(base_url = %config.identity_base_url, "Identity provider client initialized");

    let profiles = ProfileService::new(db.clone());

    // Role router, driven by identity changes for the lifetime of the process
    let router = Arc::new(RoleRouter::new(profiles.clone()));
    tokio::spawn(router.clone().run(identity.identity_changes()));

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        identity,
        profiles,
        router,
    });

    // Build router
    let app = carelink_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carelink_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
