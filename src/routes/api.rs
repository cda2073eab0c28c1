// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated clients.

use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::UserProfile;
use crate::services::Destination;
use crate::AppState;

/// Routes that require a session token.
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", get(get_session))
        .route("/api/me", get(get_me))
}

// ─── Session ─────────────────────────────────────────────────

/// Current session response.
#[derive(Serialize)]
pub struct SessionStatusResponse {
    pub uid: String,
    /// Screen the client should render, re-resolved on every call
    pub destination: Destination,
}

/// Re-resolve the destination for the session's identity.
///
/// Called on app relaunch so the client lands on the right dashboard
/// without re-entering credentials.
async fn get_session(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<SessionStatusResponse>> {
    let destination = state.router.resolve_uid(&user.uid).await;

    Ok(Json(SessionStatusResponse {
        uid: user.uid,
        destination,
    }))
}

// ─── User Profile ────────────────────────────────────────────

/// Get the session identity's full profile document.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state.profiles.get_profile(&user.uid).await?.ok_or_else(|| {
        crate::error::AppError::NotFound(format!("No profile for {}", user.uid))
    })?;

    Ok(Json(profile))
}
