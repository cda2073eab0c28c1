// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email/password authentication routes.
//!
//! Each handler runs the full resolution pipeline: local credential
//! validation, the identity provider call, the profile role lookup, and
//! destination selection. Validation failures never reach the provider.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::credentials::validate_credentials;
use crate::error::Result;
use crate::middleware::auth::create_jwt;
use crate::models::Identity;
use crate::services::Destination;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/signin", post(sign_in))
        .route("/auth/signout", post(sign_out))
}

/// Sign-in / sign-up request body.
#[derive(Deserialize)]
pub struct CredentialRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Serialize)]
pub struct SessionResponse {
    /// Session JWT; send as Bearer token or the session cookie
    pub token: String,
    pub uid: String,
    pub email: String,
    pub email_verified: bool,
    /// Screen the client should render
    pub destination: Destination,
    pub issued_at: String,
}

#[derive(Serialize)]
pub struct SignOutResponse {
    pub success: bool,
}

/// Sign in with email and password.
async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<SessionResponse>> {
    let creds = validate_credentials(&request.email, &request.password)?;

    let identity = state.identity.sign_in(&creds.email, &creds.password).await?;
    let destination = state.router.resolve(&identity).await;

    session_response(&state, identity, destination).map(Json)
}

/// Create a new account.
///
/// The profile document is provisioned out-of-band, so a fresh account
/// resolves to the patient dashboard until that runs.
async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<SessionResponse>> {
    let creds = validate_credentials(&request.email, &request.password)?;

    let identity = state.identity.sign_up(&creds.email, &creds.password).await?;
    let destination = state.router.resolve(&identity).await;

    session_response(&state, identity, destination).map(Json)
}

/// Sign out. Fire-and-forget; the client discards its session token.
async fn sign_out(State(state): State<Arc<AppState>>) -> Json<SignOutResponse> {
    state.identity.sign_out();
    Json(SignOutResponse { success: true })
}

fn session_response(
    state: &AppState,
    identity: Identity,
    destination: Destination,
) -> Result<SessionResponse> {
    let token = create_jwt(&identity.uid, &state.config.jwt_signing_key)?;

    Ok(SessionResponse {
        token,
        uid: identity.uid,
        email: identity.email,
        email_verified: identity.email_verified,
        destination,
        issued_at: chrono::Utc::now().to_rfc3339(),
    })
}
