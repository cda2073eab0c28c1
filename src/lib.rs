// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! CareLink API: authentication and role-based routing for the CareLink
//! healthcare app.
//!
//! This crate provides the backend the mobile clients (patient, nurse,
//! doctor, responsible party) sign in against: credential validation,
//! identity-provider calls, profile role lookup, and selection of the
//! dashboard each client should render.

pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use config::Config;
use db::FirestoreDb;
use services::{IdentityService, ProfileService, RoleRouter};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub identity: IdentityService,
    pub profiles: ProfileService,
    pub router: Arc<RoleRouter>,
}
