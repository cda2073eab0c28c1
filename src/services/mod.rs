// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod identity;
pub mod profile;
pub mod router;

pub use identity::{AuthError, IdentityService, MockAccount};
pub use profile::{ProfileService, ROLE_LOOKUP_TIMEOUT};
pub use router::{Destination, RoleRouter, RouterState};
