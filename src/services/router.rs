// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Role routing: map a resolved role to the screen a client should render.
//!
//! The router is driven by the identity-change channel. Every notification
//! gets a fresh generation number; a role-lookup result is applied only if
//! its generation is still current, so a lookup that was in flight when a
//! newer sign-in/sign-out arrived is discarded instead of routing the
//! client to a stale dashboard.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use crate::models::Identity;
use crate::services::profile::ProfileService;

/// Screen a client should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    SignIn,
    DoctorDashboard,
    PatientDashboard,
    NurseDashboard,
    ResponsiblePartyDashboard,
}

impl Destination {
    /// Select a dashboard for an authenticated identity's role.
    ///
    /// Matching is case-insensitive. Unknown roles and `None` (lookup
    /// failed, timed out, or the document carries no role) fall back to
    /// the patient dashboard.
    pub fn for_role(role: Option<&str>) -> Self {
        match role.map(|r| r.to_lowercase()).as_deref() {
            Some("doctor") => Destination::DoctorDashboard,
            Some("patient") => Destination::PatientDashboard,
            Some("nurse") => Destination::NurseDashboard,
            Some("responsible") | Some("responsibleparty") => {
                Destination::ResponsiblePartyDashboard
            }
            _ => Destination::PatientDashboard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Destination::SignIn => "sign_in",
            Destination::DoctorDashboard => "doctor_dashboard",
            Destination::PatientDashboard => "patient_dashboard",
            Destination::NurseDashboard => "nurse_dashboard",
            Destination::ResponsiblePartyDashboard => "responsible_party_dashboard",
        }
    }
}

/// Router state, published on a watch channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterState {
    /// No identity; destination is the sign-in screen.
    Unauthenticated,
    /// Identity present, role lookup in flight.
    Resolving { uid: String },
    /// Role resolved (or fallback applied); destination selected.
    Routed { uid: String, destination: Destination },
}

impl RouterState {
    pub fn destination(&self) -> Option<Destination> {
        match self {
            RouterState::Unauthenticated => Some(Destination::SignIn),
            RouterState::Resolving { .. } => None,
            RouterState::Routed { destination, .. } => Some(*destination),
        }
    }
}

/// Decision logic mapping identity changes to destinations.
pub struct RoleRouter {
    profiles: ProfileService,
    generation: AtomicU64,
    state: watch::Sender<RouterState>,
}

impl RoleRouter {
    pub fn new(profiles: ProfileService) -> Self {
        let (state, _) = watch::channel(RouterState::Unauthenticated);
        Self {
            profiles,
            generation: AtomicU64::new(0),
            state,
        }
    }

    /// Subscribe to router state. The receiver holds the current state
    /// immediately and is notified on every transition.
    pub fn state(&self) -> watch::Receiver<RouterState> {
        self.state.subscribe()
    }

    /// Resolve a destination for an identity directly, outside the
    /// channel-driven machine. Used by request handlers that already hold
    /// the identity for the session they serve.
    pub async fn resolve(&self, identity: &Identity) -> Destination {
        self.resolve_uid(&identity.uid).await
    }

    /// Resolve a destination for a bare uid (e.g. from a session token).
    pub async fn resolve_uid(&self, uid: &str) -> Destination {
        let role = self.profiles.get_role(uid).await;
        Destination::for_role(role.as_deref())
    }

    /// Drive the router from an identity-change subscription.
    ///
    /// Runs until the identity service is dropped. Each notification is
    /// handled on its own task so a slow role lookup never delays newer
    /// notifications.
    pub async fn run(self: Arc<Self>, mut changes: watch::Receiver<Option<Identity>>) {
        loop {
            let identity = changes.borrow_and_update().clone();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let router = self.clone();
            tokio::spawn(async move { router.apply(generation, identity).await });

            if changes.changed().await.is_err() {
                tracing::debug!("Identity-change channel closed, router stopping");
                break;
            }
        }
    }

    /// Apply one identity-change notification at the given generation.
    async fn apply(&self, generation: u64, identity: Option<Identity>) {
        let Some(identity) = identity else {
            if self.is_current(generation) {
                self.state.send_replace(RouterState::Unauthenticated);
            }
            return;
        };

        if !self.is_current(generation) {
            return;
        }
        self.state.send_replace(RouterState::Resolving {
            uid: identity.uid.clone(),
        });

        let role = self.profiles.get_role(&identity.uid).await;

        if self.is_current(generation) {
            let destination = Destination::for_role(role.as_deref());
            tracing::info!(uid = %identity.uid, destination = destination.as_str(), "Routed");
            self.state.send_replace(RouterState::Routed {
                uid: identity.uid,
                destination,
            });
        } else {
            tracing::debug!(uid = %identity.uid, generation, "Discarding stale role lookup");
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_map_to_their_dashboards() {
        assert_eq!(
            Destination::for_role(Some("doctor")),
            Destination::DoctorDashboard
        );
        assert_eq!(
            Destination::for_role(Some("patient")),
            Destination::PatientDashboard
        );
        assert_eq!(
            Destination::for_role(Some("nurse")),
            Destination::NurseDashboard
        );
        assert_eq!(
            Destination::for_role(Some("responsible")),
            Destination::ResponsiblePartyDashboard
        );
        assert_eq!(
            Destination::for_role(Some("responsibleparty")),
            Destination::ResponsiblePartyDashboard
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            Destination::for_role(Some("DOCTOR")),
            Destination::DoctorDashboard
        );
        assert_eq!(
            Destination::for_role(Some("Nurse")),
            Destination::NurseDashboard
        );
        assert_eq!(
            Destination::for_role(Some("ResponsibleParty")),
            Destination::ResponsiblePartyDashboard
        );
    }

    #[test]
    fn unknown_and_missing_roles_fall_back_to_patient() {
        assert_eq!(
            Destination::for_role(Some("admin")),
            Destination::PatientDashboard
        );
        assert_eq!(
            Destination::for_role(Some("")),
            Destination::PatientDashboard
        );
        assert_eq!(Destination::for_role(None), Destination::PatientDashboard);
    }

    #[test]
    fn destination_tags_are_stable() {
        assert_eq!(Destination::SignIn.as_str(), "sign_in");
        assert_eq!(
            Destination::ResponsiblePartyDashboard.as_str(),
            "responsible_party_dashboard"
        );
        assert_eq!(
            serde_json::to_value(Destination::NurseDashboard).unwrap(),
            serde_json::json!("nurse_dashboard")
        );
    }

    #[test]
    fn state_destination_projection() {
        assert_eq!(
            RouterState::Unauthenticated.destination(),
            Some(Destination::SignIn)
        );
        assert_eq!(
            RouterState::Resolving {
                uid: "u".to_string()
            }
            .destination(),
            None
        );
    }
}
