//! User profile document stored in Firestore.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-identity profile document, keyed by the identity's uid.
///
/// Created out-of-band (a provisioning hook, not this service), so every
/// field tolerates being absent. Read-only from this service's perspective.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Role tag that selects the dashboard: doctor, patient, nurse,
    /// responsible / responsibleparty. Matched case-insensitively.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_role: Option<String>,

    /// Display attributes (name, department, phone, ...)
    #[serde(default)]
    pub profile: HashMap<String, serde_json::Value>,

    /// Platform tags this identity has been seen on
    #[serde(default)]
    pub platforms: Vec<String>,

    /// Client preferences (language, notification flags, ...)
    #[serde(default)]
    pub preferences: HashMap<String, serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_platform: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_document() {
        // A freshly provisioned document may carry only the role
        let profile: UserProfile =
            serde_json::from_value(serde_json::json!({ "activeRole": "Nurse" })).unwrap();

        assert_eq!(profile.active_role.as_deref(), Some("Nurse"));
        assert!(profile.profile.is_empty());
        assert!(profile.platforms.is_empty());
    }

    #[test]
    fn deserializes_full_document() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "activeRole": "doctor",
            "profile": { "name": "Dr. Aydin", "department": "Cardiology" },
            "platforms": ["android", "ios"],
            "preferences": { "language": "tr", "notifications": true },
            "createdAt": "2026-01-05T08:30:00Z",
            "lastLoginAt": "2026-08-01T19:12:44Z",
            "lastLoginPlatform": "android"
        }))
        .unwrap();

        assert_eq!(profile.active_role.as_deref(), Some("doctor"));
        assert_eq!(
            profile.profile.get("department").and_then(|v| v.as_str()),
            Some("Cardiology")
        );
        assert_eq!(profile.platforms, vec!["android", "ios"]);
        assert_eq!(profile.last_login_platform.as_deref(), Some("android"));
    }

    #[test]
    fn missing_role_stays_none() {
        let profile: UserProfile =
            serde_json::from_value(serde_json::json!({ "platforms": ["web"] })).unwrap();
        assert!(profile.active_role.is_none());
    }
}
