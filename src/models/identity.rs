//! Authenticated principal as known to the identity provider.

use serde::{Deserialize, Serialize};

/// An authenticated identity, issued by the external identity provider.
///
/// The application never constructs or mutates one of these itself; it is
/// only ever deserialized from a provider response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-issued unique identifier (also the profile document key)
    pub uid: String,
    /// Email address the identity signed in with
    pub email: String,
    /// Whether the provider has verified the email address
    pub email_verified: bool,
}
