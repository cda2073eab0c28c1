// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider client: sign-in, sign-up, sign-out, and the
//! identity-change channel.
//!
//! This is the sole point of contact with the hosted identity provider
//! (Identity Toolkit REST API). Each operation is a single round trip; no
//! caching, no retry. Provider error codes are translated to a fixed error
//! taxonomy with user-facing messages.

use axum::http::StatusCode;
use dashmap::DashMap;
use serde::Deserialize;
use tokio::sync::watch;

use crate::config::Config;
use crate::models::Identity;

/// Identity provider failure, mapped from provider error codes.
///
/// The `Display` strings are the fixed user-facing messages shown inline
/// on the sign-in/sign-up forms.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect email or password.")]
    InvalidCredentials,

    #[error("This account has been disabled.")]
    AccountDisabled,

    #[error("An account already exists for that email.")]
    EmailAlreadyInUse,

    #[error("That password is too weak.")]
    WeakPassword,

    #[error("Enter a valid email address.")]
    MalformedEmail,

    #[error("Something went wrong. Please try again.")]
    Unknown,
}

impl AuthError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::AccountDisabled => "account_disabled",
            AuthError::EmailAlreadyInUse => "email_already_in_use",
            AuthError::WeakPassword => "weak_password",
            AuthError::MalformedEmail => "malformed_email",
            AuthError::Unknown => "auth_provider_error",
        }
    }

    /// HTTP status the error surfaces as.
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountDisabled => StatusCode::FORBIDDEN,
            AuthError::EmailAlreadyInUse => StatusCode::CONFLICT,
            AuthError::WeakPassword => StatusCode::BAD_REQUEST,
            AuthError::MalformedEmail => StatusCode::BAD_REQUEST,
            AuthError::Unknown => StatusCode::BAD_GATEWAY,
        }
    }

    fn from_sign_in_code(code: &str) -> Self {
        match code {
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                AuthError::InvalidCredentials
            }
            "USER_DISABLED" => AuthError::AccountDisabled,
            "INVALID_EMAIL" => AuthError::MalformedEmail,
            _ => AuthError::Unknown,
        }
    }

    fn from_sign_up_code(code: &str) -> Self {
        match code {
            "EMAIL_EXISTS" => AuthError::EmailAlreadyInUse,
            "WEAK_PASSWORD" => AuthError::WeakPassword,
            "INVALID_EMAIL" => AuthError::MalformedEmail,
            _ => AuthError::Unknown,
        }
    }
}

/// Account record for the mock provider backend.
#[derive(Debug, Clone)]
pub struct MockAccount {
    pub uid: String,
    pub password: String,
    pub disabled: bool,
    pub email_verified: bool,
}

/// REST transport to the real identity provider.
struct LiveProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

enum IdentityBackend {
    /// Real identity provider over REST.
    Live(LiveProvider),
    /// In-memory account table reproducing the provider's decision table.
    Mock {
        accounts: DashMap<String, MockAccount>,
    },
}

/// Identity provider client.
///
/// Also owns the identity-change channel: every subscriber observes the
/// current identity on subscription and one notification per sign-in or
/// sign-out transition. Failed operations emit nothing.
pub struct IdentityService {
    backend: IdentityBackend,
    current: watch::Sender<Option<Identity>>,
}

impl IdentityService {
    /// Create a client against the configured identity provider.
    pub fn new(config: &Config) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            backend: IdentityBackend::Live(LiveProvider {
                http: reqwest::Client::new(),
                base_url: config.identity_base_url.clone(),
                api_key: config.identity_api_key.clone(),
            }),
            current,
        }
    }

    /// Create a mock client for testing (no network).
    pub fn new_mock() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            backend: IdentityBackend::Mock {
                accounts: DashMap::new(),
            },
            current,
        }
    }

    /// Register an account in a mock backend. No-op on the live backend.
    pub fn add_mock_account(&self, email: &str, account: MockAccount) {
        match &self.backend {
            IdentityBackend::Mock { accounts } => {
                accounts.insert(email.to_string(), account);
            }
            IdentityBackend::Live(_) => {
                tracing::warn!(email, "add_mock_account called on the live backend");
            }
        }
    }

    // ─── Provider Operations ─────────────────────────────────────

    /// Sign in with email and password.
    ///
    /// On success the identity-change channel emits the new identity.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = match &self.backend {
            IdentityBackend::Live(provider) => provider
                .call("accounts:signInWithPassword", email, password)
                .await
                .map_err(|code| {
                    let err = AuthError::from_sign_in_code(&code);
                    tracing::warn!(code = %code, error = %err, "Sign-in rejected by provider");
                    err
                })?,
            IdentityBackend::Mock { accounts } => {
                let account = accounts
                    .get(email)
                    .map(|entry| entry.value().clone())
                    .ok_or(AuthError::InvalidCredentials)?;
                if account.disabled {
                    return Err(AuthError::AccountDisabled);
                }
                if account.password != password {
                    return Err(AuthError::InvalidCredentials);
                }
                Identity {
                    uid: account.uid,
                    email: email.to_string(),
                    email_verified: account.email_verified,
                }
            }
        };

        tracing::info!(uid = %identity.uid, "Signed in");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Create a new account.
    ///
    /// The provider signs the new account in as part of sign-up, so on
    /// success the identity-change channel emits the new identity. The
    /// corresponding profile document is NOT created here; provisioning is
    /// out-of-band, so a fresh account resolves to the fallback role until
    /// that runs.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = match &self.backend {
            IdentityBackend::Live(provider) => provider
                .call("accounts:signUp", email, password)
                .await
                .map_err(|code| {
                    let err = AuthError::from_sign_up_code(&code);
                    tracing::warn!(code = %code, error = %err, "Sign-up rejected by provider");
                    err
                })?,
            IdentityBackend::Mock { accounts } => {
                if accounts.contains_key(email) {
                    return Err(AuthError::EmailAlreadyInUse);
                }
                if !email.contains('@') {
                    return Err(AuthError::MalformedEmail);
                }
                if password.chars().count() < crate::credentials::MIN_PASSWORD_LEN {
                    return Err(AuthError::WeakPassword);
                }
                let uid = format!("mock-uid-{}", accounts.len() + 1);
                accounts.insert(
                    email.to_string(),
                    MockAccount {
                        uid: uid.clone(),
                        password: password.to_string(),
                        disabled: false,
                        email_verified: false,
                    },
                );
                Identity {
                    uid,
                    email: email.to_string(),
                    email_verified: false,
                }
            }
        };

        tracing::info!(uid = %identity.uid, "Account created");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    /// Sign out. Fire-and-forget: always succeeds from the caller's view.
    ///
    /// Emits `None` on the identity-change channel, once per actual
    /// transition (signing out while signed out is a no-op).
    pub fn sign_out(&self) {
        let was_signed_in = self.current.send_if_modified(|current| {
            if current.is_some() {
                *current = None;
                true
            } else {
                false
            }
        });
        if was_signed_in {
            tracing::info!("Signed out");
        }
    }

    /// Synchronous snapshot of the current identity.
    pub fn current_identity(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    /// Subscribe to identity changes.
    ///
    /// The receiver holds the current state immediately and is notified on
    /// every subsequent transition. Dropping it cancels only this
    /// subscription.
    pub fn identity_changes(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }
}

// ─── Provider Transport ──────────────────────────────────────

impl LiveProvider {
    /// Issue one credential call against the provider REST API.
    ///
    /// Returns the provider error code string on failure so the caller can
    /// apply the operation-specific mapping.
    async fn call(&self, endpoint: &str, email: &str, password: &str) -> Result<Identity, String> {
        let url = format!("{}/{}?key={}", self.base_url, endpoint, self.api_key);
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self.http.post(&url).json(&body).send().await.map_err(|e| {
            tracing::error!(error = %e, endpoint, "Identity provider request failed");
            "TRANSPORT_ERROR".to_string()
        })?;

        if !response.status().is_success() {
            let envelope: ApiErrorEnvelope = response.json().await.map_err(|e| {
                tracing::error!(error = %e, endpoint, "Unparseable provider error body");
                "MALFORMED_ERROR_BODY".to_string()
            })?;
            // The provider appends detail after the code, e.g.
            // "WEAK_PASSWORD : Password should be at least 6 characters"
            let code = envelope
                .error
                .message
                .split_whitespace()
                .next()
                .unwrap_or("")
                .to_string();
            return Err(code);
        }

        let credential: ProviderCredential = response.json().await.map_err(|e| {
            tracing::error!(error = %e, endpoint, "Unparseable provider response");
            "MALFORMED_RESPONSE".to_string()
        })?;

        Ok(Identity {
            uid: credential.local_id,
            email: credential.email,
            email_verified: credential.email_verified,
        })
    }
}

/// Successful credential response from the provider.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderCredential {
    local_id: String,
    email: String,
    #[serde(default)]
    email_verified: bool,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}
