//! Bearer token session
//!
//! The session is owned by the [`ApiClient`](super::ApiClient) that uses it,
//! seeded from configuration or from a login, so no process-wide token lookup
//! is involved.

use crate::config::{secret_string, AuthConfig, SecretString};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Access and refresh tokens for the current user
#[derive(Debug, Clone, Default)]
pub struct Session {
    access: Option<SecretString>,
    refresh: Option<SecretString>,
}

impl Session {
    /// Creates an empty (anonymous) session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Seeds a session from pre-issued tokens in configuration
    pub fn from_config(auth: &AuthConfig) -> Self {
        Self {
            access: auth.access_token.clone(),
            refresh: auth.refresh_token.clone(),
        }
    }

    /// Replaces both tokens after a successful login
    pub fn store(&mut self, tokens: TokenPair) {
        self.access = Some(secret_string(tokens.access));
        self.refresh = tokens.refresh.map(secret_string);
    }

    /// Replaces the access token after a refresh, keeping the refresh token
    /// unless the server rotated it
    pub fn store_refreshed(&mut self, tokens: TokenPair) {
        self.access = Some(secret_string(tokens.access));
        if let Some(rotated) = tokens.refresh {
            self.refresh = Some(secret_string(rotated));
        }
    }

    /// `Bearer <token>` when an access token is held
    pub fn bearer(&self) -> Option<String> {
        self.access
            .as_ref()
            .filter(|token| !token.expose_secret().is_blank())
            .map(|token| format!("Bearer {}", token.expose_secret().as_str()))
    }

    pub fn has_access_token(&self) -> bool {
        self.bearer().is_some()
    }

    /// The refresh token, exposed for the refresh request body
    pub fn refresh_token(&self) -> Option<String> {
        self.refresh
            .as_ref()
            .map(|token| token.expose_secret().as_str().to_string())
    }
}

/// Credentials posted to the token endpoint
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body posted to the refresh endpoint
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest {
    pub refresh: String,
}

/// Token endpoint response (`{access, refresh}`)
#[derive(Debug, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}
