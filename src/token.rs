//! Provides the token exchange half of the authorization code flow.
//!
//! This module:
//! - `TokenRequest`: A data structure for sending the `authorization_code`
//!   grant to the token endpoint.
//! - `TokenResponse`: A data structure for parsing the token endpoint's
//!   response.
//! - `AccessToken` / `RefreshToken`: Credential wrappers stored on the user
//!   record.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{
    code::Code,
    config::{ClientID, ClientSecret, Config, RedirectURI, TokenEndPoint},
};

/// Represents an OAuth 2.0 access token.
/// This token is used to access Google APIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken(pub(crate) String);

impl AccessToken {
    /// Retrieves the access token as a string.
    pub fn value(&self) -> String {
        self.0.clone()
    }
}

/// Represents an OAuth 2.0 refresh token, issued when the consent URL
/// requested offline access. Stored but never exercised here; refreshing is
/// out of scope for this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken(pub(crate) String);

impl RefreshToken {
    /// Returns the refresh token as a String.
    pub fn value(&self) -> String {
        self.0.to_owned()
    }
}

/// A structure used to send the authorization code to Google's token endpoint.
#[derive(Debug, Clone)]
pub struct TokenRequest {
    token_endpoint: TokenEndPoint,
    code: Code,
    client_id: ClientID,
    client_secret: ClientSecret,
    redirect_uri: RedirectURI,
    grant_type: String,
}

impl TokenRequest {
    /// Creates a new request using parameters from `Config` and the verified
    /// callback `Code`.
    pub fn new(config: &Config, code: Code) -> Self {
        Self {
            token_endpoint: config.token_endpoint.to_owned(),
            code,
            client_id: config.client_id.to_owned(),
            client_secret: config.client_secret.to_owned(),
            redirect_uri: config.redirect_uri.to_owned(),
            grant_type: "authorization_code".to_string(),
        }
    }

    pub fn token_endpoint(&self) -> &str {
        &self.token_endpoint.0
    }

    pub fn code(&self) -> &str {
        &self.code.0
    }

    pub fn client_id(&self) -> &str {
        &self.client_id.0
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret.0
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri.0
    }

    pub fn grant_type(&self) -> &str {
        &self.grant_type
    }
}

/// Represents the response from Google's token endpoint for the
/// `authorization_code` grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
    expires_in: u64,
    token_type: String,
    scope: Option<String>,
}

impl TokenResponse {
    /// Retrieves the issued access token.
    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
    /// Retrieves the refresh token, present when offline access was requested
    /// and this is the first consent for the client.
    pub fn refresh_token(&self) -> Option<&RefreshToken> {
        self.refresh_token.as_ref()
    }
    /// Returns the lifetime (in seconds) of the access token.
    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }
    /// Retrieves the token type (typically "Bearer").
    pub fn token_type(&self) -> &str {
        &self.token_type
    }
    /// Retrieves the granted scopes, when the endpoint reports them.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }
    /// Converts `expires_in` into an absolute expiry timestamp (UNIX seconds).
    /// Saturates instead of overflowing on an absurd `expires_in`.
    pub fn expiry(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        now.checked_add(self.expires_in).unwrap_or(u64::MAX)
    }
}
