//! This module handles the process of requesting and validating an
//! authorization code in the OAuth2 authorization code flow.
//!
//! It provides the following key functionalities:
//! - Generating an authorization request URL (`AuthCodeRequest`).
//! - Validating the callback query Google redirects back with
//!   (`CallbackParams`).
//!
//! # Flow
//! 1. Generate a state token (`StateToken`) and include it in the
//!    authorization request.
//! 2. Redirect the user to Google's consent page.
//! 3. After consent, Google redirects back with `state` and `code` (or
//!    `error` if the user denied access), captured as `CallbackParams`.
//! 4. Validate the state with `CallbackParams::verify_state` against the
//!    value stored for the session, then take the `Code` with
//!    `CallbackParams::code`.
//! 5. The `Code` can be exchanged for tokens (see the `token` module).
//!
//! # Notes
//! - Always validate the state token before touching `code`; a mismatch
//!   means the redirect did not originate from a login this server started.
use itertools::Itertools;
use serde::Deserialize;
use tracing::error;
use url::Url;

use crate::{
    config::{AuthEndPoint, ClientID, Config, RedirectURI},
    error::Error,
    state_token::StateToken,
};

/// Scope parameters requested on login.
///
/// Both variants are read-only profile scopes; they control which claims the
/// userinfo endpoint returns for the authenticated user.
///
/// ## `Email`
/// - Requests the user's **email address**.
///
/// ## `Profile`
/// - Requests the user's **name and other basic profile information**.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scope {
    Email,
    Profile,
}

impl Scope {
    /// Returns the scope as the full URL Google expects in the `scope`
    /// query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Email => "https://www.googleapis.com/auth/userinfo.email",
            Scope::Profile => "https://www.googleapis.com/auth/userinfo.profile",
        }
    }
}

/// Represents the value of the `code` query parameter sent by Google.
/// A `Code` is only handed out after the callback's state has been validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Code(pub(crate) String);

impl From<String> for Code {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Generates a URL to initiate the authorization request.
/// # Example
/// ```rust,no_run
/// use google_login::{code::AuthCodeRequest, config::Config, state_token::StateToken};
///
/// let config = Config::from_env("8080");
/// let state = StateToken::new().unwrap();
///
/// let request = AuthCodeRequest::new(true, &config, &state);
/// let url = request.into_url().unwrap();
/// println!("Auth URL: {}", url);
/// ```
#[derive(Debug, Clone)]
pub struct AuthCodeRequest {
    auth_endpoint: AuthEndPoint,
    client_id: ClientID,
    response_type: String,
    scopes: Vec<Scope>,
    redirect_uri: RedirectURI,
    access_type: bool,
    state: StateToken,
}

impl AuthCodeRequest {
    /// # **Parameters**
    ///
    /// - `access_type` (`bool`):
    ///   - `true` → Requests an **offline** access token (includes a refresh token).
    ///   - `false` → Requests an **online** access token (no refresh token).
    ///
    /// - `config` (`&Config`):
    ///   - Contains the `client_id`, `auth_endpoint`, `redirect_uri` and scopes.
    ///
    /// - `state` (`&StateToken`):
    ///   - The per-flow **CSRF protection token**, stored server-side and
    ///     compared on callback.
    pub fn new(access_type: bool, config: &Config, state: &StateToken) -> Self {
        Self {
            auth_endpoint: config.auth_endpoint.to_owned(),
            client_id: config.client_id.to_owned(),
            response_type: "code".to_string(),
            scopes: config.scopes.to_owned(),
            redirect_uri: config.redirect_uri.to_owned(),
            access_type,
            state: state.to_owned(),
        }
    }

    /// Constructs the consent URL with the required query parameters.
    /// Scopes are full URLs, so the query is built through `url::Url` to get
    /// proper percent-encoding.
    pub fn into_url(&self) -> Result<Url, Error> {
        let access_type = if self.access_type {
            "offline"
        } else {
            "online"
        };
        let scope = self.scopes.iter().map(Scope::as_str).unique().join(" ");

        let mut url = Url::parse(&self.auth_endpoint.0).map_err(|e| {
            error!("Failed to parse auth endpoint: {}", e);
            Error::URL
        })?;
        url.query_pairs_mut()
            .append_pair("response_type", &self.response_type)
            .append_pair("client_id", &self.client_id.0)
            .append_pair("scope", &scope)
            .append_pair("access_type", access_type)
            .append_pair("redirect_uri", &self.redirect_uri.0)
            .append_pair("state", self.state.value());
        Ok(url)
    }
}

/// The query parameters Google redirects back with on
/// `/oauth2/callback`. All three are optional on the wire; validation
/// decides what the request actually carries.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackParams {
    state: Option<String>,
    code: Option<String>,
    error: Option<String>,
}

impl CallbackParams {
    pub fn new(state: Option<String>, code: Option<String>, error: Option<String>) -> Self {
        Self { state, code, error }
    }

    /// Checks that the callback's `state` is present and equals the value
    /// stored when the login was initiated. Returns `Error::StateMismatch`
    /// otherwise.
    pub fn verify_state(&self, expected: &StateToken) -> Result<(), Error> {
        match self.state.as_deref() {
            Some(state) if state == expected.value() => Ok(()),
            _ => Err(Error::StateMismatch),
        }
    }

    /// The provider-reported error, if any. Set when the user denied consent
    /// (`access_denied`).
    pub fn provider_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Takes the authorization code. Only call this after `verify_state`.
    pub fn code(&self) -> Result<Code, Error> {
        self.code
            .as_deref()
            .map(|c| Code(c.to_string()))
            .ok_or(Error::MissingCode)
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::{config::ConfigBuilder, error::Error, state_token::StateToken};

    use super::{AuthCodeRequest, CallbackParams, Scope};

    fn test_config() -> crate::config::Config {
        ConfigBuilder::new()
            .auth_endpoint("https://auth.example.com/auth")
            .client_id("my_client_id")
            .client_secret("my_secret")
            .token_endpoint("https://token.example.com")
            .userinfo_endpoint("https://userinfo.example.com")
            .redirect_uri("https://redirect.example.com")
            .scopes(&[Scope::Email, Scope::Profile])
            .build()
    }

    // ==========AuthCodeRequest methods==========
    #[test]
    fn test_auth_code_req_new() {
        let config = test_config();
        let state = StateToken::new().unwrap();

        let req = AuthCodeRequest::new(true, &config, &state);

        assert!(req.access_type);
        assert_eq!(req.auth_endpoint.0, "https://auth.example.com/auth");
        assert_eq!(req.client_id.0, "my_client_id");
        assert_eq!(req.redirect_uri.0, "https://redirect.example.com");
        assert_eq!(req.response_type, "code");
        assert_eq!(req.scopes, vec![Scope::Email, Scope::Profile]);
        assert_eq!(req.state, state);
    }

    #[test]
    fn test_auth_code_req_into_url() {
        let config = test_config();
        let state = StateToken::new().unwrap();

        let req = AuthCodeRequest::new(true, &config, &state);
        let url = req.into_url().unwrap();

        assert_eq!(url.host_str(), Some("auth.example.com"));
        let params: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params.get("response_type"), Some(&"code".to_string()));
        assert_eq!(params.get("client_id"), Some(&"my_client_id".to_string()));
        assert_eq!(params.get("access_type"), Some(&"offline".to_string()));
        assert_eq!(
            params.get("scope"),
            Some(
                &"https://www.googleapis.com/auth/userinfo.email \
                 https://www.googleapis.com/auth/userinfo.profile"
                    .to_string()
            )
        );
        assert_eq!(params.get("state"), Some(&state.value().to_string()));
    }

    #[test]
    fn test_auth_code_req_into_url_online() {
        let config = test_config();
        let state = StateToken::new().unwrap();

        let url = AuthCodeRequest::new(false, &config, &state)
            .into_url()
            .unwrap();
        let params: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(params.get("access_type"), Some(&"online".to_string()));
    }

    #[test]
    fn test_auth_code_req_into_url_scope_duplicate() {
        let config = ConfigBuilder::new()
            .auth_endpoint("https://auth.example.com/auth")
            .client_id("my_client_id")
            .redirect_uri("https://redirect.example.com")
            .scopes(&[Scope::Email, Scope::Profile, Scope::Email])
            .build();
        let state = StateToken::new().unwrap();

        let url = AuthCodeRequest::new(true, &config, &state)
            .into_url()
            .unwrap();
        let params: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(
            params.get("scope"),
            Some(
                &"https://www.googleapis.com/auth/userinfo.email \
                 https://www.googleapis.com/auth/userinfo.profile"
                    .to_string()
            )
        );
    }

    // ==========CallbackParams methods==========
    #[test]
    fn test_callback_verify_state_match() {
        let state = StateToken::new().unwrap();
        let params = CallbackParams::new(
            Some(state.value().to_string()),
            Some("auth_code".to_string()),
            None,
        );

        assert!(params.verify_state(&state).is_ok());
        assert_eq!(params.code().unwrap().0, "auth_code");
    }

    #[test]
    fn test_callback_verify_state_mismatch() {
        let state = StateToken::new().unwrap();
        let params = CallbackParams::new(
            Some("wrong".to_string()),
            Some("auth_code".to_string()),
            None,
        );

        assert!(matches!(
            params.verify_state(&state),
            Err(Error::StateMismatch)
        ));
    }

    #[test]
    fn test_callback_verify_state_missing() {
        let state = StateToken::new().unwrap();
        let params = CallbackParams::new(None, Some("auth_code".to_string()), None);

        assert!(matches!(
            params.verify_state(&state),
            Err(Error::StateMismatch)
        ));
    }

    #[test]
    fn test_callback_provider_error() {
        let state = StateToken::new().unwrap();
        let params = CallbackParams::new(
            Some(state.value().to_string()),
            None,
            Some("access_denied".to_string()),
        );

        assert!(params.verify_state(&state).is_ok());
        assert_eq!(params.provider_error(), Some("access_denied"));
        assert!(matches!(params.code(), Err(Error::MissingCode)));
    }
}
