//! Defines structures and builders related to the provider configuration.
//!
//! Provides a structured way to handle the credentials, endpoints and scopes
//! required for the authorization redirect, token exchange and profile fetch.
//!
//! ## Structures
//! - `Config`: Stores all the necessary provider information.
//! - `ConfigBuilder`: A builder for constructing a `Config` instance.
//!
//! # Example
//! ```rust,no_run
//! use google_login::{code::Scope, config::Config};
//!
//! let config = Config::builder()
//!     .auth_endpoint("https://accounts.google.com/o/oauth2/auth")
//!     .client_id("your-client-id")
//!     .client_secret("your-client-secret")
//!     .token_endpoint("https://oauth2.googleapis.com/token")
//!     .userinfo_endpoint("https://www.googleapis.com/oauth2/v2/userinfo")
//!     .redirect_uri("http://localhost:8080/oauth2/callback")
//!     .scopes(&[Scope::Email, Scope::Profile])
//!     .build();
//! ```

use crate::code::Scope;

// Google's well-known endpoints, mirrored in the Cloud Console client settings.
pub(crate) static GOOGLE_AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/auth";
pub(crate) static GOOGLE_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
pub(crate) static GOOGLE_USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Debug, Clone, Default)]
pub(crate) struct AuthEndPoint(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClientID(pub String);

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ClientSecret(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct TokenEndPoint(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct UserInfoEndPoint(pub String);

#[derive(Debug, Clone, Default)]
pub(crate) struct RedirectURI(pub String);

/// Holds all provider information required for the authorization code flow.
///
/// It is designed to be immutable once constructed.
///
/// # Fields
/// - `auth_endpoint`: The authorization endpoint URL.
/// - `client_id`: The client ID obtained from Google Cloud Console.
/// - `client_secret`: The client secret linked to the client ID.
/// - `token_endpoint`: The token exchange endpoint URL.
/// - `userinfo_endpoint`: The profile endpoint URL.
/// - `redirect_uri`: The redirect URI registered in Google Cloud Console.
/// - `scopes`: The profile scopes requested on login.
///
/// This struct is primarily built using the `ConfigBuilder`, or from the
/// process environment with [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) auth_endpoint: AuthEndPoint,
    pub(crate) client_id: ClientID,
    pub(crate) client_secret: ClientSecret,
    pub(crate) token_endpoint: TokenEndPoint,
    pub(crate) userinfo_endpoint: UserInfoEndPoint,
    pub(crate) redirect_uri: RedirectURI,
    pub(crate) scopes: Vec<Scope>,
}

// ==========impl Config==========
impl Config {
    /// Returns a new `ConfigBuilder` instance to create a `Config` object.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Builds a `Config` from `CLIENT_ID` and `CLIENT_SECRET` in the process
    /// environment, with Google's well-known endpoints, the two read-only
    /// profile scopes and a redirect URI of
    /// `http://localhost:<port>/oauth2/callback`.
    ///
    /// Missing environment values yield empty credentials rather than an
    /// error; the failure surfaces later, at token exchange.
    pub fn from_env(port: &str) -> Self {
        Config::builder()
            .auth_endpoint(GOOGLE_AUTH_ENDPOINT)
            .client_id(&std::env::var("CLIENT_ID").unwrap_or_default())
            .client_secret(&std::env::var("CLIENT_SECRET").unwrap_or_default())
            .token_endpoint(GOOGLE_TOKEN_ENDPOINT)
            .userinfo_endpoint(GOOGLE_USERINFO_ENDPOINT)
            .redirect_uri(&format!("http://localhost:{}/oauth2/callback", port))
            .scopes(&[Scope::Email, Scope::Profile])
            .build()
    }
}

/// Provides a convenient way to create a `Config` instance step by step.
/// This ensures that all required fields are set before the `Config`
/// object is constructed.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    auth_endpoint: AuthEndPoint,
    client_id: ClientID,
    client_secret: ClientSecret,
    token_endpoint: TokenEndPoint,
    userinfo_endpoint: UserInfoEndPoint,
    redirect_uri: RedirectURI,
    scopes: Vec<Scope>,
}

// ==========impl ConfigBuilder==========
impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` instance with default values.
    pub fn new() -> Self {
        ConfigBuilder::default()
    }

    /// Sets the authorization endpoint URL.
    pub fn auth_endpoint(mut self, auth_endpoint: &str) -> ConfigBuilder {
        self.auth_endpoint = AuthEndPoint(auth_endpoint.to_string());
        self
    }

    /// Constructs a `Config` instance with the provided values.
    pub fn build(self) -> Config {
        Config {
            auth_endpoint: self.auth_endpoint,
            client_id: self.client_id,
            client_secret: self.client_secret,
            token_endpoint: self.token_endpoint,
            userinfo_endpoint: self.userinfo_endpoint,
            redirect_uri: self.redirect_uri,
            scopes: self.scopes,
        }
    }

    /// Sets the client ID obtained from Google Cloud Console.
    pub fn client_id(mut self, client_id: &str) -> Self {
        self.client_id = ClientID(client_id.to_string());
        self
    }

    /// Sets the client secret associated with the client ID.
    pub fn client_secret(mut self, client_secret: &str) -> Self {
        self.client_secret = ClientSecret(client_secret.to_string());
        self
    }

    /// Sets the token exchange endpoint URL.
    pub fn token_endpoint(mut self, token_endpoint: &str) -> Self {
        self.token_endpoint = TokenEndPoint(token_endpoint.to_string());
        self
    }

    /// Sets the profile (userinfo) endpoint URL.
    pub fn userinfo_endpoint(mut self, userinfo_endpoint: &str) -> Self {
        self.userinfo_endpoint = UserInfoEndPoint(userinfo_endpoint.to_string());
        self
    }

    /// Sets the redirect URI registered in Google Cloud Console.
    pub fn redirect_uri(mut self, redirect_url: &str) -> Self {
        self.redirect_uri = RedirectURI(redirect_url.to_string());
        self
    }

    /// Sets the scopes requested on login.
    pub fn scopes(mut self, scopes: &[Scope]) -> Self {
        self.scopes = scopes.to_vec();
        self
    }
}
