//! Provides the profile fetch against Google's userinfo endpoint.
//!
//! This module:
//! - `UserInfoRequest`: A data structure for requesting profile claims with an
//!   access token.
//! - `UserInfo`: The decoded profile fields this service cares about.

use serde::{Deserialize, Serialize};

use crate::{config::Config, token::AccessToken};

/// Represents a request to the userinfo endpoint, authorized by the access
/// token obtained from the token exchange.
#[derive(Debug, Clone)]
pub struct UserInfoRequest {
    userinfo_endpoint: String,
    access_token: AccessToken,
}

impl UserInfoRequest {
    /// Creates a new request using the endpoint from `Config` and the freshly
    /// issued access token.
    pub fn new(config: &Config, access_token: &AccessToken) -> Self {
        Self {
            userinfo_endpoint: config.userinfo_endpoint.0.to_owned(),
            access_token: access_token.to_owned(),
        }
    }

    pub fn userinfo_endpoint(&self) -> &str {
        &self.userinfo_endpoint
    }

    pub fn access_token(&self) -> &str {
        &self.access_token.0
    }
}

/// Profile claims returned by the userinfo endpoint. The endpoint returns
/// more fields (id, picture, locale); only name and email are decoded here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}
