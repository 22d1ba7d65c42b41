//! Provides an asynchronous execution framework for sending HTTP requests to Google.
//!
//! This module:
//! - Defines the Executer trait, which provides a unified interface for making HTTP requests.
//! - Implements executers for the token exchange and the userinfo fetch.

use std::{collections::HashMap, error::Error, pin::Pin, time::Duration};

use crate::{
    token::{TokenRequest, TokenResponse},
    user_info::{UserInfo, UserInfoRequest},
};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::error;

// Upper bound on each outbound call; Google answering slower than this aborts
// the flow instead of pinning the handler task.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// generic asynchronous execution interface for sending HTTP requests.
/// Key Components:
/// - Req: The request type that the executer will handle.
/// - Response: The expected response type.
/// - Error: The error type that will be returned on failure.
/// - Future: The asynchronous execution result, returning either Response or Error
pub trait Executer<'a, Req>
where
    Req: Send,
{
    type Response;
    type Error: Error;
    type Future: Future<Output = Result<Self::Response, Self::Error>> + Send + 'a;

    fn execute(&'a self, req: &'a Req) -> Self::Future;
}

/// Defines possible errors that can occur during request execution.
#[derive(Debug, Clone, Error)]
pub enum ExecuteError {
    #[error("Failed to build http client")]
    Client,
    #[error("Failed to parse data")]
    Parse,
    #[error("Failed to send request")]
    Send,
    #[error("Failed to parse url")]
    URL,
}

fn client() -> Result<Client, ExecuteError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| {
            error!("Failed to build http client: {:?}", e);
            ExecuteError::Client
        })
}

/// Handles the authorization-code exchange at the token endpoint.
pub struct TokenExe;

/// Request Workflow
/// 1. Parse the token endpoint URL.
/// 2. Prepare the form parameters for the `authorization_code` grant.
/// 3. Send an HTTP POST request.
/// 4. Parse and return the response as TokenResponse.
impl<'a> Executer<'a, TokenRequest> for TokenExe {
    type Response = TokenResponse;
    type Error = ExecuteError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a TokenRequest) -> Self::Future {
        Box::pin(async move {
            let url = Url::parse(req.token_endpoint()).map_err(|e| {
                error!("Failed to parse url: {:?}", e);
                ExecuteError::URL
            })?;

            let mut params = HashMap::new();
            params.insert("code", req.code());
            params.insert("client_id", req.client_id());
            params.insert("client_secret", req.client_secret());
            params.insert("redirect_uri", req.redirect_uri());
            params.insert("grant_type", req.grant_type());

            let res = client()?
                .post(url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .form(&params)
                .send()
                .await
                .map_err(|e| {
                    error!("Failed to send request: {:?}", e);
                    ExecuteError::Send
                })?;
            let res_json = res.json::<TokenResponse>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                ExecuteError::Parse
            })?;
            Ok(res_json)
        })
    }
}

/// Handles the profile fetch against the userinfo endpoint.
pub struct UserInfoExe;

/// Request Workflow
/// 1. Parse the userinfo endpoint URL and attach the access token.
/// 2. Send an HTTP GET request.
/// 3. Parse and return the response as UserInfo.
impl<'a> Executer<'a, UserInfoRequest> for UserInfoExe {
    type Response = UserInfo;
    type Error = ExecuteError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'a>>;

    fn execute(&'a self, req: &'a UserInfoRequest) -> Self::Future {
        Box::pin(async move {
            let mut url = Url::parse(req.userinfo_endpoint()).map_err(|e| {
                error!("Failed to parse url: {:?}", e);
                ExecuteError::URL
            })?;
            url.query_pairs_mut()
                .append_pair("access_token", req.access_token());

            let res = client()?.get(url).send().await.map_err(|e| {
                error!("Failed to send request: {:?}", e);
                ExecuteError::Send
            })?;
            let res_json = res.json::<UserInfo>().await.map_err(|e| {
                error!("Failed to parse JSON: {:?}", e);
                ExecuteError::Parse
            })?;
            Ok(res_json)
        })
    }
}
