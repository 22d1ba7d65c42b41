//! Minimal "Login with Google" web service using the OAuth2 authorization
//! code flow.
//!
//! The service is three HTTP handlers: a landing page, a login initiator that
//! redirects to Google's consent page, and a callback that exchanges the
//! authorization code for tokens and fetches basic profile fields.
//! [google document](https://developers.google.com/identity/protocols/oauth2/web-server)
//! # Feature
//! - Generate a per-flow state token
//! - Generate the consent request URL (code) for Google
//! - Verify the state and exchange the code for tokens (using reqwest)
//! - Fetch the user's name and email from the userinfo endpoint
//! - Keep authenticated users in an in-process session store
//! # Caution
//! - Sessions live in memory only and are lost at process exit.
//! - Refreshing and revoking tokens are out of scope; the refresh token is
//!   stored but never exercised.
pub mod code;
pub mod config;
pub mod error;
pub mod executer;
pub mod handlers;
pub mod session;
pub mod state_token;
pub mod token;
pub mod user_info;
