//! HTTP handlers for the three-step login flow.
//!
//! Routing:
//! - `/`: landing page naming the provider
//! - `/login`: starts a flow and redirects to Google's consent page
//! - `/oauth2/callback`: the redirect URI registered in Google Cloud Console
//!
//! Each callback step short-circuits with a plain-text response on failure;
//! nothing past a failed step runs, so a user record is only ever stored
//! fully populated.

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use axum_extra::extract::{CookieJar, cookie::Cookie};
use http::StatusCode;
use tracing::{error, info};

use crate::{
    code::{AuthCodeRequest, CallbackParams},
    config::Config,
    executer::{Executer, TokenExe, UserInfoExe},
    session::{SessionStore, UserRecord},
    state_token::StateToken,
    token::TokenRequest,
    user_info::UserInfoRequest,
};

static SESSION_COOKIE: &str = "session_id";
static PROVIDER: &str = "Google";
// Compiled in: no runtime template parse, so no parse error to leak.
static INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Application state shared by every handler task.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sessions: SessionStore::new(),
        }
    }
}

/// Builds the application router over the shared state.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login))
        .route("/oauth2/callback", get(callback))
        .with_state(app_state)
}

/// `GET /`: renders the landing page naming the provider.
async fn index() -> Html<String> {
    Html(INDEX_TEMPLATE.replace("{{provider}}", PROVIDER))
}

/// `GET /login`: generates a per-flow state token, remembers it under a fresh
/// session id carried in a cookie, and answers 303 to Google's consent URL.
async fn login(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<impl IntoResponse, StatusCode> {
    // Fresh state token for each login attempt
    let state = StateToken::new().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    // Stored server-side, keyed by the cookie value, until the callback
    let session_id = app_state.sessions.begin_login(state.clone());
    let cookie = Cookie::new(SESSION_COOKIE, session_id.value().to_string());

    // access_type=true requests offline access so the exchange also yields a
    // refresh token
    let req = AuthCodeRequest::new(true, &app_state.config, &state);
    let url = req
        .into_url()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    // redirect to google login page
    Ok((jar.add(cookie), Redirect::to(url.as_str())))
}

/// `GET /oauth2/callback`: validates state, detects user denial, exchanges
/// the code for tokens, fetches the profile and stores the user record.
async fn callback(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    // state: compare against the value stored at /login for this session.
    // A missing cookie or unknown session fails the same way as a bad state.
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return (StatusCode::BAD_REQUEST, "states don't match\n").into_response();
    };
    let session_id = cookie.value();
    match app_state
        .sessions
        .take_pending(session_id)
        .map(|expected| params.verify_state(&expected))
    {
        Some(Ok(())) => {}
        _ => return (StatusCode::BAD_REQUEST, "states don't match\n").into_response(),
    }

    // user denied the auth
    if let Some(denied) = params.provider_error() {
        return (StatusCode::OK, denied.to_string()).into_response();
    }

    // code
    let code = match params.code() {
        Ok(code) => code,
        Err(e) => {
            error!("Callback without code: {}", e);
            return (StatusCode::BAD_REQUEST, "missing code parameter\n").into_response();
        }
    };

    // exchange code for tokens
    let token_req = TokenRequest::new(&app_state.config, code);
    let token_res = match TokenExe.execute(&token_req).await {
        Ok(res) => res,
        Err(e) => {
            error!("Token exchange failed: {}", e);
            return (StatusCode::BAD_GATEWAY, "code - token exchange failed\n").into_response();
        }
    };
    let mut record = UserRecord::from_token_response(&token_res);

    // get user info from google api
    let info_req = UserInfoRequest::new(&app_state.config, token_res.access_token());
    let info = match UserInfoExe.execute(&info_req).await {
        Ok(info) => info,
        Err(e) => {
            error!("User data fetch failed: {}", e);
            return (StatusCode::BAD_GATEWAY, "user data fetch failed\n").into_response();
        }
    };
    record.merge_profile(info);

    info!("login successful: {} - {}", record.name, record.email);
    let body = format!("Login successful: {} - {}\n", record.name, record.email);
    app_state.sessions.store_user(session_id, record);

    (StatusCode::OK, body).into_response()
}
