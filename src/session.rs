//! In-process session storage for login flows and authenticated users.
//!
//! This module:
//! - `UserRecord`: Everything the service remembers about an authenticated
//!   user (profile fields plus the tokens from the exchange).
//! - `SessionStore`: Mutex-guarded maps keyed by a per-browser session id,
//!   replacing a single process-wide user slot so concurrent callbacks cannot
//!   race each other.
//!
//! Sessions live in memory only; everything is gone at process exit. In a
//! production application you will want to store this in a database.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use uuid::Uuid;

use crate::{
    state_token::StateToken,
    token::{AccessToken, RefreshToken, TokenResponse},
    user_info::UserInfo,
};

/// Data held for the most recent successful login of a session. Overwritten
/// wholesale on each successful callback; never explicitly destroyed.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub access_token: AccessToken,
    pub refresh_token: Option<RefreshToken>,
    /// Access-token expiry as UNIX seconds.
    pub expiry: u64,
}

impl UserRecord {
    /// Builds a record from the token exchange; name and email stay empty
    /// until the profile fetch merges them in with [`UserRecord::merge_profile`].
    pub fn from_token_response(res: &TokenResponse) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            access_token: res.access_token().to_owned(),
            refresh_token: res.refresh_token().cloned(),
            expiry: res.expiry(),
        }
    }

    /// Merges the userinfo response into the record.
    pub fn merge_profile(&mut self, info: UserInfo) {
        self.name = info.name;
        self.email = info.email;
    }
}

/// A randomly generated (UUIDv4) identifier carried in the session cookie.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionId(String);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

// Login attempts that never call back are swept after this long, so the
// pending map stays bounded under login spam. A consent flow taking longer
// must start over.
const PENDING_TTL: Duration = Duration::from_secs(600);

/// A login attempt that has been redirected to Google but not called back yet.
#[derive(Debug, Clone)]
struct PendingLogin {
    state: StateToken,
    created: Instant,
}

/// Keyed session storage shared across handler tasks.
///
/// `pending` holds the state token of each login attempt that has been
/// redirected to Google but not called back yet; `users` holds the record of
/// each completed login. Both are behind a `Mutex` because every request runs
/// on its own task.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    pending: Arc<Mutex<HashMap<String, PendingLogin>>>,
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new login attempt: stores the state token under a fresh
    /// session id and returns the id for the cookie. Attempts older than the
    /// ttl are swept on the way in.
    pub fn begin_login(&self, state: StateToken) -> SessionId {
        let session_id = SessionId::new();
        let mut pending = self.pending.lock().unwrap();
        pending.retain(|_, entry| entry.created.elapsed() < PENDING_TTL);
        pending.insert(
            session_id.0.clone(),
            PendingLogin {
                state,
                created: Instant::now(),
            },
        );
        session_id
    }

    /// Removes and returns the pending state token for a session, if the
    /// session actually started a login and the attempt has not expired.
    /// One-shot: a second callback with the same cookie finds nothing and
    /// fails state validation.
    pub fn take_pending(&self, session_id: &str) -> Option<StateToken> {
        self.pending
            .lock()
            .unwrap()
            .remove(session_id)
            .filter(|entry| entry.created.elapsed() < PENDING_TTL)
            .map(|entry| entry.state)
    }

    /// Stores the authenticated user's record for the session, replacing any
    /// previous login.
    pub fn store_user(&self, session_id: &str, record: UserRecord) {
        self.users
            .lock()
            .unwrap()
            .insert(session_id.to_string(), record);
    }

    /// Returns a copy of the session's user record, if the session has
    /// completed a login.
    pub fn user(&self, session_id: &str) -> Option<UserRecord> {
        self.users.lock().unwrap().get(session_id).cloned()
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use crate::{
        state_token::StateToken,
        token::{AccessToken, TokenResponse},
        user_info::UserInfo,
    };

    use super::{SessionStore, UserRecord};

    fn record() -> UserRecord {
        let body = r#"{"access_token":"abc","refresh_token":"def","expires_in":3600,"token_type":"Bearer"}"#;
        let res: TokenResponse = serde_json::from_str(body).unwrap();
        UserRecord::from_token_response(&res)
    }

    #[test]
    fn test_record_from_token_response() {
        let rec = record();

        assert_eq!(rec.access_token, AccessToken("abc".to_string()));
        assert_eq!(rec.refresh_token.as_ref().unwrap().value(), "def");
        assert!(rec.expiry > 0);
        assert!(rec.name.is_empty());
        assert!(rec.email.is_empty());
    }

    #[test]
    fn test_record_merge_profile() {
        let mut rec = record();
        rec.merge_profile(UserInfo {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
        });

        assert_eq!(rec.name, "Jane Doe");
        assert_eq!(rec.email, "jane@example.com");
        assert_eq!(rec.access_token, AccessToken("abc".to_string()));
    }

    #[test]
    fn test_pending_is_one_shot() {
        let store = SessionStore::new();
        let state = StateToken::new().unwrap();

        let session_id = store.begin_login(state.clone());
        assert_eq!(store.take_pending(session_id.value()), Some(state));
        assert_eq!(store.take_pending(session_id.value()), None);
    }

    #[test]
    fn test_stale_pending_logins_expire_and_are_swept() {
        let store = SessionStore::new();
        let stale = store.begin_login(StateToken::new().unwrap());

        // Age the attempt past the ttl
        {
            let mut pending = store.pending.lock().unwrap();
            let entry = pending.get_mut(stale.value()).unwrap();
            entry.created = std::time::Instant::now()
                .checked_sub(super::PENDING_TTL * 2)
                .unwrap();
        }

        // A new attempt sweeps the stale one; both ways of reaching it fail
        let fresh = store.begin_login(StateToken::new().unwrap());
        assert!(store.take_pending(stale.value()).is_none());
        assert!(store.take_pending(fresh.value()).is_some());
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new();
        let first = store.begin_login(StateToken::new().unwrap());
        let second = store.begin_login(StateToken::new().unwrap());
        assert_ne!(first, second);

        store.store_user(first.value(), record());
        assert!(store.user(first.value()).is_some());
        assert!(store.user(second.value()).is_none());
    }

    #[test]
    fn test_store_user_replaces_previous_login() {
        let store = SessionStore::new();
        let session_id = store.begin_login(StateToken::new().unwrap());

        let mut rec = record();
        rec.merge_profile(UserInfo {
            name: "First".to_string(),
            email: "first@example.com".to_string(),
        });
        store.store_user(session_id.value(), rec);

        let mut rec = record();
        rec.merge_profile(UserInfo {
            name: "Second".to_string(),
            email: "second@example.com".to_string(),
        });
        store.store_user(session_id.value(), rec);

        assert_eq!(store.user(session_id.value()).unwrap().name, "Second");
    }
}
