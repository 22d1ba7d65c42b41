//! Provides the random `state` value round-tripped through the authorization redirect.
use base64::{Engine, engine::general_purpose::URL_SAFE};
use rand::{TryRngCore, rngs::OsRng};
use tracing::error;

use crate::error::Error;

/// A randomly generated state token created using `OsRng` and Base64URL-encoded.
///
/// A fresh token is generated per login attempt, stored server-side against the
/// session, and compared against the `state` query parameter on callback. This
/// prevents an attacker from forging the authorization redirect.
/// # Example
/// ```rust,no_run
/// use google_login::state_token::StateToken;
///
/// let state = StateToken::new().expect("Failed to generate state token");
/// println!("Generated state: {}", state.value());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateToken(pub(crate) String);

impl StateToken {
    /// Generates a new state token using a secure random generator.
    /// - Uses `OsRng` for cryptographic security.
    /// - Encodes the random bytes in Base64URL format.
    /// - Returns an `Error::GenToken` if the random generation fails.
    pub fn new() -> Result<Self, Error> {
        let mut key = [0u8; 32];
        OsRng.try_fill_bytes(&mut key).map_err(|e| {
            error!("Failed to generate state token: {:?}", e);
            Error::GenToken
        })?;
        Ok(Self(URL_SAFE.encode(key)))
    }
    /// Returns the state token as a string reference.
    pub fn value(&self) -> &str {
        &self.0
    }
}

// ==========Tests==========
#[cfg(test)]
mod tests {
    use super::StateToken;

    #[test]
    fn test_state_token_new() {
        let state = StateToken::new();
        assert!(!state.clone().unwrap().0.is_empty());
    }

    #[test]
    fn test_state_token_unique_per_flow() {
        let a = StateToken::new().unwrap();
        let b = StateToken::new().unwrap();
        assert_ne!(a, b);
    }
}
