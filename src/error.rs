use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("states don't match")]
    StateMismatch,
    #[error("Missing code parameter")]
    MissingCode,
    #[error("Failed to generate state token")]
    GenToken,
    #[error("Failed to parse url")]
    URL,
}
