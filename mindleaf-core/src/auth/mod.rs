//! Who is writing. Entries are keyed by the signed-in user's id.

mod firebase;

pub use firebase::FirebaseAuth;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Rejected by the identity provider; the message is the provider's own.
    #[error("{0}")]
    Provider(String),

    #[error("could not reach the identity provider: {0}")]
    Transport(String),

    #[error("{0}")]
    Unsupported(&'static str),

    #[error("no firebase_api_key configured")]
    MissingApiKey,

    #[error("unexpected response from the identity provider: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for AuthError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            AuthError::Decode(error.to_string())
        } else {
            AuthError::Transport(error.to_string())
        }
    }
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    fn current_user(&self) -> Option<User>;

    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn login_with_google(&self) -> Result<User, AuthError>;

    async fn signup(&self, email: &str, password: &str) -> Result<User, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;
}

/// The id entries are stored under: the signed-in user's, else `fallback`.
pub fn effective_user_id(user: Option<&User>, fallback: &str) -> String {
    user.map(|u| u.uid.clone())
        .unwrap_or_else(|| fallback.to_string())
}
