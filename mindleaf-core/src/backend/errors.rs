use thiserror::Error;

/// Failure talking to a persistence backend. Every variant is recoverable:
/// the caller keeps what it had and the user may try again.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never completed (network down, connection refused).
    #[error("could not reach the server: {0}")]
    Transport(String),

    /// The server answered with an error status.
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    /// The server or file answered with something that is not the expected JSON.
    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid user id '{0}'")]
    InvalidUser(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            BackendError::Decode(error.to_string())
        } else {
            BackendError::Transport(error.to_string())
        }
    }
}
