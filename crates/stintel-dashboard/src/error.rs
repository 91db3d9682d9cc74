use stintel_client::ClientError;
use thiserror::Error;

/// Error shown inline by a single dashboard component.
///
/// Never propagates to sibling components: a failed panel leaves the
/// profile, the tables and the other panel untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// Blank search input; raised locally, no request issued.
    #[error("Please enter a company name")]
    Validation,

    /// The backend answered but refused, either with its own message or
    /// with a bare non-2xx status (then the component's fallback message).
    #[error("{0}")]
    Backend(String),

    /// Network failure, timeout or malformed body; always the fallback message.
    #[error("{0}")]
    Transport(String),
}

impl ComponentError {
    /// Maps a client failure onto the message a component displays.
    #[must_use]
    pub fn from_client(err: &ClientError, fallback: &str) -> Self {
        match err {
            ClientError::Api { message, .. } => Self::Backend(message.clone()),
            ClientError::UnexpectedStatus { .. } => Self::Backend(fallback.to_owned()),
            ClientError::Http(_)
            | ClientError::Deserialize { .. }
            | ClientError::InvalidBaseUrl { .. } => Self::Transport(fallback.to_owned()),
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}
