use std::fmt;

/// Fallback message for a failed create when the server sent no body.
pub const CREATE_FAILED: &str = "Failed to create game";

/// Errors returned by the catalog API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Health check failed (non-2xx status or transport failure)
    Connectivity(String),
    /// Game list could not be retrieved
    Fetch(String),
    /// Game creation failed; carries the server's response body when it sent one
    Create(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connectivity(msg) => write!(f, "Backend is not responding: {msg}"),
            Self::Fetch(msg) => write!(f, "Failed to fetch games: {msg}"),
            Self::Create(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Why a draft submission did not produce a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Draft failed validation; no request was sent
    Rejected(String),
    /// The create request failed
    Failed(ClientError),
}

impl SubmitError {
    /// Message shown to the user as a blocking alert.
    #[must_use]
    pub fn alert(&self) -> &str {
        match self {
            Self::Rejected(msg) => msg,
            Self::Failed(_) => CREATE_FAILED,
        }
    }
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(msg) => write!(f, "Validation error: {msg}"),
            Self::Failed(err) => write!(f, "Create failed: {err}"),
        }
    }
}

impl std::error::Error for SubmitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(_) => None,
            Self::Failed(err) => Some(err),
        }
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        Self::Failed(err)
    }
}
