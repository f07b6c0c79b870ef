/// Application-level errors
///
/// Every failure mode of the remote API surfaces here; callers turn these
/// into user-facing messages and nothing panics across this boundary.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// No authenticated subject - the request was never dispatched.
    #[error("No credential available; log in first")]
    MissingCredential,

    /// Network / connection level failure from the HTTP client.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Server returned status {status}: {message}")]
    Server { status: u16, message: String },

    /// The body parsed as JSON but did not carry the expected fields.
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// User-readable message suitable for inline display next to
    /// already-rendered content.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::MissingCredential => "Log in to see recommendations".to_string(),
            ApiError::Transport(_) => "Network error, please try again".to_string(),
            ApiError::Server { status, .. } => format!("Server error ({})", status),
            ApiError::InvalidResponse(_) => "Unexpected response from server".to_string(),
            ApiError::InvalidInput(msg) => msg.clone(),
        }
    }

    /// True when retrying the same request might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
