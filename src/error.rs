use thiserror::Error;

/// Toast fallback for failed list/detail reads
pub const FETCH_FALLBACK: &str = "Unable to fetch!";

/// Toast fallback for failed state-changing requests
pub const UPDATE_FALLBACK: &str = "Unable to update!";

#[derive(Error, Debug)]
pub enum CentreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("not logged in. Run: command-centre login --email <email>")]
    NotLoggedIn,

    #[error("session expired or unauthorized. Run: command-centre login --email <email>")]
    Unauthorized,

    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("'{0}' not found")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl CentreError {
    /// Text to show the user for a failed operation.
    ///
    /// Application-level rejections carry the server's own message; every
    /// other failure collapses to the call site's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            CentreError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether the failure happened before the server could answer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CentreError::Transport(_) | CentreError::Timeout { .. } | CentreError::Http(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CentreError>;
