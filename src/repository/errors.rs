use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The request never produced a response (connection refused, DNS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("Backend rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if err.is_builder() {
            RepositoryError::Config(err.to_string())
        } else if let Some(status) = err.status() {
            RepositoryError::Rejected {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            RepositoryError::Transport(err.to_string())
        }
    }
}
