use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error("http status {status}")]
    HttpStatus { status: u16, error: Option<String> },
    /// Ok response without a job id.
    #[error("response without job id")]
    MissingJobId { status: u16, error: Option<String> },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Error text reported by the server in the response body.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            BackendError::HttpStatus { error, .. } | BackendError::MissingJobId { error, .. } => {
                error.as_deref()
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::HttpStatus { status, .. } | BackendError::MissingJobId { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return BackendError::Decode(err.to_string());
    }
    BackendError::Network(err.to_string())
}
