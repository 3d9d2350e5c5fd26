use storage::validation::FieldErrors;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Rejected locally; no request was sent.
    #[error("Invalid workout: {0}")]
    Validation(FieldErrors),

    #[error("API error ({status}): {}", .messages.join("; "))]
    Api { status: u16, messages: Vec<String> },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
