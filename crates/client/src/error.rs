use atelier_auth::AuthzError;
use atelier_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    /// Rejected by the API (401/403) or denied locally by the session's role.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error(transparent)]
    InvalidInput(#[from] DomainError),
}

impl From<AuthzError> for ClientError {
    fn from(value: AuthzError) -> Self {
        ClientError::Unauthorized(value.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            ClientError::Decode(value.to_string())
        } else {
            ClientError::Network(value.to_string())
        }
    }
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}
