use std::time::Duration;

use crate::error::ClientError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// `base_url` must be an absolute http(s) URL; a trailing slash is dropped.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let raw = base_url.into();
        let parsed = reqwest::Url::parse(raw.trim())
            .map_err(|e| ClientError::Config(format!("invalid API url '{raw}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "API url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        Ok(Self {
            base_url: raw.trim().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
