//! CLI configuration and the stored session file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result, anyhow};

use atelier_auth::Session;
use atelier_client::ClientConfig;
use atelier_sales::PricingPolicy;

const SESSION_FILE: &str = "session.json";

/// Settings resolved from flags, environment and `.env`.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_url: Option<String>,
    pub session_path: PathBuf,
    pub pricing: PricingPolicy,
    pub timeout: Option<Duration>,
}

impl CliConfig {
    pub fn resolve(
        api_url: Option<String>,
        session_path: Option<PathBuf>,
        pricing: PricingPolicy,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let session_path = match session_path {
            Some(path) => path,
            None => default_session_path()?,
        };
        Ok(Self {
            api_url: api_url.filter(|url| !url.trim().is_empty()),
            session_path,
            pricing,
            timeout: timeout_secs.map(Duration::from_secs),
        })
    }

    /// Connection settings; fails when no API url was given.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let url = self
            .api_url
            .as_deref()
            .ok_or_else(|| anyhow!("no API url configured (use --api-url or ATELIER_API_URL)"))?;
        let mut config = ClientConfig::new(url)?;
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(config)
    }

    pub fn load_session(&self) -> Result<Session> {
        load_session(&self.session_path)
    }

    pub fn save_session(&self, session: &Session) -> Result<()> {
        save_session(&self.session_path, session)
    }

    /// Remove the stored session. Returns `false` when there was none.
    pub fn clear_session(&self) -> Result<bool> {
        if !self.session_path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.session_path).with_context(|| {
            format!("Failed to remove session file {}", self.session_path.display())
        })?;
        Ok(true)
    }
}

fn default_session_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        anyhow!("cannot locate the user config directory; pass --session explicitly")
    })?;
    Ok(dir.join("atelier").join(SESSION_FILE))
}

fn load_session(path: &Path) -> Result<Session> {
    let content = fs::read_to_string(path).with_context(|| {
        format!(
            "No session at {} (run `atelier session set` first)",
            path.display()
        )
    })?;
    Ok(Session::from_json(&content)?)
}

fn save_session(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, session.to_json()?)
        .with_context(|| format!("Failed to write session file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "session stored");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_auth::Role;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("atelier-cli-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn session_round_trips_through_file() {
        let dir = scratch_dir("session");
        let config = CliConfig::resolve(
            None,
            Some(dir.join("nested").join(SESSION_FILE)),
            PricingPolicy::Legacy,
            None,
        )
        .unwrap();

        let session = Session::new("Owner", Role::ADMIN, "tok").unwrap();
        config.save_session(&session).unwrap();
        assert_eq!(config.load_session().unwrap(), session);

        assert!(config.clear_session().unwrap());
        assert!(!config.clear_session().unwrap());
        assert!(config.load_session().is_err());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_api_url_is_reported() {
        let config = CliConfig::resolve(
            Some("  ".into()),
            Some(PathBuf::from("unused.json")),
            PricingPolicy::Legacy,
            None,
        )
        .unwrap();
        assert!(config.client_config().is_err());
    }

    #[test]
    fn timeout_is_applied() {
        let config = CliConfig::resolve(
            Some("http://localhost:5000".into()),
            Some(PathBuf::from("unused.json")),
            PricingPolicy::Multiplied,
            Some(3),
        )
        .unwrap();
        assert_eq!(config.client_config().unwrap().timeout, Duration::from_secs(3));
    }
}
