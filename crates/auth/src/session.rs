use serde::{Deserialize, Serialize};

use atelier_core::{DomainError, DomainResult};

use crate::Role;

/// The logged-in user: display name, role and bearer token.
///
/// Built once at startup and handed to each write operation explicitly.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, alias = "username")]
    pub name: String,
    pub role: Role,
    token: String,
}

impl Session {
    pub fn new(name: impl Into<String>, role: Role, token: impl Into<String>) -> DomainResult<Self> {
        let session = Self {
            name: name.into(),
            role,
            token: token.into(),
        };
        session.validate()?;
        Ok(session)
    }

    /// Parse the stored user record (`{ "name", "role", "token" }`).
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let session: Session = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("malformed session record: {e}")))?;
        session.validate()?;
        Ok(session)
    }

    pub fn to_json(&self) -> DomainResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::validation(format!("cannot encode session: {e}")))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value of the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    fn validate(&self) -> DomainResult<()> {
        if self.token.trim().is_empty() {
            return Err(DomainError::validation("session token cannot be empty"));
        }
        if self.role.as_str().trim().is_empty() {
            return Err(DomainError::validation("session role cannot be empty"));
        }
        Ok(())
    }
}

impl core::fmt::Debug for Session {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stored_user_record() {
        let session =
            Session::from_json(r#"{"username":"aruzhan","role":"admin","token":"t0k"}"#).unwrap();
        assert_eq!(session.name, "aruzhan");
        assert!(session.is_admin());
        assert_eq!(session.bearer(), "Bearer t0k");
    }

    #[test]
    fn rejects_missing_or_blank_token() {
        assert!(Session::from_json(r#"{"role":"admin"}"#).is_err());
        assert!(Session::new("x", Role::new("seller"), "  ").is_err());
    }

    #[test]
    fn debug_output_hides_token() {
        let session = Session::new("x", Role::new("seller"), "secret-token").unwrap();
        let printed = format!("{session:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn json_round_trip_keeps_token() {
        let session = Session::new("x", Role::ADMIN, "abc").unwrap();
        let back = Session::from_json(&session.to_json().unwrap()).unwrap();
        assert_eq!(back, session);
    }
}
