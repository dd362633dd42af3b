use thiserror::Error;

use crate::{Permission, Session};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{role}' lacks permission '{permission}'")]
    Forbidden { role: String, permission: String },
}

/// Check that the session's role grants `required`.
///
/// - No IO
/// - No panics
/// - Pure policy check
pub fn authorize(session: &Session, required: &Permission) -> Result<(), AuthzError> {
    let granted = session
        .role
        .permissions()
        .iter()
        .any(|p| p.is_wildcard() || p == required);

    if granted {
        Ok(())
    } else {
        tracing::debug!(
            role = %session.role,
            permission = %required,
            "authorization denied"
        );
        Err(AuthzError::Forbidden {
            role: session.role.to_string(),
            permission: required.to_string(),
        })
    }
}
