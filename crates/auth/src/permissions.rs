use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Named write capability checked before a request leaves the client.
///
/// `"*"` grants all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// Record a new sale (`POST /sale`).
    pub const SALES_CREATE: Permission = Permission(Cow::Borrowed("sales.create"));
    /// Remove a recorded sale (`DELETE /sale`).
    pub const SALES_DELETE: Permission = Permission(Cow::Borrowed("sales.delete"));
    /// Create or update finished goods (`POST /pillow`).
    pub const CATALOG_WRITE: Permission = Permission(Cow::Borrowed("catalog.write"));

    pub fn wildcard() -> Self {
        Self(Cow::Borrowed("*"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
