use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role identifier as stored on the user record (e.g. `"admin"`).
///
/// Roles are opaque strings; only `admin` carries special meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        self.as_str().eq_ignore_ascii_case("admin")
    }

    /// Permissions granted by this role.
    ///
    /// Admins hold the wildcard; every other role may record sales and
    /// maintain finished goods.
    pub fn permissions(&self) -> Vec<Permission> {
        if self.is_admin() {
            vec![Permission::wildcard()]
        } else {
            vec![Permission::SALES_CREATE, Permission::CATALOG_WRITE]
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_is_case_insensitive() {
        assert!(Role::new("Admin").is_admin());
        assert!(Role::ADMIN.is_admin());
        assert!(!Role::new("seller").is_admin());
    }

    #[test]
    fn staff_cannot_delete_sales() {
        let perms = Role::new("seller").permissions();
        assert!(perms.contains(&Permission::SALES_CREATE));
        assert!(!perms.contains(&Permission::SALES_DELETE));
    }

    #[test]
    fn stored_role_names_decode_as_admin_or_staff() {
        let admin: Role = serde_json::from_str(r#""ADMIN""#).unwrap();
        assert!(admin.is_admin());
        assert_eq!(admin.permissions(), vec![Permission::wildcard()]);

        let staff: Role = serde_json::from_str(r#""tailor""#).unwrap();
        assert!(!staff.is_admin());
        assert_eq!(staff.as_str(), "tailor");
        assert_eq!(
            staff.permissions(),
            vec![Permission::SALES_CREATE, Permission::CATALOG_WRITE]
        );
    }
}
