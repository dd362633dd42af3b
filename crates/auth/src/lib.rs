//! Explicit session and role checks.
//!
//! The logged-in user is a value passed to every operation that needs a bearer
//! token or a role check; nothing here reads ambient state. This crate is
//! decoupled from HTTP and storage.

pub mod authorize;
pub mod permissions;
pub mod roles;
pub mod session;

pub use authorize::{AuthzError, authorize};
pub use permissions::Permission;
pub use roles::Role;
pub use session::Session;
