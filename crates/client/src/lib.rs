//! `atelier-client`
//!
//! **Responsibility:** talk to the remote order/catalog API.
//!
//! The API is the authority for every record; this crate only fetches,
//! submits and deletes. Writes take an explicit [`atelier_auth::Session`].

pub mod api;
pub mod config;
pub mod error;
pub mod snapshot;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use snapshot::Snapshot;
