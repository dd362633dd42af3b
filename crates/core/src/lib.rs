//! Shared building blocks for the workshop back office.
//!
//! This crate contains **pure** primitives (no HTTP, no storage): the domain
//! error model, identifiers assigned by the remote store, and the lenient
//! numeric decoding every API payload goes through.

pub mod error;
pub mod id;
pub mod numeric;

pub use error::{DomainError, DomainResult};
pub use id::{ComponentId, PillowId, SaleId};
pub use numeric::{ensure_non_negative, lenient_f64, or_zero};
