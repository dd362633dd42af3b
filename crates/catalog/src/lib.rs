//! Catalog module.
//!
//! Priced components (items, materials, cases, services) and finished goods
//! ("pillows") as fetched from the remote store. Pure data and validation; the
//! HTTP side lives in `atelier-client`.

pub mod component;
pub mod pillow;

pub use component::{Catalog, ComponentKind, PricedComponent};
pub use pillow::{Pillow, PillowDraft};
