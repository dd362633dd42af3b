//! Sales domain module.
//!
//! This crate contains the order pricing and aggregation rules, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod cart;
pub mod line;
pub mod period;
pub mod pricing;
pub mod report;
pub mod sale;

pub use cart::{Cart, CartLine, ReadyOrder, SaleDraft};
pub use line::LineItem;
pub use period::{DateRange, ReferenceDate, filter_by_date_range};
pub use pricing::{PricingPolicy, aggregate_total, debt, line_total, orders_total, sum_received};
pub use report::{LineSummary, ReportRow, SaleDetail, SalesReport};
pub use sale::Sale;
