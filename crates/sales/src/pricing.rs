//! Order pricing and aggregation.
//!
//! Two formulas are supported and every call names one explicitly:
//!
//! - [`PricingPolicy::Legacy`] reproduces the figures the deployed pages show
//!   for recorded sales: each present component contributes its flat price and
//!   the paired length/weight/quantity is never applied.
//! - [`PricingPolicy::Multiplied`] multiplies each price by its paired
//!   multiplier. The order-entry calculator already prices the cart this way.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use atelier_catalog::ComponentKind;
use atelier_core::{DomainError, DomainResult, or_zero};

use crate::line::LineItem;
use crate::sale::Sale;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingPolicy {
    /// Flat price per present component (multipliers ignored).
    #[default]
    Legacy,
    /// Price times the paired multiplier.
    Multiplied,
}

impl FromStr for PricingPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(PricingPolicy::Legacy),
            "multiplied" => Ok(PricingPolicy::Multiplied),
            other => Err(DomainError::validation(format!(
                "unknown pricing policy '{other}' (expected legacy or multiplied)"
            ))),
        }
    }
}

impl core::fmt::Display for PricingPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PricingPolicy::Legacy => f.write_str("legacy"),
            PricingPolicy::Multiplied => f.write_str("multiplied"),
        }
    }
}

fn slot_contribution(line: &LineItem, kind: ComponentKind, policy: PricingPolicy) -> f64 {
    let Some(component) = line.component(kind) else {
        return 0.0;
    };
    let price = component.price();
    match policy {
        // A zero price falls through to `0 * multiplier`, which is always 0.
        PricingPolicy::Legacy => {
            if price != 0.0 {
                price
            } else {
                0.0
            }
        }
        PricingPolicy::Multiplied => price * line.multiplier(kind),
    }
}

/// Monetary value of one line item.
pub fn line_total(line: &LineItem, policy: PricingPolicy) -> DomainResult<f64> {
    line.validate()?;
    Ok(ComponentKind::ALL
        .iter()
        .map(|kind| slot_contribution(line, *kind, policy))
        .fold(0.0, |acc, v| acc + v))
}

/// Sum of [`line_total`] over `lines`; zero for no lines.
pub fn aggregate_total<'a, I>(lines: I, policy: PricingPolicy) -> DomainResult<f64>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    lines
        .into_iter()
        .try_fold(0.0, |acc, line| line_total(line, policy).map(|t| acc + t))
}

/// Amount collected: sum of `received`, skipping missing and zero values.
pub fn sum_received<'a, I>(sales: I) -> f64
where
    I: IntoIterator<Item = &'a Sale>,
{
    sales
        .into_iter()
        .map(|sale| or_zero(sale.received))
        .fold(0.0, |acc, v| acc + v)
}

/// Sum of the declared (stored) totals.
pub fn orders_total<'a, I>(sales: I) -> f64
where
    I: IntoIterator<Item = &'a Sale>,
{
    sales.into_iter().map(Sale::total).fold(0.0, |acc, v| acc + v)
}

/// `total - received`, not clamped; negative on overpayment.
pub fn debt(sale: &Sale) -> f64 {
    sale.debt()
}
