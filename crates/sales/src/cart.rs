//! Order entry: an immutable cart and the sale it turns into.
//!
//! Every operation returns a new [`Cart`]; the original is never touched.

use serde::{Deserialize, Serialize};

use atelier_catalog::Pillow;
use atelier_core::{DomainError, DomainResult, ensure_non_negative};

use crate::line::LineItem;
use crate::pricing::{PricingPolicy, line_total};

/// Finished goods sold together `quantity` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyOrder {
    pub pillows: Vec<Pillow>,
    pub quantity: u32,
    pub total: f64,
}

impl ReadyOrder {
    pub fn new(pillows: Vec<Pillow>, quantity: u32) -> DomainResult<Self> {
        let total = priced_total(&pillows, quantity)?;
        Ok(Self {
            pillows,
            quantity,
            total,
        })
    }

    /// Re-check an order that did not come through [`ReadyOrder::new`], e.g.
    /// one read from a cart file. The declared total must match the pillows.
    pub fn validate(&self) -> DomainResult<()> {
        let expected = priced_total(&self.pillows, self.quantity)?;
        if (self.total - expected).abs() > 1e-6 {
            return Err(DomainError::validation(format!(
                "ready order total {} does not match {} x pillows = {expected}",
                self.total, self.quantity
            )));
        }
        Ok(())
    }
}

fn priced_total(pillows: &[Pillow], quantity: u32) -> DomainResult<f64> {
    if pillows.is_empty() {
        return Err(DomainError::validation("select at least one pillow"));
    }
    if quantity == 0 {
        return Err(DomainError::validation("quantity must be at least 1"));
    }
    let mut total = 0.0;
    for pillow in pillows {
        total += ensure_non_negative(&format!("price of '{}'", pillow.name), pillow.price())?
            * f64::from(quantity);
    }
    Ok(total)
}

/// One cart entry: a custom line built from components, or ready goods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CartLine {
    Ready(ReadyOrder),
    Custom(LineItem),
}

impl CartLine {
    pub fn is_ready(&self) -> bool {
        matches!(self, CartLine::Ready(_))
    }

    fn validate(&self) -> DomainResult<()> {
        match self {
            CartLine::Custom(line) => {
                if line.is_empty() {
                    return Err(DomainError::validation("line has no components"));
                }
                line.validate()
            }
            CartLine::Ready(order) => order.validate(),
        }
    }

    fn total(&self, policy: PricingPolicy) -> DomainResult<f64> {
        match self {
            CartLine::Custom(line) => line_total(line, policy),
            CartLine::Ready(order) => Ok(order.total),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    policy: PricingPolicy,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Empty cart pricing custom lines with [`PricingPolicy::Multiplied`].
    pub fn new() -> Self {
        Self::with_policy(PricingPolicy::Multiplied)
    }

    pub fn with_policy(policy: PricingPolicy) -> Self {
        Self {
            lines: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn with_line(&self, line: CartLine) -> DomainResult<Cart> {
        line.validate()?;
        let mut lines = self.lines.clone();
        lines.push(line);
        Ok(Cart {
            lines,
            policy: self.policy,
        })
    }

    pub fn without_line(&self, index: usize) -> DomainResult<Cart> {
        if index >= self.lines.len() {
            return Err(DomainError::not_found());
        }
        let lines = self
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, line)| line.clone())
            .collect();
        Ok(Cart {
            lines,
            policy: self.policy,
        })
    }

    pub fn with_updated_line(&self, index: usize, line: CartLine) -> DomainResult<Cart> {
        if index >= self.lines.len() {
            return Err(DomainError::not_found());
        }
        line.validate()?;
        let mut lines = self.lines.clone();
        lines[index] = line;
        Ok(Cart {
            lines,
            policy: self.policy,
        })
    }

    /// Per-line totals in cart order.
    pub fn line_totals(&self) -> DomainResult<Vec<f64>> {
        self.lines.iter().map(|line| line.total(self.policy)).collect()
    }

    pub fn total(&self) -> DomainResult<f64> {
        self.lines
            .iter()
            .try_fold(0.0, |acc, line| line.total(self.policy).map(|t| acc + t))
    }

    /// Turn the cart into a submission for the order-recording API.
    ///
    /// The cart must not be empty, the client must be named and the amount
    /// received must lie within `[0, total]`.
    pub fn checkout(&self, client: &str, received: f64) -> DomainResult<SaleDraft> {
        if self.lines.is_empty() {
            return Err(DomainError::validation("cart is empty"));
        }
        let client = client.trim();
        if client.is_empty() {
            return Err(DomainError::validation("client name cannot be empty"));
        }
        let received = ensure_non_negative("received", received)?;
        let total = self.total()?;
        if received > total {
            return Err(DomainError::validation(format!(
                "received {received} exceeds order total {total}"
            )));
        }
        let ready_order = self.lines.iter().all(CartLine::is_ready).then_some(true);
        Ok(SaleDraft {
            orders: self.lines.clone(),
            client: client.to_string(),
            total,
            received,
            ready_order,
        })
    }
}

/// Body of `POST /sale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub orders: Vec<CartLine>,
    pub client: String,
    pub total: f64,
    pub received: f64,
    #[serde(rename = "readyOrder", default, skip_serializing_if = "Option::is_none")]
    pub ready_order: Option<bool>,
}

impl SaleDraft {
    /// Amount left to pay once this sale is recorded.
    pub fn debt(&self) -> f64 {
        self.total - self.received
    }

    /// Re-check the submit guard for drafts not built through [`Cart::checkout`].
    pub fn validate(&self) -> DomainResult<()> {
        if self.orders.is_empty() {
            return Err(DomainError::validation("cart is empty"));
        }
        for line in &self.orders {
            line.validate()?;
        }
        if self.client.trim().is_empty() {
            return Err(DomainError::validation("client name cannot be empty"));
        }
        ensure_non_negative("total", self.total)?;
        ensure_non_negative("received", self.received)?;
        if self.received > self.total {
            return Err(DomainError::validation(format!(
                "received {} exceeds order total {}",
                self.received, self.total
            )));
        }
        Ok(())
    }
}
