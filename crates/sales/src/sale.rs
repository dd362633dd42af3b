use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use atelier_core::{SaleId, lenient_f64, or_zero};

use crate::line::LineItem;
use crate::period::ReferenceDate;

/// A recorded transaction.
///
/// `total` and `received` are the stored, authoritative figures; they are not
/// recomputed from the lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SaleId>,
    /// Client name.
    #[serde(default)]
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "sales", default)]
    pub lines: Vec<LineItem>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    /// Cumulative amount paid so far.
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub received: Option<f64>,
    /// Most recent payment increment.
    #[serde(
        rename = "last_received",
        alias = "lastReceived",
        default,
        deserialize_with = "lenient_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_received: Option<f64>,
}

impl Sale {
    pub fn new(client: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: client.into(),
            created_at,
            updated_at: None,
            lines: Vec::new(),
            total: None,
            received: None,
            last_received: None,
        }
    }

    pub fn total(&self) -> f64 {
        or_zero(self.total)
    }

    pub fn received(&self) -> f64 {
        or_zero(self.received)
    }

    pub fn last_received(&self) -> f64 {
        or_zero(self.last_received)
    }

    /// Outstanding amount: `total - received`, not clamped.
    pub fn debt(&self) -> f64 {
        self.total() - self.received()
    }

    pub fn has_debt(&self) -> bool {
        self.debt() != 0.0
    }

    /// Timestamp used for date-range filtering under the given policy.
    pub fn reference_date(&self, policy: ReferenceDate) -> DateTime<Utc> {
        match policy {
            ReferenceDate::UpdatedOrCreated => self.updated_at.unwrap_or(self.created_at),
            ReferenceDate::CreatedAt => self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn decodes_store_record() {
        let json = r#"{
            "_id": "s1",
            "name": "Aigerim",
            "createdAt": "2024-02-15T09:30:00.000Z",
            "updatedAt": "2024-03-01T12:00:00.000Z",
            "sales": [{"service": {"name": "Sewing", "price": 500}}],
            "total": 12000,
            "received": "5000",
            "last_received": 2000,
            "__v": 0
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.id, Some(SaleId::new("s1")));
        assert_eq!(sale.lines.len(), 1);
        assert_eq!(sale.received(), 5000.0);
        assert_eq!(sale.last_received(), 2000.0);
        assert_eq!(sale.debt(), 7000.0);
    }

    #[test]
    fn accepts_camel_case_last_received() {
        let json = r#"{"createdAt": "2024-01-01T00:00:00Z", "lastReceived": 300}"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.last_received, Some(300.0));
    }

    #[test]
    fn debt_is_not_clamped() {
        let mut sale = Sale::new("Dana", at(2024, 1, 1));
        sale.total = Some(1000.0);
        sale.received = Some(1500.0);
        assert_eq!(sale.debt(), -500.0);
        assert!(sale.has_debt());
    }

    #[test]
    fn missing_received_counts_as_zero() {
        let mut sale = Sale::new("Dana", at(2024, 1, 1));
        sale.total = Some(800.0);
        assert_eq!(sale.debt(), 800.0);
    }

    #[test]
    fn reference_date_policies() {
        let mut sale = Sale::new("Dana", at(2024, 1, 1));
        assert_eq!(sale.reference_date(ReferenceDate::UpdatedOrCreated), at(2024, 1, 1));

        sale.updated_at = Some(at(2024, 2, 2));
        assert_eq!(sale.reference_date(ReferenceDate::UpdatedOrCreated), at(2024, 2, 2));
        assert_eq!(sale.reference_date(ReferenceDate::CreatedAt), at(2024, 1, 1));
    }
}
