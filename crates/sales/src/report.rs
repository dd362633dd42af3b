//! Read models for the sales history and debts listings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use atelier_catalog::ComponentKind;
use atelier_core::SaleId;

use crate::line::LineItem;
use crate::period::{DateRange, ReferenceDate, filter_by_date_range};
use crate::pricing::{PricingPolicy, aggregate_total, line_total, orders_total, sum_received};
use crate::sale::Sale;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: Option<SaleId>,
    pub client: String,
    pub date: DateTime<Utc>,
    pub total: f64,
    pub received: f64,
    pub last_received: f64,
    pub debt: f64,
    /// Recomputed from the lines; `None` when a line carries invalid numbers.
    pub lines_total: Option<f64>,
}

/// Filtered listing with its footer figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub range: DateRange,
    pub reference: ReferenceDate,
    pub pricing: PricingPolicy,
    pub rows: Vec<ReportRow>,
    /// Amount collected over the selected sales.
    pub received_sum: f64,
    pub declared_total_sum: f64,
    pub debt_sum: f64,
}

impl SalesReport {
    pub fn build(
        sales: &[Sale],
        range: DateRange,
        reference: ReferenceDate,
        pricing: PricingPolicy,
    ) -> Self {
        let selected = filter_by_date_range(sales, &range, reference);

        let rows = selected
            .iter()
            .map(|sale| ReportRow {
                id: sale.id.clone(),
                client: sale.name.clone(),
                date: sale.reference_date(reference),
                total: sale.total(),
                received: sale.received(),
                last_received: sale.last_received(),
                debt: sale.debt(),
                lines_total: aggregate_total(&sale.lines, pricing).ok(),
            })
            .collect::<Vec<_>>();

        let received_sum = sum_received(selected.iter().copied());
        let declared_total_sum = orders_total(selected.iter().copied());
        let debt_sum = rows.iter().fold(0.0, |acc, row| acc + row.debt);

        Self {
            range,
            reference,
            pricing,
            rows,
            received_sum,
            declared_total_sum,
            debt_sum,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One line rendered as `name (price * multiplier unit)` per slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSummary {
    pub item: Option<String>,
    pub material: Option<String>,
    pub case: Option<String>,
    pub service: Option<String>,
    pub total: Option<f64>,
}

impl LineSummary {
    pub fn from_line(line: &LineItem, pricing: PricingPolicy) -> Self {
        Self {
            item: describe(line, ComponentKind::Item),
            material: describe(line, ComponentKind::Material),
            case: describe(line, ComponentKind::Case),
            service: describe(line, ComponentKind::Service),
            total: line_total(line, pricing).ok(),
        }
    }
}

fn describe(line: &LineItem, kind: ComponentKind) -> Option<String> {
    let component = line.component(kind)?;
    Some(match kind.unit() {
        Some(unit) => format!(
            "{} ({} * {}{})",
            component.name,
            component.price(),
            line.multiplier(kind),
            unit
        ),
        None => component.name.clone(),
    })
}

/// Detail view of a single sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleDetail {
    pub id: Option<SaleId>,
    pub client: String,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<LineSummary>,
    pub lines_total: Option<f64>,
    pub total: f64,
    pub received: f64,
    pub debt: f64,
}

impl SaleDetail {
    pub fn build(sale: &Sale, pricing: PricingPolicy) -> Self {
        Self {
            id: sale.id.clone(),
            client: sale.name.clone(),
            created_at: sale.created_at,
            lines: sale
                .lines
                .iter()
                .map(|line| LineSummary::from_line(line, pricing))
                .collect(),
            lines_total: aggregate_total(&sale.lines, pricing).ok(),
            total: sale.total(),
            received: sale.received(),
            debt: sale.debt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_catalog::PricedComponent;
    use chrono::{NaiveDate, TimeZone};

    fn sale(client: &str, day: u32, total: f64, received: Option<f64>) -> Sale {
        let mut s = Sale::new(client, Utc.with_ymd_and_hms(2024, 2, day, 9, 0, 0).unwrap());
        s.id = Some(SaleId::new(format!("s{day}")));
        s.total = Some(total);
        s.received = received;
        s.lines = vec![LineItem::new().with_item(PricedComponent::new("Velvet", 100.0), 2.0)];
        s
    }

    #[test]
    fn footer_figures_cover_filtered_rows_only() {
        let sales = vec![
            sale("a", 1, 1000.0, Some(400.0)),
            sale("b", 10, 500.0, None),
            sale("c", 20, 300.0, Some(300.0)),
        ];
        let range = DateRange::from_days(
            NaiveDate::from_ymd_opt(2024, 2, 5),
            NaiveDate::from_ymd_opt(2024, 2, 25),
        );
        let report = SalesReport::build(&sales, range, ReferenceDate::CreatedAt, PricingPolicy::Legacy);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].client, "b");
        assert_eq!(report.rows[0].received, 0.0);
        assert_eq!(report.received_sum, 300.0);
        assert_eq!(report.declared_total_sum, 800.0);
        assert_eq!(report.debt_sum, 500.0);
        assert_eq!(report.rows[1].lines_total, Some(100.0));
    }

    #[test]
    fn pricing_policy_applies_to_recomputed_totals() {
        let sales = vec![sale("a", 1, 1000.0, None)];
        let report = SalesReport::build(
            &sales,
            DateRange::unbounded(),
            ReferenceDate::UpdatedOrCreated,
            PricingPolicy::Multiplied,
        );
        assert_eq!(report.rows[0].lines_total, Some(200.0));
    }

    #[test]
    fn invalid_line_does_not_break_listing() {
        let mut bad = sale("a", 1, 1000.0, None);
        bad.lines[0].length = Some(-1.0);
        let report = SalesReport::build(
            &[bad],
            DateRange::unbounded(),
            ReferenceDate::UpdatedOrCreated,
            PricingPolicy::Legacy,
        );
        assert_eq!(report.rows[0].lines_total, None);
        assert_eq!(report.rows[0].debt, 1000.0);
    }

    #[test]
    fn detail_describes_each_slot() {
        let mut s = sale("a", 1, 1000.0, Some(250.0));
        s.lines[0] = s.lines[0]
            .clone()
            .with_service(PricedComponent::new("Sewing", 500.0));
        let detail = SaleDetail::build(&s, PricingPolicy::Legacy);

        let line = &detail.lines[0];
        assert_eq!(line.item.as_deref(), Some("Velvet (100 * 2m)"));
        assert_eq!(line.material, None);
        assert_eq!(line.service.as_deref(), Some("Sewing"));
        assert_eq!(line.total, Some(600.0));
        assert_eq!(detail.lines_total, Some(600.0));
        assert_eq!(detail.debt, 750.0);
    }
}
