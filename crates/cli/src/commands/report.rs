//! Sales history and debts listings.

use anyhow::Result;

use atelier_client::Snapshot;
use atelier_sales::{DateRange, ReferenceDate, Sale, SalesReport};

use super::ReportArgs;
use crate::context::Context;
use crate::output::{debt_badge, money};

pub async fn sales(args: ReportArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let mut snapshot: Snapshot<Sale> = Snapshot::new();
    snapshot.apply("sales", client.list_sales().await);
    render(
        "Sales",
        &args,
        ReferenceDate::UpdatedOrCreated,
        &snapshot,
        ctx,
    );
    Ok(())
}

pub async fn debts(args: ReportArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let mut snapshot: Snapshot<Sale> = Snapshot::new();
    snapshot.apply("debts", client.list_debts().await);
    render("Debts", &args, ReferenceDate::CreatedAt, &snapshot, ctx);
    Ok(())
}

fn render(
    title: &str,
    args: &ReportArgs,
    reference: ReferenceDate,
    snapshot: &Snapshot<Sale>,
    ctx: &Context,
) {
    if let Some(err) = snapshot.last_error() {
        ctx.output.warn(&format!("could not load {}: {err}", title.to_lowercase()));
    }

    let range = DateRange::from_days(args.from, args.to);
    let report = SalesReport::build(snapshot.items(), range, reference, ctx.config.pricing);

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return;
    }

    ctx.output.header(&period_title(title, args));
    if report.is_empty() {
        ctx.output.info("No sales in this period.");
    } else {
        let widths = [12, 20, 10, 10, 10, 10, 10];
        ctx.output.table_row(
            &["DATE", "CLIENT", "TOTAL", "LINES", "RECEIVED", "LAST", "DEBT"],
            &widths,
        );
        for row in &report.rows {
            let date = row.date.format("%Y-%m-%d").to_string();
            let total = money(row.total);
            let lines = row.lines_total.map(money).unwrap_or_else(|| "-".into());
            let received = money(row.received);
            let last = money(row.last_received);
            let debt = debt_badge(row.debt);
            ctx.output.table_row(
                &[&date, &row.client, &total, &lines, &received, &last, &debt],
                &widths,
            );
        }
    }

    println!();
    ctx.output.kv("Received", &money(report.received_sum));
    ctx.output.kv("Orders total", &money(report.declared_total_sum));
    ctx.output.kv("Outstanding", &money(report.debt_sum));
}

fn period_title(title: &str, args: &ReportArgs) -> String {
    match (args.from, args.to) {
        (None, None) => title.to_string(),
        (Some(from), None) => format!("{title} since {from}"),
        (None, Some(to)) => format!("{title} until {to}"),
        (Some(from), Some(to)) => format!("{title} {from} .. {to}"),
    }
}
