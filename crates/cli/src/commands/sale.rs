//! Single-sale commands: detail view, deletion and submission.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, bail};

use atelier_client::Snapshot;
use atelier_core::SaleId;
use atelier_sales::{Cart, CartLine, Sale, SaleDetail};

use super::{SaleArgs, SaleCommand};
use crate::context::Context;
use crate::output::{debt_badge, money};

pub async fn run(args: SaleArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SaleCommand::Show { id } => show(&id, ctx).await,
        SaleCommand::Delete { id } => delete(&id, ctx).await,
        SaleCommand::Submit {
            cart,
            client,
            received,
        } => submit(&cart, &client, received, ctx).await,
    }
}

async fn show(id: &str, ctx: &Context) -> Result<()> {
    let id: SaleId = id.parse()?;
    let mut sales: Snapshot<Sale> = Snapshot::new();
    sales.apply("sales", ctx.client()?.list_sales().await);
    if let Some(err) = sales.last_error() {
        ctx.output.warn(&format!("could not load sales: {err}"));
    }
    let Some(sale) = find_sale(sales.items(), &id) else {
        bail!("sale {id} not found");
    };

    let detail = SaleDetail::build(sale, ctx.config.pricing);
    if ctx.output.is_json() {
        ctx.output.json(&detail);
        return Ok(());
    }

    ctx.output.header(&format!("Sale {id}"));
    ctx.output.kv("Client", &detail.client);
    ctx.output.kv("Created", &detail.created_at.format("%Y-%m-%d %H:%M").to_string());

    let widths = [24, 24, 24, 16, 10];
    println!();
    ctx.output
        .table_row(&["ITEM", "MATERIAL", "CASE", "SERVICE", "TOTAL"], &widths);
    for line in &detail.lines {
        let total = line.total.map(money).unwrap_or_else(|| "-".into());
        ctx.output.table_row(
            &[
                line.item.as_deref().unwrap_or("-"),
                line.material.as_deref().unwrap_or("-"),
                line.case.as_deref().unwrap_or("-"),
                line.service.as_deref().unwrap_or("-"),
                &total,
            ],
            &widths,
        );
    }

    println!();
    if let Some(lines_total) = detail.lines_total {
        ctx.output.kv("Lines total", &money(lines_total));
    } else {
        ctx.output.warn("some lines carry invalid numbers; lines total unavailable");
    }
    ctx.output.kv("Total", &money(detail.total));
    ctx.output.kv("Received", &money(detail.received));
    ctx.output.kv("Debt", &debt_badge(detail.debt));
    Ok(())
}

async fn delete(id: &str, ctx: &Context) -> Result<()> {
    let id: SaleId = id.parse()?;
    let session = ctx.config.load_session()?;
    ctx.client()?.delete_sale(&session, &id).await?;
    ctx.output.success(&format!("Deleted sale {id}"));
    Ok(())
}

async fn submit(cart_path: &Path, client: &str, received: f64, ctx: &Context) -> Result<()> {
    let cart = load_cart(cart_path)?;
    let draft = cart.checkout(client, received)?;
    ctx.output.debug(&format!(
        "{} line(s), total {}, debt {}",
        draft.orders.len(),
        money(draft.total),
        money(draft.debt())
    ));

    let session = ctx.config.load_session()?;
    let recorded = ctx.client()?.create_sale(&session, &draft).await?;

    if ctx.output.is_json() {
        match &recorded {
            Some(sale) => ctx.output.json(sale),
            None => ctx.output.json(&draft),
        }
        return Ok(());
    }

    ctx.output.success(&format!("Recorded sale for {}", draft.client));
    if let Some(id) = recorded.as_ref().and_then(|s| s.id.as_ref()) {
        ctx.output.kv("Id", id.as_str());
    }
    ctx.output.kv("Total", &money(draft.total));
    ctx.output.kv("Received", &money(draft.received));
    ctx.output.kv("Debt", &debt_badge(draft.debt()));
    Ok(())
}

fn find_sale<'a>(sales: &'a [Sale], id: &SaleId) -> Option<&'a Sale> {
    sales.iter().find(|s| s.id.as_ref() == Some(id))
}

/// Read a cart file: a JSON array of custom lines and ready orders.
fn load_cart(path: &Path) -> Result<Cart> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cart file {}", path.display()))?;
    parse_cart(&content).with_context(|| format!("Invalid cart file {}", path.display()))
}

fn parse_cart(content: &str) -> Result<Cart> {
    let lines: Vec<CartLine> = serde_json::from_str(content)?;
    let mut cart = Cart::new();
    for (index, line) in lines.into_iter().enumerate() {
        cart = cart
            .with_line(line)
            .with_context(|| format!("line {}", index + 1))?;
    }
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_file_is_priced_with_multipliers() {
        let cart = parse_cart(
            r#"[
                {"item": {"name": "Velvet", "price": 100}, "length": 3},
                {"pillows": [{"name": "Bolster", "price": 1500}], "quantity": 1, "total": 1500}
            ]"#,
        )
        .unwrap();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total().unwrap(), 1800.0);
    }

    #[test]
    fn invalid_line_names_its_position() {
        let err = parse_cart(r#"[{"item": {"name": "Velvet", "price": 100}, "length": 1}, {}]"#)
            .unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn ready_order_total_is_checked_against_pillows() {
        let err = parse_cart(
            r#"[{"pillows": [{"name": "Bolster", "price": 1500}], "quantity": 2, "total": 10}]"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));

        let err = parse_cart(
            r#"[
                {"item": {"name": "Velvet", "price": 100}, "length": 1},
                {"pillows": [], "quantity": 0, "total": -100}
            ]"#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn failed_fetch_reports_sale_as_missing() {
        let mut sales: Snapshot<Sale> = Snapshot::new();
        sales.apply(
            "sales",
            Err(atelier_client::ClientError::Network("connection refused".into())),
        );
        let id = SaleId::new("65f0c0ffee");
        assert!(find_sale(sales.items(), &id).is_none());
        assert!(sales.last_error().is_some());
    }

    #[test]
    fn non_array_is_rejected() {
        assert!(parse_cart(r#"{"item": {}}"#).is_err());
    }
}
