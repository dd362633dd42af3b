//! Finished goods: listing and upkeep.

use anyhow::Result;

use atelier_catalog::{Pillow, PillowDraft};
use atelier_client::Snapshot;
use atelier_core::PillowId;

use super::{PillowsArgs, PillowsCommand};
use crate::context::Context;
use crate::output::money;

pub async fn run(args: PillowsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        PillowsCommand::List => list(ctx).await,
        PillowsCommand::Save {
            name,
            price,
            id,
            length,
            weight,
            quantity,
        } => {
            let draft = PillowDraft {
                id: id.map(|raw| raw.parse::<PillowId>()).transpose()?,
                name,
                price,
                length,
                weight,
                quantity,
            };
            save(&draft, ctx).await
        }
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let mut snapshot: Snapshot<Pillow> = Snapshot::new();
    snapshot.apply("pillows", client.list_pillows().await);
    if let Some(err) = snapshot.last_error() {
        ctx.output.warn(&format!("could not load finished goods: {err}"));
    }

    if ctx.output.is_json() {
        ctx.output.json(&snapshot.items());
        return Ok(());
    }

    ctx.output.header("Finished goods");
    let widths = [26, 28, 10, 8, 8, 8];
    ctx.output
        .table_row(&["ID", "NAME", "PRICE", "LENGTH", "WEIGHT", "QTY"], &widths);
    for pillow in snapshot.items() {
        let id = pillow.id.as_ref().map(|id| id.as_str()).unwrap_or("-");
        let price = money(pillow.price());
        let length = optional(pillow.length);
        let weight = optional(pillow.weight);
        let quantity = optional(pillow.quantity);
        ctx.output.table_row(
            &[id, &pillow.name, &price, &length, &weight, &quantity],
            &widths,
        );
    }
    Ok(())
}

async fn save(draft: &PillowDraft, ctx: &Context) -> Result<()> {
    draft.validate()?;
    let session = ctx.config.load_session()?;
    let saved = ctx.client()?.save_pillow(&session, draft).await?;

    if ctx.output.is_json() {
        ctx.output.json(&saved);
        return Ok(());
    }
    let verb = if draft.is_update() { "Updated" } else { "Created" };
    ctx.output.success(&format!("{verb} '{}'", saved.name));
    if let Some(id) = &saved.id {
        ctx.output.kv("Id", id.as_str());
    }
    ctx.output.kv("Price", &money(saved.price()));
    Ok(())
}

fn optional(value: Option<f64>) -> String {
    value.map(money).unwrap_or_else(|| "-".into())
}
