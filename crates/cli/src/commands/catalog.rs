//! Priced component listing.

use anyhow::Result;

use atelier_catalog::{ComponentKind, PricedComponent};
use atelier_client::Snapshot;

use super::CatalogArgs;
use crate::context::Context;
use crate::output::money;

pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let kinds = match args.kind {
        Some(kind) => vec![kind],
        None => ComponentKind::ALL.to_vec(),
    };

    let mut listing = serde_json::Map::new();
    for kind in kinds {
        let mut snapshot: Snapshot<PricedComponent> = Snapshot::new();
        snapshot.apply(kind.endpoint(), client.list_components(kind).await);
        if let Some(err) = snapshot.last_error() {
            ctx.output.warn(&format!("could not load {kind} list: {err}"));
        }

        if ctx.output.is_json() {
            listing.insert(kind.to_string(), serde_json::to_value(snapshot.items())?);
            continue;
        }
        render_kind(kind, snapshot.items(), ctx);
    }

    if ctx.output.is_json() {
        ctx.output.json(&listing);
    }
    Ok(())
}

fn render_kind(kind: ComponentKind, components: &[PricedComponent], ctx: &Context) {
    ctx.output
        .header(&format!("{} ({})", kind, components.len()));
    let widths = [28, 12];
    for component in components {
        let price = match kind.unit() {
            Some(unit) => format!("{} / {unit}", money(component.price())),
            None => money(component.price()),
        };
        ctx.output.table_row(&[&component.name, &price], &widths);
    }
}
