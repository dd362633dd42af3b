//! CLI command implementations.

pub mod catalog;
pub mod pillows;
pub mod report;
pub mod sale;
pub mod session;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use atelier_catalog::ComponentKind;

/// Arguments for the `sales` and `debts` listings.
#[derive(Args)]
pub struct ReportArgs {
    /// First day of the period (YYYY-MM-DD), inclusive.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the period (YYYY-MM-DD), inclusive.
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

#[derive(Args)]
pub struct SaleArgs {
    #[command(subcommand)]
    pub command: SaleCommand,
}

#[derive(Subcommand)]
pub enum SaleCommand {
    /// Show a sale with its lines.
    Show {
        /// Sale identifier.
        id: String,
    },
    /// Delete a sale (admin only).
    Delete {
        /// Sale identifier.
        id: String,
    },
    /// Record a sale from a cart file.
    Submit {
        /// JSON array of cart lines.
        cart: PathBuf,

        /// Client name.
        #[arg(long)]
        client: String,

        /// Amount paid now.
        #[arg(long)]
        received: f64,
    },
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Only this kind of component.
    #[arg(long)]
    pub kind: Option<ComponentKind>,
}

#[derive(Args)]
pub struct PillowsArgs {
    #[command(subcommand)]
    pub command: PillowsCommand,
}

#[derive(Subcommand)]
pub enum PillowsCommand {
    /// List finished goods.
    List,
    /// Create an entry, or update it when --id is given.
    Save {
        #[arg(long)]
        name: String,

        #[arg(long)]
        price: f64,

        /// Existing entry to update.
        #[arg(long)]
        id: Option<String>,

        #[arg(long, default_value_t = 0.0)]
        length: f64,

        #[arg(long, default_value_t = 0.0)]
        weight: f64,

        #[arg(long, default_value_t = 0.0)]
        quantity: f64,
    },
}

#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Store the login used for writes.
    Set {
        #[arg(long)]
        name: String,

        #[arg(long)]
        role: String,

        #[arg(long, env = "ATELIER_TOKEN", hide_env_values = true)]
        token: String,
    },
    /// Show the stored login.
    Show,
    /// Forget the stored login.
    Clear,
}
