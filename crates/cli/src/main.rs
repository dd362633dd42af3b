//! `atelier`: sales history, debts, order entry and catalog upkeep against the
//! workshop's API.
//!
//! Commands:
//! - `atelier sales` - sales history with collected totals
//! - `atelier debts` - outstanding debts
//! - `atelier sale` - show, delete or submit a single sale
//! - `atelier catalog` - priced components
//! - `atelier pillows` - finished goods
//! - `atelier session` - manage the stored login

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use atelier_observability::LogFormat;
use atelier_sales::PricingPolicy;

use commands::{CatalogArgs, PillowsArgs, ReportArgs, SaleArgs, SessionArgs};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the API.
    #[arg(long, global = true, env = "ATELIER_API_URL")]
    api_url: Option<String>,

    /// Stored session file (defaults to the user config dir).
    #[arg(long, global = true, env = "ATELIER_SESSION")]
    session: Option<std::path::PathBuf>,

    /// Formula used to recompute line totals of recorded sales.
    #[arg(long, global = true, env = "ATELIER_PRICING", default_value = "legacy")]
    pricing: PricingPolicy,

    /// Request timeout in seconds.
    #[arg(long, global = true, env = "ATELIER_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log line format on stderr.
    #[arg(long, global = true, env = "ATELIER_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    /// Use JSON output format.
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sales history for a period
    Sales(ReportArgs),

    /// Sales with an outstanding balance
    Debts(ReportArgs),

    /// Show, delete or submit a sale
    Sale(SaleArgs),

    /// List priced components
    Catalog(CatalogArgs),

    /// List or save finished goods
    Pillows(PillowsArgs),

    /// Manage the stored login
    Session(SessionArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads the environment fallbacks.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    atelier_observability::init_with_default(cli.log_format, default_log_filter(cli.verbose));

    let output = output::Output::new(cli.verbose, cli.json);
    let config = config::CliConfig::resolve(
        cli.api_url,
        cli.session,
        cli.pricing,
        cli.timeout_secs,
    )?;
    let ctx = context::Context::new(config, output);

    let result = match cli.command {
        Commands::Sales(args) => commands::report::sales(args, &ctx).await,
        Commands::Debts(args) => commands::report::debts(args, &ctx).await,
        Commands::Sale(args) => commands::sale::run(args, &ctx).await,
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Pillows(args) => commands::pillows::run(args, &ctx).await,
        Commands::Session(args) => commands::session::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{e:#}"));
        std::process::exit(1);
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is unset.
fn default_log_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_report_with_period_and_policy() {
        let cli = Cli::try_parse_from([
            "atelier",
            "--pricing",
            "multiplied",
            "sales",
            "--from",
            "2024-02-01",
            "--to",
            "2024-02-28",
        ])
        .unwrap();
        assert_eq!(cli.pricing, PricingPolicy::Multiplied);
        match cli.command {
            Commands::Sales(args) => {
                assert_eq!(args.from.map(|d| d.to_string()).as_deref(), Some("2024-02-01"));
                assert_eq!(args.to.map(|d| d.to_string()).as_deref(), Some("2024-02-28"));
            }
            _ => panic!("expected sales command"),
        }
    }

    #[test]
    fn logs_at_info_unless_verbose() {
        assert_eq!(default_log_filter(false), "info");
        assert_eq!(default_log_filter(true), "debug");
    }

    #[test]
    fn rejects_unknown_pricing_policy() {
        assert!(Cli::try_parse_from(["atelier", "--pricing", "double", "sales"]).is_err());
    }

    #[test]
    fn rejects_malformed_day() {
        assert!(Cli::try_parse_from(["atelier", "debts", "--from", "15/02/2024"]).is_err());
    }

    #[test]
    fn submit_requires_client_and_received() {
        assert!(Cli::try_parse_from(["atelier", "sale", "submit", "cart.json"]).is_err());
        let cli = Cli::try_parse_from([
            "atelier", "sale", "submit", "cart.json", "--client", "Dana", "--received", "120",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Sale(_)));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["atelier", "catalog", "--kind", "material", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Catalog(args) => {
                assert_eq!(args.kind, Some(atelier_catalog::ComponentKind::Material));
            }
            _ => panic!("expected catalog command"),
        }
    }
}
