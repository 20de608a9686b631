//! CLI command implementations.

pub mod analytics;
pub mod browse;
pub mod config;
pub mod export;
pub mod predict;
pub mod price;
pub mod products;
pub mod status;
pub mod train;

use anyhow::Result;
use clap::{Args, Subcommand};
use dynaprice_core::dashboard::Section;
use dynaprice_core::search::SortKey;
use dynaprice_core::DashboardError;

use crate::context::{Context, Session};

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {}

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only products whose name contains this text (case-insensitive).
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort by name, price, stock or demand.
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Page to show (1-based).
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Show every page.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Product ID.
    pub product_id: i64,
}

/// Arguments for the predict command. Missing fields are prompted for.
#[derive(Args)]
pub struct PredictArgs {
    /// Product ID.
    #[arg(long)]
    pub product_id: Option<String>,

    /// Base price.
    #[arg(long)]
    pub base_price: Option<String>,

    /// Units in stock.
    #[arg(long)]
    pub stock: Option<String>,

    /// Units sold in the last 7 days.
    #[arg(long = "sales-7")]
    pub sales_7: Option<String>,

    /// Units sold in the last 30 days.
    #[arg(long = "sales-30")]
    pub sales_30: Option<String>,

    /// Day of week, 0 (Monday) to 6 (Sunday).
    #[arg(long)]
    pub day: Option<String>,
}

/// Arguments for the train command.
#[derive(Args)]
pub struct TrainArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the analytics command.
#[derive(Args)]
pub struct AnalyticsArgs {
    /// Rows in the top-demand and high-value tables.
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Stock level below which a product counts as low.
    #[arg(short, long)]
    pub threshold: Option<u32>,
}

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output file path (default: export.filename from config).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Only export products whose name contains this text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort before exporting.
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Overwrite an existing file without asking.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Tab to open first.
    #[arg(long, default_value = "overview")]
    pub section: Section,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Finish a one-shot operation. On success the session's notification is
/// shown; on failure it is dropped and the error is returned to `main`.
pub(crate) fn settle<T>(
    ctx: &Context,
    session: &mut Session,
    result: Result<T, DashboardError>,
) -> Result<T> {
    let toast = session.take_notification();
    let value = result?;
    if let Some(toast) = toast {
        ctx.output.toast(&toast);
    }
    Ok(value)
}

/// Show whatever notification the last operation left.
pub(crate) fn flush(ctx: &Context, session: &mut Session) {
    if let Some(toast) = session.take_notification() {
        ctx.output.toast(&toast);
    }
}

/// Whether prompts can be shown.
pub(crate) fn interactive(ctx: &Context) -> bool {
    !ctx.output.is_json() && console::user_attended()
}
