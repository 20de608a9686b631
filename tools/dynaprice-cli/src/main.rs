//! dynaprice - terminal dashboard for a dynamic pricing service.
//!
//! Commands:
//! - `dynaprice status` - Check the service and show the overview
//! - `dynaprice products` - List, search and sort the catalog
//! - `dynaprice price` - Dynamic price of one product
//! - `dynaprice predict` - Price an ad-hoc product
//! - `dynaprice train` - Retrain the pricing model
//! - `dynaprice analytics` - Top demand, low stock and high value tables
//! - `dynaprice export` - Write the product list to CSV
//! - `dynaprice browse` - Interactive dashboard
//! - `dynaprice config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    AnalyticsArgs, BrowseArgs, ConfigArgs, ExportArgs, PredictArgs, PriceArgs, ProductsArgs,
    StatusArgs, TrainArgs,
};

/// dynaprice - Browse products, prices and analytics of a pricing service
#[derive(Parser)]
#[command(name = "dynaprice")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// API base URL for this invocation (not saved)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the pricing service and show the overview
    Status(StatusArgs),

    /// List products with search, sort and pagination
    Products(ProductsArgs),

    /// Get the dynamic price of a product
    Price(PriceArgs),

    /// Calculate a price for custom product figures
    Predict(PredictArgs),

    /// Retrain the pricing model
    Train(TrainArgs),

    /// Show analytics tables
    Analytics(AnalyticsArgs),

    /// Export products to CSV
    Export(ExportArgs),

    /// Interactive dashboard
    Browse(BrowseArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let ctx = context::Context::load(cli.config.as_deref(), cli.api_url.as_deref(), output)?;
    logging::init(cli.verbose, ctx.config.logging.format);
    tracing::debug!(config = ?ctx.config_path, api_url = ctx.api_url(), "context loaded");

    // Execute command
    let result = match cli.command {
        Commands::Status(args) => commands::status::run(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Price(args) => commands::price::run(args, &ctx).await,
        Commands::Predict(args) => commands::predict::run(args, &ctx).await,
        Commands::Train(args) => commands::train::run(args, &ctx).await,
        Commands::Analytics(args) => commands::analytics::run(args, &ctx).await,
        Commands::Export(args) => commands::export::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
