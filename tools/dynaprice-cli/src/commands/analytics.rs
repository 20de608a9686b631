//! Analytics tables.

use anyhow::{bail, Result};

use super::{flush, AnalyticsArgs};
use crate::context::Context;
use crate::render;

/// Run the analytics command.
pub async fn run(args: AnalyticsArgs, ctx: &Context) -> Result<()> {
    let mut options = ctx.config.dashboard_options();
    if let Some(limit) = args.limit {
        options.analytics_limit = limit;
    }
    if let Some(threshold) = args.threshold {
        options.low_stock_threshold = threshold;
    }

    let mut session = ctx.dashboard_with_options(options)?;
    let spinner = ctx.output.spinner("Loading analytics...");
    let report = session.load_analytics().await.clone();
    spinner.finish_and_clear();
    // A failed table is reported but does not stop the others.
    flush(ctx, &mut session);

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        render::analytics(&ctx.output, &report);
    }

    if report.is_empty() {
        bail!("No analytics could be loaded");
    }
    Ok(())
}
