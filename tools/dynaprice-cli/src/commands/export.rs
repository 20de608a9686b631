//! CSV export of the product list.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;

use super::{interactive, settle, ExportArgs};
use crate::context::Context;

/// Run the export command.
pub async fn run(args: ExportArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(args.output.as_deref().unwrap_or(&ctx.config.export.filename));

    if path.exists() && !args.force {
        if !interactive(ctx) {
            bail!("{} already exists. Use --force to overwrite.", path.display());
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Overwrite {}?", path.display()))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let mut session = ctx.dashboard()?;
    let spinner = ctx.output.spinner("Loading products...");
    let result = session.load_products().await;
    spinner.finish_and_clear();
    settle(ctx, &mut session, result)?;

    if let Some(ref term) = args.search {
        session.search(term);
    }
    if let Some(key) = args.sort {
        session.sort(key);
    }

    ctx.output.debug(&format!("Writing {}", path.display()));
    let result = session.export_to(&path);
    let rows = settle(ctx, &mut session, result)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "path": path.display().to_string(), "rows": rows }));
    } else {
        ctx.output.kv("File", &path.display().to_string());
        ctx.output.kv("Rows", &rows.to_string());
    }
    Ok(())
}
