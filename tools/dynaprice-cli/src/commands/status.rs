//! Service status and overview.

use anyhow::{bail, Result};
use dynaprice_core::dashboard::ApiStatus;
use serde_json::json;

use super::{flush, StatusArgs};
use crate::context::Context;
use crate::render;

/// Run the status command.
pub async fn run(_args: StatusArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.dashboard()?;

    let spinner = ctx.output.spinner(&format!("Connecting to {}", session.api_url()));
    let status = session.start().await;
    spinner.finish_and_clear();
    flush(ctx, &mut session);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "status": status,
            "api_url": session.api_url(),
            "overview": session.overview(),
        }));
    } else {
        render::overview(&ctx.output, status, session.overview(), session.api_url());
    }

    if status != ApiStatus::Online {
        bail!("Pricing service at {} is not reachable", session.api_url());
    }
    Ok(())
}
