//! Dynamic price of a catalog product.

use anyhow::Result;
use dynaprice_core::ProductId;

use super::{settle, PriceArgs};
use crate::context::Context;
use crate::render;

/// Run the price command.
pub async fn run(args: PriceArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.dashboard()?;
    let id = ProductId::new(args.product_id);

    let spinner = ctx.output.spinner(&format!("Pricing product {}...", id));
    let result = session.price_for(id).await.cloned();
    spinner.finish_and_clear();
    let priced = settle(ctx, &mut session, result)?;

    if ctx.output.is_json() {
        ctx.output.json(&priced);
    } else {
        render::pricing(&ctx.output, &priced);
    }
    Ok(())
}
