//! Price calculator for ad-hoc product figures.

use anyhow::Result;
use dialoguer::Input;
use dynaprice_core::catalog::PricingForm;

use super::{interactive, settle, PredictArgs};
use crate::context::Context;
use crate::render;

/// Run the predict command.
pub async fn run(args: PredictArgs, ctx: &Context) -> Result<()> {
    let prompt = interactive(ctx);
    let form = PricingForm {
        product_id: field(args.product_id, "Product ID", prompt)?,
        base_price: field(args.base_price, "Base price (₹)", prompt)?,
        stock: field(args.stock, "Stock", prompt)?,
        sales_7: field(args.sales_7, "7-day sales", prompt)?,
        sales_30: field(args.sales_30, "30-day sales", prompt)?,
        day: field(args.day, "Day of week (0=Mon .. 6=Sun)", prompt)?,
    };

    let mut session = ctx.dashboard()?;
    let spinner = ctx.output.spinner("Calculating price...");
    let result = session.calculate_price(&form).await.cloned();
    spinner.finish_and_clear();
    let priced = settle(ctx, &mut session, result)?;

    if ctx.output.is_json() {
        ctx.output.json(&priced);
    } else {
        render::pricing(&ctx.output, &priced);
    }
    Ok(())
}

/// A form field from the command line, or from a prompt when allowed.
/// Left empty otherwise so validation reports it.
pub(crate) fn field(value: Option<String>, label: &str, prompt: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None if prompt => Ok(Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}
