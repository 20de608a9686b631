//! Model retraining.

use anyhow::Result;
use dialoguer::Confirm;

use super::{interactive, settle, TrainArgs};
use crate::context::Context;
use crate::render;

/// Run the train command.
pub async fn run(args: TrainArgs, ctx: &Context) -> Result<()> {
    if !args.yes && interactive(ctx) {
        let confirmed = Confirm::new()
            .with_prompt("Retrain the pricing model? This can take a while.")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    let mut session = ctx.dashboard()?;
    let spinner = ctx.output.spinner("Training model...");
    let result = session.train_model().await;
    spinner.finish_and_clear();
    let report = settle(ctx, &mut session, result)?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
    } else {
        render::training(&ctx.output, &report);
        if let Some(label) = session.overview().model_label() {
            ctx.output.kv("Model Status", label);
        }
    }
    Ok(())
}
