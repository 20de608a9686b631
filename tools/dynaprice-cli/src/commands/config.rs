//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};
use serde_json::{json, Value};

use super::{settle, ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, CONFIG_NAMES};
use crate::context::Context;
use crate::output::status_badge;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "path": ctx.config_path.as_ref().map(|p| p.display().to_string()),
            "config": ctx.config,
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("url", ctx.api_url());
    ctx.output.kv("price_method", &ctx.config.api.price_method);

    ctx.output.info("");
    ctx.output.info("[products]");
    ctx.output.kv("fetch_limit", &ctx.config.products.fetch_limit.to_string());

    ctx.output.info("");
    ctx.output.info("[analytics]");
    ctx.output.kv("limit", &ctx.config.analytics.limit.to_string());
    ctx.output.kv(
        "low_stock_threshold",
        &ctx.config.analytics.low_stock_threshold.to_string(),
    );

    ctx.output.info("");
    ctx.output.info("[export]");
    ctx.output.kv("filename", &ctx.config.export.filename);

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("format", &ctx.config.logging.format.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get(key)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "key": key, "value": value }));
    } else {
        println!("{}", plain(&value));
    }

    Ok(())
}

/// Strings print bare, everything else as JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    if key == "api.url" {
        return set_api_url(value, ctx).await;
    }

    let path = ctx.settings_path();
    let mut config = if path.exists() {
        CliConfig::load(&path)?
    } else {
        CliConfig::default()
    };

    config.set(key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    ctx.output.debug(&format!("Saved {}", path.display()));

    Ok(())
}

/// Changing the API URL goes through the session so it is validated,
/// persisted and followed by a reload against the new service.
async fn set_api_url(value: &str, ctx: &Context) -> Result<()> {
    let mut session = ctx.dashboard()?;

    let spinner = ctx.output.spinner(&format!("Connecting to {}", value));
    let result = session.set_api_url(value).await;
    spinner.finish_and_clear();

    settle(ctx, &mut session, result)?;

    ctx.output
        .success(&format!("Set api.url = {}", session.api_url()));
    ctx.output.kv("API Status", &status_badge(session.status()));
    ctx.output
        .debug(&format!("Saved {}", session.settings().path().display()));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config(ctx.api_url()))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.check();

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_prints_strings_without_quotes() {
        assert_eq!(plain(&json!(r#"a"b.csv"#)), r#"a"b.csv"#);
        assert_eq!(plain(&json!(500)), "500");
        assert_eq!(plain(&Value::Null), "null");
    }
}
